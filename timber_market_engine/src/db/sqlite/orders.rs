use log::trace;
use sqlx::SqliteConnection;

use crate::{
    api::order_objects::{DeliverySection, DesignerOrderLine},
    db::traits::MarketGatewayError,
    db_types::{DeliveryStatus, Money, Order, OrderId, OrderItem, OrderStatus, PaymentMethod, PaymentStatus},
};

const ORDER_COLUMNS: &str = "id, order_id, customer_email, delivery_fee, total_amount, payment_method, \
                             payment_status, status, delivery_status, cash_collected, bank_slip_url, created_at, \
                             updated_at";

pub async fn insert_order(
    oid: &OrderId,
    customer_email: &str,
    delivery_fee: Money,
    total_amount: Money,
    payment_method: PaymentMethod,
    payment_status: PaymentStatus,
    status: OrderStatus,
    conn: &mut SqliteConnection,
) -> Result<Order, MarketGatewayError> {
    sqlx::query(
        r#"
        INSERT INTO orders (order_id, customer_email, delivery_fee, total_amount, payment_method, payment_status,
                            status, delivery_status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'not_assigned')
        "#,
    )
    .bind(oid)
    .bind(customer_email)
    .bind(delivery_fee)
    .bind(total_amount)
    .bind(payment_method)
    .bind(payment_status)
    .bind(status)
    .execute(&mut *conn)
    .await?;
    fetch_order(oid, conn).await?.ok_or_else(|| MarketGatewayError::not_found(oid))
}

pub async fn order_exists(oid: &OrderId, conn: &mut SqliteConnection) -> Result<bool, MarketGatewayError> {
    let exists: Option<i64> =
        sqlx::query_scalar("SELECT id FROM orders WHERE order_id = $1").bind(oid).fetch_optional(&mut *conn).await?;
    Ok(exists.is_some())
}

pub async fn fetch_order(oid: &OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, MarketGatewayError> {
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1"))
        .bind(oid)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(order)
}

pub async fn insert_order_item(
    oid: &OrderId,
    design_id: i64,
    designer_email: &str,
    item_name: &str,
    quantity: i64,
    unit_price: Money,
    conn: &mut SqliteConnection,
) -> Result<OrderItem, MarketGatewayError> {
    let subtotal = unit_price * quantity;
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO order_items (order_id, design_id, designer_email, item_name, quantity, unit_price, subtotal)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(oid)
    .bind(design_id)
    .bind(designer_email)
    .bind(item_name)
    .bind(quantity)
    .bind(unit_price)
    .bind(subtotal)
    .fetch_one(&mut *conn)
    .await?;
    Ok(OrderItem {
        id,
        order_id: oid.clone(),
        design_id,
        designer_email: designer_email.to_string(),
        item_name: item_name.to_string(),
        quantity,
        unit_price,
        subtotal,
    })
}

pub async fn fetch_order_items(
    oid: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderItem>, MarketGatewayError> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, design_id, designer_email, item_name, quantity, unit_price, subtotal \
         FROM order_items WHERE order_id = $1 ORDER BY id ASC",
    )
    .bind(oid)
    .fetch_all(&mut *conn)
    .await?;
    Ok(items)
}

pub async fn update_order_status(
    oid: &OrderId,
    status: OrderStatus,
    conn: &mut SqliteConnection,
) -> Result<(), MarketGatewayError> {
    sqlx::query("UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE order_id = $2")
        .bind(status)
        .bind(oid)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn update_delivery_status(
    oid: &OrderId,
    delivery_status: DeliveryStatus,
    conn: &mut SqliteConnection,
) -> Result<(), MarketGatewayError> {
    sqlx::query("UPDATE orders SET delivery_status = $1, updated_at = CURRENT_TIMESTAMP WHERE order_id = $2")
        .bind(delivery_status)
        .bind(oid)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn mark_cash_collected(oid: &OrderId, conn: &mut SqliteConnection) -> Result<(), MarketGatewayError> {
    sqlx::query(
        "UPDATE orders SET cash_collected = 1, payment_status = 'paid', updated_at = CURRENT_TIMESTAMP \
         WHERE order_id = $1",
    )
    .bind(oid)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn mark_order_paid(oid: &OrderId, conn: &mut SqliteConnection) -> Result<(), MarketGatewayError> {
    sqlx::query(
        "UPDATE orders SET payment_status = 'paid', status = 'confirmed', updated_at = CURRENT_TIMESTAMP \
         WHERE order_id = $1",
    )
    .bind(oid)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn mark_payment_failed(oid: &OrderId, conn: &mut SqliteConnection) -> Result<(), MarketGatewayError> {
    sqlx::query("UPDATE orders SET payment_status = 'failed', updated_at = CURRENT_TIMESTAMP WHERE order_id = $1")
        .bind(oid)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn set_bank_slip_url(
    oid: &OrderId,
    url: &str,
    conn: &mut SqliteConnection,
) -> Result<(), MarketGatewayError> {
    sqlx::query("UPDATE orders SET bank_slip_url = $1, updated_at = CURRENT_TIMESTAMP WHERE order_id = $2")
        .bind(url)
        .bind(oid)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Orders in one of the courier dashboard buckets, oldest first.
pub async fn fetch_orders_in_section(
    section: DeliverySection,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, MarketGatewayError> {
    let statuses =
        section.delivery_statuses().iter().map(|s| format!("'{s}'")).collect::<Vec<_>>().join(",");
    let sql = format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE delivery_status IN ({statuses}) AND status != 'cancelled' \
         ORDER BY created_at ASC"
    );
    trace!("🗃️ Executing query: {sql}");
    let orders = sqlx::query_as::<_, Order>(&sql).fetch_all(&mut *conn).await?;
    Ok(orders)
}

pub async fn fetch_orders_for_customer(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, MarketGatewayError> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_email = $1 ORDER BY created_at DESC"
    ))
    .bind(email)
    .fetch_all(&mut *conn)
    .await?;
    Ok(orders)
}

/// A designer's sold line items with the ledger entry (if any) attached. Bank-transfer orders only grow a ledger
/// row once the slip is approved, hence the LEFT JOIN.
pub async fn fetch_designer_order_lines(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<DesignerOrderLine>, MarketGatewayError> {
    let lines = sqlx::query_as::<_, DesignerOrderLine>(
        r#"
        SELECT
            i.order_id            AS order_id,
            i.id                  AS order_item_id,
            i.design_id           AS design_id,
            i.item_name           AS item_name,
            i.quantity            AS quantity,
            i.unit_price          AS unit_price,
            i.subtotal            AS subtotal,
            o.status              AS order_status,
            o.delivery_status     AS delivery_status,
            o.payment_method      AS payment_method,
            o.created_at          AS ordered_at,
            p.designer_amount     AS designer_amount,
            p.released            AS released
        FROM order_items i
        JOIN orders o ON o.order_id = i.order_id
        LEFT JOIN designer_payments p ON p.order_id = i.order_id AND p.order_item_id = i.id
        WHERE i.designer_email = $1 AND o.status != 'cancelled'
        ORDER BY o.created_at DESC, i.id ASC
        "#,
    )
    .bind(email)
    .fetch_all(&mut *conn)
    .await?;
    Ok(lines)
}
