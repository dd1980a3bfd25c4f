use log::trace;
use sqlx::SqliteConnection;
use tmg_common::Money;

use crate::{
    api::order_objects::DeliverySection,
    db::traits::MarketGatewayError,
    db_types::{CustomOrder, CustomOrderStatus, DeliveryStatus, NewCustomOrder, OrderId},
};

const CUSTOM_ORDER_COLUMNS: &str = "id, order_id, customer_email, material, board_color, board_size, \
                                    board_thickness, description, reference_image_path, estimated_price, \
                                    final_price, status, payment_method, payment_status, delivery_status, \
                                    cash_collected, created_at, updated_at";

pub async fn insert_custom_order(
    oid: &OrderId,
    order: NewCustomOrder,
    conn: &mut SqliteConnection,
) -> Result<CustomOrder, MarketGatewayError> {
    sqlx::query(
        r#"
        INSERT INTO custom_orders (order_id, customer_email, material, board_color, board_size, board_thickness,
                                   description, reference_image_path, estimated_price, payment_method)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(oid)
    .bind(&order.customer_email)
    .bind(&order.material)
    .bind(&order.board_color)
    .bind(&order.board_size)
    .bind(&order.board_thickness)
    .bind(&order.description)
    .bind(&order.reference_image_path)
    .bind(order.estimated_price)
    .bind(order.payment_method)
    .execute(&mut *conn)
    .await?;
    fetch_custom_order(oid, conn).await?.ok_or_else(|| MarketGatewayError::not_found(oid))
}

pub async fn fetch_custom_order(
    oid: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<CustomOrder>, MarketGatewayError> {
    let order = sqlx::query_as::<_, CustomOrder>(&format!(
        "SELECT {CUSTOM_ORDER_COLUMNS} FROM custom_orders WHERE order_id = $1"
    ))
    .bind(oid)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(order)
}

pub async fn update_status(
    oid: &OrderId,
    status: CustomOrderStatus,
    conn: &mut SqliteConnection,
) -> Result<(), MarketGatewayError> {
    sqlx::query("UPDATE custom_orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE order_id = $2")
        .bind(status)
        .bind(oid)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn accept_with_price(
    oid: &OrderId,
    final_price: Money,
    conn: &mut SqliteConnection,
) -> Result<(), MarketGatewayError> {
    sqlx::query(
        "UPDATE custom_orders SET status = 'accepted', final_price = $1, updated_at = CURRENT_TIMESTAMP \
         WHERE order_id = $2",
    )
    .bind(final_price)
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
    sqlx::query("UPDATE custom_orders SET delivery_status = $1, updated_at = CURRENT_TIMESTAMP WHERE order_id = $2")
        .bind(delivery_status)
        .bind(oid)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn mark_cash_collected(oid: &OrderId, conn: &mut SqliteConnection) -> Result<(), MarketGatewayError> {
    sqlx::query(
        "UPDATE custom_orders SET cash_collected = 1, payment_status = 'paid', updated_at = CURRENT_TIMESTAMP \
         WHERE order_id = $1",
    )
    .bind(oid)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn fetch_in_section(
    section: DeliverySection,
    conn: &mut SqliteConnection,
) -> Result<Vec<CustomOrder>, MarketGatewayError> {
    let statuses = section.delivery_statuses().iter().map(|s| format!("'{s}'")).collect::<Vec<_>>().join(",");
    let sql = format!(
        "SELECT {CUSTOM_ORDER_COLUMNS} FROM custom_orders WHERE delivery_status IN ({statuses}) \
         AND status != 'cancelled' ORDER BY created_at ASC"
    );
    trace!("🗃️ Executing query: {sql}");
    let orders = sqlx::query_as::<_, CustomOrder>(&sql).fetch_all(&mut *conn).await?;
    Ok(orders)
}

pub async fn fetch_for_customer(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<CustomOrder>, MarketGatewayError> {
    let orders = sqlx::query_as::<_, CustomOrder>(&format!(
        "SELECT {CUSTOM_ORDER_COLUMNS} FROM custom_orders WHERE customer_email = $1 ORDER BY created_at DESC"
    ))
    .bind(email)
    .fetch_all(&mut *conn)
    .await?;
    Ok(orders)
}
