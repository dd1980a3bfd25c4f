use log::debug;
use sqlx::SqliteConnection;
use tmg_common::CommissionRate;

use crate::{
    db::traits::MarketGatewayError,
    db_types::{LedgerEntry, OrderId, OrderItem},
};

const LEDGER_COLUMNS: &str = "id, order_id, order_item_id, design_id, designer_email, item_name, quantity, \
                              item_price, commission, designer_amount, released, released_at, created_at";

/// Inserts one unreleased ledger row per order item. The `ON CONFLICT DO NOTHING` on the
/// `(order_id, order_item_id)` unique index is what makes ledger creation idempotent: re-recording an order's
/// entries is a no-op, never a duplicate and never an error.
pub async fn insert_entries_for_items(
    items: &[OrderItem],
    rate: CommissionRate,
    conn: &mut SqliteConnection,
) -> Result<(), MarketGatewayError> {
    for item in items {
        let (commission, designer_amount) = rate.split(item.subtotal);
        let res = sqlx::query(
            r#"
            INSERT INTO designer_payments (order_id, order_item_id, design_id, designer_email, item_name, quantity,
                                           item_price, commission, designer_amount, released)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0)
            ON CONFLICT (order_id, order_item_id) DO NOTHING
            "#,
        )
        .bind(&item.order_id)
        .bind(item.id)
        .bind(item.design_id)
        .bind(&item.designer_email)
        .bind(&item.item_name)
        .bind(item.quantity)
        .bind(item.subtotal)
        .bind(commission)
        .bind(designer_amount)
        .execute(&mut *conn)
        .await?;
        if res.rows_affected() == 0 {
            debug!("🧾️ Ledger entry for {} item {} already recorded. Skipping.", item.order_id, item.id);
        }
    }
    Ok(())
}

pub async fn fetch_entries_for_order(
    oid: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Vec<LedgerEntry>, MarketGatewayError> {
    let entries = sqlx::query_as::<_, LedgerEntry>(&format!(
        "SELECT {LEDGER_COLUMNS} FROM designer_payments WHERE order_id = $1 ORDER BY order_item_id ASC"
    ))
    .bind(oid)
    .fetch_all(&mut *conn)
    .await?;
    Ok(entries)
}

pub async fn fetch_entry(
    oid: &OrderId,
    order_item_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<LedgerEntry>, MarketGatewayError> {
    let entry = sqlx::query_as::<_, LedgerEntry>(&format!(
        "SELECT {LEDGER_COLUMNS} FROM designer_payments WHERE order_id = $1 AND order_item_id = $2"
    ))
    .bind(oid)
    .bind(order_item_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(entry)
}

/// The one-shot release toggle. The `released = 0` predicate means a concurrent double release can only ever
/// flip the row once; the loser sees zero affected rows.
pub async fn mark_released(
    oid: &OrderId,
    order_item_id: i64,
    conn: &mut SqliteConnection,
) -> Result<bool, MarketGatewayError> {
    let res = sqlx::query(
        "UPDATE designer_payments SET released = 1, released_at = CURRENT_TIMESTAMP \
         WHERE order_id = $1 AND order_item_id = $2 AND released = 0",
    )
    .bind(oid)
    .bind(order_item_id)
    .execute(&mut *conn)
    .await?;
    Ok(res.rows_affected() == 1)
}

/// Voids an order's unreleased ledger rows. Cancellation only reaches pre-delivery orders, so no released row
/// can exist yet; the `released = 0` predicate keeps a released payout on the books no matter what.
pub async fn delete_unreleased_entries(
    oid: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<u64, MarketGatewayError> {
    let res = sqlx::query("DELETE FROM designer_payments WHERE order_id = $1 AND released = 0")
        .bind(oid)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected())
}

pub async fn fetch_all_entries(conn: &mut SqliteConnection) -> Result<Vec<LedgerEntry>, MarketGatewayError> {
    let entries = sqlx::query_as::<_, LedgerEntry>(&format!(
        "SELECT {LEDGER_COLUMNS} FROM designer_payments ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(&mut *conn)
    .await?;
    Ok(entries)
}

pub async fn fetch_entries_for_designer(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<LedgerEntry>, MarketGatewayError> {
    let entries = sqlx::query_as::<_, LedgerEntry>(&format!(
        "SELECT {LEDGER_COLUMNS} FROM designer_payments WHERE designer_email = $1 ORDER BY created_at DESC, id DESC"
    ))
    .bind(email)
    .fetch_all(&mut *conn)
    .await?;
    Ok(entries)
}
