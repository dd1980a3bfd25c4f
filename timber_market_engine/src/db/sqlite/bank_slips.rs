use sqlx::SqliteConnection;

use crate::{
    db::traits::MarketGatewayError,
    db_types::{BankSlip, BankSlipStatus, OrderId},
};

const SLIP_COLUMNS: &str = "id, order_id, slip_path, status, created_at, updated_at";

pub async fn insert_slip(
    oid: &OrderId,
    slip_path: &str,
    conn: &mut SqliteConnection,
) -> Result<BankSlip, MarketGatewayError> {
    let id: i64 = sqlx::query_scalar("INSERT INTO bank_slips (order_id, slip_path) VALUES ($1, $2) RETURNING id")
        .bind(oid)
        .bind(slip_path)
        .fetch_one(&mut *conn)
        .await?;
    fetch_slip(id, conn).await?.ok_or_else(|| MarketGatewayError::not_found(format!("Bank slip {id}")))
}

pub async fn fetch_slip(slip_id: i64, conn: &mut SqliteConnection) -> Result<Option<BankSlip>, MarketGatewayError> {
    let slip = sqlx::query_as::<_, BankSlip>(&format!("SELECT {SLIP_COLUMNS} FROM bank_slips WHERE id = $1"))
        .bind(slip_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(slip)
}

pub async fn update_status(
    slip_id: i64,
    status: BankSlipStatus,
    conn: &mut SqliteConnection,
) -> Result<(), MarketGatewayError> {
    sqlx::query("UPDATE bank_slips SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2")
        .bind(status)
        .bind(slip_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
