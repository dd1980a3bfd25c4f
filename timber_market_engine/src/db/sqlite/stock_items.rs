use sqlx::SqliteConnection;

use crate::{
    db::traits::MarketGatewayError,
    db_types::{NewStockItem, StockItem},
};

const STOCK_COLUMNS: &str = "id, material, board_size, board_thickness, board_color, price, available_quantity, \
                             reorder_level, created_at, updated_at";

/// Creates the stock line, or tops up an existing line with the same physical spec.
pub async fn upsert(item: NewStockItem, conn: &mut SqliteConnection) -> Result<StockItem, MarketGatewayError> {
    if item.available_quantity < 0 {
        return Err(MarketGatewayError::validation("Stock quantity cannot be negative"));
    }
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO stock_items (material, board_size, board_thickness, board_color, price, available_quantity,
                                 reorder_level)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (material, board_size, board_thickness, board_color)
        DO UPDATE SET available_quantity = available_quantity + excluded.available_quantity,
                      price = excluded.price,
                      updated_at = CURRENT_TIMESTAMP
        RETURNING id
        "#,
    )
    .bind(&item.material)
    .bind(&item.board_size)
    .bind(&item.board_thickness)
    .bind(&item.board_color)
    .bind(item.price)
    .bind(item.available_quantity)
    .bind(item.reorder_level)
    .fetch_one(&mut *conn)
    .await?;
    fetch_item(id, conn).await?.ok_or_else(|| MarketGatewayError::not_found(format!("Stock item {id}")))
}

pub async fn fetch_item(stock_id: i64, conn: &mut SqliteConnection) -> Result<Option<StockItem>, MarketGatewayError> {
    let item = sqlx::query_as::<_, StockItem>(&format!("SELECT {STOCK_COLUMNS} FROM stock_items WHERE id = $1"))
        .bind(stock_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(item)
}

/// Signed adjustment. Draining below zero is a conflict; the conditional update never clamps.
pub async fn adjust_quantity(
    stock_id: i64,
    delta: i64,
    conn: &mut SqliteConnection,
) -> Result<StockItem, MarketGatewayError> {
    let res = sqlx::query(
        "UPDATE stock_items SET available_quantity = available_quantity + $1, updated_at = CURRENT_TIMESTAMP \
         WHERE id = $2 AND available_quantity + $1 >= 0",
    )
    .bind(delta)
    .bind(stock_id)
    .execute(&mut *conn)
    .await?;
    if res.rows_affected() == 0 {
        return match fetch_item(stock_id, conn).await? {
            Some(item) => Err(MarketGatewayError::conflict(format!(
                "Cannot adjust stock item {stock_id} by {delta}: only {} available",
                item.available_quantity
            ))),
            None => Err(MarketGatewayError::not_found(format!("Stock item {stock_id}"))),
        };
    }
    fetch_item(stock_id, conn).await?.ok_or_else(|| MarketGatewayError::not_found(format!("Stock item {stock_id}")))
}

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<StockItem>, MarketGatewayError> {
    let items = sqlx::query_as::<_, StockItem>(&format!(
        "SELECT {STOCK_COLUMNS} FROM stock_items ORDER BY material, board_size"
    ))
    .fetch_all(&mut *conn)
    .await?;
    Ok(items)
}

pub async fn fetch_low_stock(conn: &mut SqliteConnection) -> Result<Vec<StockItem>, MarketGatewayError> {
    let items = sqlx::query_as::<_, StockItem>(&format!(
        "SELECT {STOCK_COLUMNS} FROM stock_items WHERE available_quantity <= reorder_level \
         ORDER BY available_quantity ASC"
    ))
    .fetch_all(&mut *conn)
    .await?;
    Ok(items)
}
