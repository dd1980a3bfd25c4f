use log::trace;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db::traits::MarketGatewayError,
    db_types::{Design, DesignUpdate, NewDesign},
};

const DESIGN_COLUMNS: &str = "id, designer_email, item_name, description, material, board_size, board_color, \
                              board_thickness, price, quantity, reorder_level, created_at, updated_at";

pub async fn insert_design(design: NewDesign, conn: &mut SqliteConnection) -> Result<Design, MarketGatewayError> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO designs (designer_email, item_name, description, material, board_size, board_color,
                             board_thickness, price, quantity, reorder_level)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id
        "#,
    )
    .bind(&design.designer_email)
    .bind(&design.item_name)
    .bind(&design.description)
    .bind(&design.material)
    .bind(&design.board_size)
    .bind(&design.board_color)
    .bind(&design.board_thickness)
    .bind(design.price)
    .bind(design.quantity)
    .bind(design.reorder_level)
    .fetch_one(&mut *conn)
    .await?;
    fetch_design(id, conn).await?.ok_or_else(|| MarketGatewayError::not_found(format!("Design {id}")))
}

pub async fn fetch_design(design_id: i64, conn: &mut SqliteConnection) -> Result<Option<Design>, MarketGatewayError> {
    let design = sqlx::query_as::<_, Design>(&format!("SELECT {DESIGN_COLUMNS} FROM designs WHERE id = $1"))
        .bind(design_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(design)
}

pub async fn fetch_designs(conn: &mut SqliteConnection) -> Result<Vec<Design>, MarketGatewayError> {
    let designs = sqlx::query_as::<_, Design>(&format!("SELECT {DESIGN_COLUMNS} FROM designs ORDER BY created_at ASC"))
        .fetch_all(&mut *conn)
        .await?;
    Ok(designs)
}

/// Applies a partial edit to a listing. Callers are responsible for publishing the resulting design update event
/// after their transaction commits.
pub async fn update_design(
    design_id: i64,
    update: DesignUpdate,
    conn: &mut SqliteConnection,
) -> Result<Design, MarketGatewayError> {
    if update.is_empty() {
        return Err(MarketGatewayError::validation("No fields to update"));
    }
    if let Some(q) = update.quantity {
        if q < 0 {
            return Err(MarketGatewayError::validation("Quantity cannot be negative"));
        }
    }
    let mut builder = QueryBuilder::new("UPDATE designs SET updated_at = CURRENT_TIMESTAMP,");
    let mut set_clause = builder.separated(", ");
    if let Some(item_name) = update.item_name {
        set_clause.push("item_name = ");
        set_clause.push_bind_unseparated(item_name);
    }
    if let Some(description) = update.description {
        set_clause.push("description = ");
        set_clause.push_bind_unseparated(description);
    }
    if let Some(price) = update.price {
        set_clause.push("price = ");
        set_clause.push_bind_unseparated(price);
    }
    if let Some(quantity) = update.quantity {
        set_clause.push("quantity = ");
        set_clause.push_bind_unseparated(quantity);
    }
    if let Some(reorder_level) = update.reorder_level {
        set_clause.push("reorder_level = ");
        set_clause.push_bind_unseparated(reorder_level);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(design_id);
    trace!("🗃️ Executing query: {}", builder.sql());
    let res = builder.build().execute(&mut *conn).await?;
    if res.rows_affected() == 0 {
        return Err(MarketGatewayError::not_found(format!("Design {design_id}")));
    }
    fetch_design(design_id, conn).await?.ok_or_else(|| MarketGatewayError::not_found(format!("Design {design_id}")))
}

/// The stock-reservation guard: a compare-and-decrement in a single statement. Returns false when the design does
/// not have `quantity` units available, without touching the row. Run inside the order-creation transaction so a
/// failed sibling item rolls this back too.
pub async fn reserve_quantity(
    design_id: i64,
    quantity: i64,
    conn: &mut SqliteConnection,
) -> Result<bool, MarketGatewayError> {
    let res = sqlx::query(
        "UPDATE designs SET quantity = quantity - $1, updated_at = CURRENT_TIMESTAMP \
         WHERE id = $2 AND quantity >= $1",
    )
    .bind(quantity)
    .bind(design_id)
    .execute(&mut *conn)
    .await?;
    Ok(res.rows_affected() == 1)
}

/// Restores previously reserved units on cancellation.
pub async fn restore_quantity(
    design_id: i64,
    quantity: i64,
    conn: &mut SqliteConnection,
) -> Result<(), MarketGatewayError> {
    sqlx::query("UPDATE designs SET quantity = quantity + $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2")
        .bind(quantity)
        .bind(design_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
