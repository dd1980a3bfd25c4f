use sqlx::SqliteConnection;

use crate::{db::traits::MarketGatewayError, db_types::CartLine};

/// Adds to the cart, summing quantities when the design is already there.
pub async fn add_item(
    email: &str,
    design_id: i64,
    quantity: i64,
    conn: &mut SqliteConnection,
) -> Result<(), MarketGatewayError> {
    sqlx::query(
        r#"
        INSERT INTO cart_items (user_email, design_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_email, design_id)
        DO UPDATE SET quantity = quantity + excluded.quantity, updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(email)
    .bind(design_id)
    .bind(quantity)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Sets the quantity outright; zero removes the line.
pub async fn set_item_quantity(
    email: &str,
    design_id: i64,
    quantity: i64,
    conn: &mut SqliteConnection,
) -> Result<(), MarketGatewayError> {
    if quantity == 0 {
        return remove_item(email, design_id, conn).await;
    }
    sqlx::query(
        r#"
        INSERT INTO cart_items (user_email, design_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_email, design_id)
        DO UPDATE SET quantity = excluded.quantity, updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(email)
    .bind(design_id)
    .bind(quantity)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn remove_item(
    email: &str,
    design_id: i64,
    conn: &mut SqliteConnection,
) -> Result<(), MarketGatewayError> {
    sqlx::query("DELETE FROM cart_items WHERE user_email = $1 AND design_id = $2")
        .bind(email)
        .bind(design_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn clear(email: &str, conn: &mut SqliteConnection) -> Result<(), MarketGatewayError> {
    sqlx::query("DELETE FROM cart_items WHERE user_email = $1").bind(email).execute(&mut *conn).await?;
    Ok(())
}

pub async fn fetch_cart(email: &str, conn: &mut SqliteConnection) -> Result<Vec<CartLine>, MarketGatewayError> {
    let lines = sqlx::query_as::<_, CartLine>(
        r#"
        SELECT
            c.user_email AS user_email,
            c.design_id  AS design_id,
            c.quantity   AS quantity,
            d.item_name  AS item_name,
            d.price      AS unit_price,
            d.quantity   AS available_quantity
        FROM cart_items c
        JOIN designs d ON d.id = c.design_id
        WHERE c.user_email = $1
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(email)
    .fetch_all(&mut *conn)
    .await?;
    Ok(lines)
}
