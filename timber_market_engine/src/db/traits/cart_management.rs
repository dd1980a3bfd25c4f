use crate::{db::traits::MarketGatewayError, db_types::CartLine};

/// Per-customer cart storage, keyed `(user_email, design_id)`. Quantities are only validated against available
/// stock at order placement, not here. Every mutation returns the full cart so the UI can re-render in one shot.
#[allow(async_fn_in_trait)]
pub trait CartManagement {
    /// Upsert: adding a design already in the cart sums the quantities.
    async fn add_to_cart(
        &self,
        email: &str,
        design_id: i64,
        quantity: i64,
    ) -> Result<Vec<CartLine>, MarketGatewayError>;

    /// Sets the quantity outright. A quantity of zero removes the line.
    async fn update_cart_item(
        &self,
        email: &str,
        design_id: i64,
        quantity: i64,
    ) -> Result<Vec<CartLine>, MarketGatewayError>;

    async fn remove_from_cart(&self, email: &str, design_id: i64) -> Result<Vec<CartLine>, MarketGatewayError>;

    async fn clear_cart(&self, email: &str) -> Result<(), MarketGatewayError>;

    async fn fetch_cart(&self, email: &str) -> Result<Vec<CartLine>, MarketGatewayError>;
}
