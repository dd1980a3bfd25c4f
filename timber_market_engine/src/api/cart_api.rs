//! Unified API for shopping carts.

use std::fmt::Debug;

use crate::{
    db::traits::{CartManagement, MarketGatewayError},
    db_types::CartLine,
};

/// Every mutation returns the refreshed cart so clients never need a follow-up fetch.
pub struct CartApi<B> {
    db: B,
}

impl<B: Debug> Debug for CartApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CartApi ({:?})", self.db)
    }
}

impl<B> CartApi<B>
where B: CartManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn add_item(
        &self,
        email: &str,
        design_id: i64,
        quantity: i64,
    ) -> Result<Vec<CartLine>, MarketGatewayError> {
        self.db.add_to_cart(email, design_id, quantity).await
    }

    pub async fn set_item_quantity(
        &self,
        email: &str,
        design_id: i64,
        quantity: i64,
    ) -> Result<Vec<CartLine>, MarketGatewayError> {
        self.db.update_cart_item(email, design_id, quantity).await
    }

    pub async fn remove_item(&self, email: &str, design_id: i64) -> Result<Vec<CartLine>, MarketGatewayError> {
        self.db.remove_from_cart(email, design_id).await
    }

    pub async fn clear(&self, email: &str) -> Result<(), MarketGatewayError> {
        self.db.clear_cart(email).await
    }

    pub async fn cart(&self, email: &str) -> Result<Vec<CartLine>, MarketGatewayError> {
        self.db.fetch_cart(email).await
    }
}
