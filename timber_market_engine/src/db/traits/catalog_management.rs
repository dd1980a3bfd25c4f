use crate::{
    db::traits::MarketGatewayError,
    db_types::{Design, DesignUpdate, NewDesign, NewStockItem, StockItem},
};

/// Marketplace listings and the raw-material inventory.
///
/// Listing mutations are what feed the `designUpdated` event stream; the API layer publishes after the change
/// commits, using the rows returned here.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    async fn insert_design(&self, design: NewDesign) -> Result<Design, MarketGatewayError>;

    /// Applies a partial edit to a listing and returns the updated row. An empty update is a validation error.
    async fn update_design(&self, design_id: i64, update: DesignUpdate) -> Result<Design, MarketGatewayError>;

    async fn fetch_design(&self, design_id: i64) -> Result<Option<Design>, MarketGatewayError>;

    async fn fetch_designs(&self) -> Result<Vec<Design>, MarketGatewayError>;

    /// Creates the stock line, or tops up quantity and price if the physical spec already exists.
    async fn upsert_stock_item(&self, item: NewStockItem) -> Result<StockItem, MarketGatewayError>;

    /// Adjusts available quantity by a signed delta. Going below zero is a conflict, not a clamp.
    async fn adjust_stock_quantity(&self, stock_id: i64, delta: i64) -> Result<StockItem, MarketGatewayError>;

    /// Inventory team releases raw material to a staff designer: a conditional decrement that conflicts when
    /// there is not enough on hand.
    async fn release_stock(&self, stock_id: i64, quantity: i64) -> Result<StockItem, MarketGatewayError>;

    async fn stock_items(&self) -> Result<Vec<StockItem>, MarketGatewayError>;

    /// Lines at or below their reorder level.
    async fn low_stock_items(&self) -> Result<Vec<StockItem>, MarketGatewayError>;
}
