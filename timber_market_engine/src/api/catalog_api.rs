//! API for the design catalogue and raw timber stock.

use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::{CatalogManagement, MarketGatewayError},
    db_types::{Design, DesignUpdate, NewDesign, NewStockItem, StockItem},
    events::{DesignUpdatedEvent, EventProducers},
};

pub struct CatalogApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }

    pub async fn add_design(&self, design: NewDesign) -> Result<Design, MarketGatewayError> {
        let design = self.db.insert_design(design).await?;
        info!("🔄️🪵️ Design #{} ({}) listed by {}", design.id, design.item_name, design.designer_email);
        self.publish_design_updated(&design).await;
        Ok(design)
    }

    /// Applies a partial edit to a listing and notifies storefront subscribers.
    pub async fn update_design(&self, design_id: i64, update: DesignUpdate) -> Result<Design, MarketGatewayError> {
        let design = self.db.update_design(design_id, update).await?;
        self.publish_design_updated(&design).await;
        Ok(design)
    }

    pub async fn design(&self, design_id: i64) -> Result<Option<Design>, MarketGatewayError> {
        self.db.fetch_design(design_id).await
    }

    pub async fn designs(&self) -> Result<Vec<Design>, MarketGatewayError> {
        self.db.fetch_designs().await
    }

    /// Creates a raw stock line, or tops up an existing line with the same physical spec.
    pub async fn upsert_stock_item(&self, item: NewStockItem) -> Result<StockItem, MarketGatewayError> {
        self.db.upsert_stock_item(item).await
    }

    pub async fn adjust_stock_quantity(&self, stock_id: i64, delta: i64) -> Result<StockItem, MarketGatewayError> {
        self.db.adjust_stock_quantity(stock_id, delta).await
    }

    /// Consumes raw stock for production. Draining below zero is a conflict.
    pub async fn release_stock(&self, stock_id: i64, quantity: i64) -> Result<StockItem, MarketGatewayError> {
        self.db.release_stock(stock_id, quantity).await
    }

    pub async fn stock_items(&self) -> Result<Vec<StockItem>, MarketGatewayError> {
        self.db.stock_items().await
    }

    pub async fn low_stock_items(&self) -> Result<Vec<StockItem>, MarketGatewayError> {
        self.db.low_stock_items().await
    }

    async fn publish_design_updated(&self, design: &Design) {
        for emitter in &self.producers.design_updated_producer {
            trace!("🔄️🪵️ Notifying design updated hook subscribers");
            emitter.publish_event(DesignUpdatedEvent::from(design)).await;
        }
    }
}
