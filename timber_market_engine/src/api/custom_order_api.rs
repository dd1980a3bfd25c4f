//! API for bespoke commission requests.
//!
//! Custom orders run on their own lifecycle (pending → accepted → in progress → completed) before joining the same
//! delivery pipeline as catalogue orders. There is no stock reservation and no designer-payment ledger: the price
//! is negotiated per piece.

use std::fmt::Debug;

use log::*;
use tmg_common::Money;

use crate::{
    api::order_objects::DeliverySection,
    db::traits::{CustomOrderManagement, MarketGatewayError},
    db_types::{CustomOrder, CustomOrderStatus, DeliveryStatus, NewCustomOrder, OrderId},
    helpers::new_custom_order_id,
};

pub struct CustomOrderApi<B> {
    db: B,
}

impl<B: Debug> Debug for CustomOrderApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CustomOrderApi ({:?})", self.db)
    }
}

impl<B> CustomOrderApi<B>
where B: CustomOrderManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn submit_request(&self, request: NewCustomOrder) -> Result<CustomOrder, MarketGatewayError> {
        let oid = new_custom_order_id();
        let order = self.db.create_custom_order(oid, request).await?;
        debug!("🔄️🪵️ Custom order [{}] submitted by {}", order.order_id, order.customer_email);
        Ok(order)
    }

    pub async fn order_by_order_id(&self, oid: &OrderId) -> Result<Option<CustomOrder>, MarketGatewayError> {
        self.db.custom_order_by_order_id(oid).await
    }

    /// Accepts a pending request and fixes the final quoted price.
    pub async fn accept(&self, oid: &OrderId, final_price: Money) -> Result<CustomOrder, MarketGatewayError> {
        self.db.accept_custom_order(oid, final_price).await
    }

    pub async fn update_status(
        &self,
        oid: &OrderId,
        new: CustomOrderStatus,
    ) -> Result<CustomOrder, MarketGatewayError> {
        self.db.update_custom_order_status(oid, new).await
    }

    pub async fn notify_delivery(&self, oid: &OrderId) -> Result<CustomOrder, MarketGatewayError> {
        self.db.notify_custom_delivery(oid).await
    }

    pub async fn advance_delivery_status(
        &self,
        oid: &OrderId,
        new: DeliveryStatus,
    ) -> Result<CustomOrder, MarketGatewayError> {
        self.db.advance_custom_delivery_status(oid, new).await
    }

    pub async fn collect_cash(&self, oid: &OrderId) -> Result<CustomOrder, MarketGatewayError> {
        self.db.collect_custom_cash(oid).await
    }

    pub async fn orders_in_delivery_section(
        &self,
        section: DeliverySection,
    ) -> Result<Vec<CustomOrder>, MarketGatewayError> {
        self.db.custom_orders_in_delivery_section(section).await
    }

    pub async fn orders_for_customer(&self, email: &str) -> Result<Vec<CustomOrder>, MarketGatewayError> {
        self.db.custom_orders_for_customer(email).await
    }
}
