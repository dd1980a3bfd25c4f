use crate::{
    api::order_objects::{DeliverySection, DesignerOrderLine},
    db::traits::MarketGatewayError,
    db_types::{Order, OrderId, OrderWithItems},
};

/// The read side for marketplace orders.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    async fn order_by_order_id(&self, oid: &OrderId) -> Result<Option<Order>, MarketGatewayError>;

    async fn order_with_items(&self, oid: &OrderId) -> Result<Option<OrderWithItems>, MarketGatewayError>;

    /// Orders in one of the three courier buckets: ready for pickup, out for delivery, completed.
    async fn orders_in_delivery_section(
        &self,
        section: DeliverySection,
    ) -> Result<Vec<OrderWithItems>, MarketGatewayError>;

    async fn orders_for_customer(&self, email: &str) -> Result<Vec<OrderWithItems>, MarketGatewayError>;

    /// A designer's sold line items, joined with their ledger entries so the view can show per-item earnings and
    /// release state.
    async fn orders_for_designer(&self, email: &str) -> Result<Vec<DesignerOrderLine>, MarketGatewayError>;
}
