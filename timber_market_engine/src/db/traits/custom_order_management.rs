use tmg_common::Money;

use crate::{
    api::order_objects::DeliverySection,
    db::traits::MarketGatewayError,
    db_types::{CustomOrder, CustomOrderStatus, DeliveryStatus, NewCustomOrder, OrderId},
};

/// The bespoke-order lifecycle: created by a customer, accepted and fulfilled by a staff designer, then handed to
/// the delivery flow. The same delivery sub-machine and cash-collection guard apply as for marketplace orders.
#[allow(async_fn_in_trait)]
pub trait CustomOrderManagement {
    async fn create_custom_order(
        &self,
        oid: OrderId,
        order: NewCustomOrder,
    ) -> Result<CustomOrder, MarketGatewayError>;

    async fn custom_order_by_order_id(&self, oid: &OrderId) -> Result<Option<CustomOrder>, MarketGatewayError>;

    /// Staff designer accepts the request and quotes the final price. Only legal from `pending`.
    async fn accept_custom_order(&self, oid: &OrderId, final_price: Money) -> Result<CustomOrder, MarketGatewayError>;

    /// Advances the staff-designer lifecycle per the custom-order transition table.
    async fn update_custom_order_status(
        &self,
        oid: &OrderId,
        new: CustomOrderStatus,
    ) -> Result<CustomOrder, MarketGatewayError>;

    /// Pushes a completed custom order into the delivery queue (`not_assigned` -> `assigned`).
    async fn notify_custom_delivery(&self, oid: &OrderId) -> Result<CustomOrder, MarketGatewayError>;

    async fn advance_custom_delivery_status(
        &self,
        oid: &OrderId,
        new: DeliveryStatus,
    ) -> Result<CustomOrder, MarketGatewayError>;

    async fn collect_custom_cash(&self, oid: &OrderId) -> Result<CustomOrder, MarketGatewayError>;

    async fn custom_orders_in_delivery_section(
        &self,
        section: DeliverySection,
    ) -> Result<Vec<CustomOrder>, MarketGatewayError>;

    async fn custom_orders_for_customer(&self, email: &str) -> Result<Vec<CustomOrder>, MarketGatewayError>;
}
