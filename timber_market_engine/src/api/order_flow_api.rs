use std::fmt::Debug;

use log::*;
use tmg_common::{CommissionRate, Money};

use crate::{
    api::order_objects::{DeliverySection, DesignerOrderLine},
    db::traits::{MarketGatewayDatabase, MarketGatewayError, OrderManagement},
    db_types::{
        BankSlip,
        DeliveryStatus,
        Design,
        NewOrder,
        NewOrderItem,
        Order,
        OrderId,
        OrderWithItems,
        PaymentMethod,
        PlacedOrder,
    },
    events::{DesignUpdatedEvent, EventProducers, OrderPaidEvent},
    helpers::new_order_id,
};

/// `OrderFlowApi` is the primary API for placing marketplace orders and driving them through payment, fulfilment
/// and delivery.
pub struct OrderFlowApi<B> {
    db: B,
    commission: CommissionRate,
    delivery_fee: Money,
    producers: EventProducers,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B, commission: CommissionRate, delivery_fee: Money, producers: EventProducers) -> Self {
        Self { db, commission, delivery_fee, producers }
    }

    pub fn commission(&self) -> CommissionRate {
        self.commission
    }

    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }
}

impl<B> OrderFlowApi<B>
where B: MarketGatewayDatabase
{
    /// Places a brand-new order for the given customer.
    ///
    /// Stock for every line item is reserved atomically; if any item is short, nothing is reserved and the error
    /// names every offending design. Cash-on-delivery orders are confirmed immediately and their designer ledger
    /// entries are recorded up front. Bank-transfer orders stay pending until the slip is approved.
    pub async fn place_order(
        &self,
        customer_email: &str,
        payment_method: PaymentMethod,
        items: Vec<NewOrderItem>,
    ) -> Result<PlacedOrder, MarketGatewayError> {
        let order = NewOrder {
            order_id: new_order_id(),
            customer_email: customer_email.to_string(),
            payment_method,
            delivery_fee: self.delivery_fee,
            items,
        };
        let ledger_rate = match payment_method {
            PaymentMethod::CashOnDelivery => Some(self.commission),
            PaymentMethod::BankTransfer => None,
        };
        let placed = self.db.create_order(order, ledger_rate).await?;
        self.call_design_updated_hook(&placed.stock_updates).await;
        if payment_method == PaymentMethod::CashOnDelivery {
            self.call_order_paid_hook(&placed.order).await;
        }
        debug!(
            "🔄️📦️ Order [{}] placed with {} items. Total: {}",
            placed.order.order_id,
            placed.items.len(),
            placed.order.total_amount
        );
        Ok(placed)
    }

    /// Cancels an order and restores its reserved stock. Terminal orders cannot be cancelled.
    pub async fn cancel_order(&self, oid: &OrderId) -> Result<Order, MarketGatewayError> {
        let (order, restored) = self.db.cancel_order(oid).await?;
        self.call_design_updated_hook(&restored).await;
        info!("🔄️❌️ Order [{oid}] cancelled");
        Ok(order)
    }

    pub async fn start_preparing(&self, oid: &OrderId) -> Result<Order, MarketGatewayError> {
        self.db.start_preparing(oid).await
    }

    /// Marks the order ready for delivery and hands it to the courier queue in one step.
    pub async fn notify_delivery(&self, oid: &OrderId) -> Result<Order, MarketGatewayError> {
        self.db.notify_delivery(oid).await
    }

    pub async fn advance_delivery_status(
        &self,
        oid: &OrderId,
        new: DeliveryStatus,
    ) -> Result<Order, MarketGatewayError> {
        self.db.advance_delivery_status(oid, new).await
    }

    /// Records the courier's cash collection for a cash-on-delivery order. Until this happens, the order cannot be
    /// marked delivered.
    pub async fn collect_cash(&self, oid: &OrderId) -> Result<Order, MarketGatewayError> {
        let order = self.db.collect_cash(oid).await?;
        self.call_order_paid_hook(&order).await;
        Ok(order)
    }

    pub async fn attach_bank_slip(&self, oid: &OrderId, slip_path: &str) -> Result<BankSlip, MarketGatewayError> {
        self.db.attach_bank_slip(oid, slip_path).await
    }

    /// Approves or rejects an uploaded bank slip. Approval marks the order paid and confirmed, and records the
    /// designer ledger entries at the configured commission rate.
    pub async fn decide_bank_slip(
        &self,
        slip_id: i64,
        approve: bool,
    ) -> Result<(BankSlip, Order), MarketGatewayError> {
        let (slip, order) = self.db.decide_bank_slip(slip_id, approve, self.commission).await?;
        if approve {
            self.call_order_paid_hook(&order).await;
        }
        Ok((slip, order))
    }

    async fn call_design_updated_hook(&self, designs: &[Design]) {
        for emitter in &self.producers.design_updated_producer {
            trace!("🔄️📦️ Notifying design updated hook subscribers");
            for design in designs {
                emitter.publish_event(DesignUpdatedEvent::from(design)).await;
            }
        }
    }

    async fn call_order_paid_hook(&self, order: &Order) {
        for emitter in &self.producers.order_paid_producer {
            trace!("🔄️💰️ Notifying order paid hook subscribers");
            emitter.publish_event(OrderPaidEvent::new(order.clone())).await;
        }
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement
{
    pub async fn order_by_order_id(&self, oid: &OrderId) -> Result<Option<Order>, MarketGatewayError> {
        self.db.order_by_order_id(oid).await
    }

    pub async fn order_with_items(&self, oid: &OrderId) -> Result<Option<OrderWithItems>, MarketGatewayError> {
        self.db.order_with_items(oid).await
    }

    pub async fn orders_in_delivery_section(
        &self,
        section: DeliverySection,
    ) -> Result<Vec<OrderWithItems>, MarketGatewayError> {
        self.db.orders_in_delivery_section(section).await
    }

    pub async fn orders_for_customer(&self, email: &str) -> Result<Vec<OrderWithItems>, MarketGatewayError> {
        self.db.orders_for_customer(email).await
    }

    pub async fn orders_for_designer(&self, email: &str) -> Result<Vec<DesignerOrderLine>, MarketGatewayError> {
        self.db.orders_for_designer(email).await
    }
}
