use tmg_common::CommissionRate;

use crate::{
    db::traits::MarketGatewayError,
    db_types::{BankSlip, DeliveryStatus, Design, NewOrder, Order, OrderId, PlacedOrder},
};

/// The highest level of behaviour for backends supporting the market gateway: the transactional order flows.
///
/// Every method here is a single atomic unit of work. In particular, order placement must reserve stock with a
/// compare-and-decrement inside the same transaction that creates the order, so that two concurrent purchases of
/// the last unit of a design can never both succeed.
#[allow(async_fn_in_trait)]
pub trait MarketGatewayDatabase: Clone {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Places a marketplace order. In a single atomic transaction:
    /// * every line item's quantity is reserved against its design with a conditional decrement; the first
    ///   shortfall aborts the whole transaction with [`MarketGatewayError::InsufficientStock`],
    /// * line items are priced from the design rows (client-supplied prices are never trusted),
    /// * the order document is created; COD orders confirm immediately,
    /// * when `ledger_rate` is given (COD orders), one ledger row per line item is recorded.
    ///
    /// Returns the created order, its items, and the post-reservation state of every design touched.
    async fn create_order(
        &self,
        order: NewOrder,
        ledger_rate: Option<CommissionRate>,
    ) -> Result<PlacedOrder, MarketGatewayError>;

    /// Cancels a pre-delivery order and restores the stock it reserved, atomically. Terminal orders are rejected
    /// with a conflict reporting the current state.
    async fn cancel_order(&self, oid: &OrderId) -> Result<(Order, Vec<Design>), MarketGatewayError>;

    /// Moves a confirmed order into `preparing`.
    async fn start_preparing(&self, oid: &OrderId) -> Result<Order, MarketGatewayError>;

    /// The unified notify-delivery transition: `confirmed`/`preparing` -> `ready_for_delivery`, atomically
    /// advancing the delivery status `not_assigned` -> `assigned`.
    async fn notify_delivery(&self, oid: &OrderId) -> Result<Order, MarketGatewayError>;

    /// Advances the delivery sub-machine. Rejects anything but a forward step, and rejects the `delivered`
    /// step for COD orders until cash has been collected. Completing delivery also marks the order `delivered`.
    async fn advance_delivery_status(&self, oid: &OrderId, new: DeliveryStatus) -> Result<Order, MarketGatewayError>;

    /// Marks COD cash as collected and the payment as `paid`. Only legal while the order is out with the courier.
    async fn collect_cash(&self, oid: &OrderId) -> Result<Order, MarketGatewayError>;

    /// Attaches a pending payment slip to a bank-transfer order and records its URL on the order.
    async fn attach_bank_slip(&self, oid: &OrderId, slip_path: &str) -> Result<BankSlip, MarketGatewayError>;

    /// Approves or rejects a pending slip. Approval marks the order `paid`, confirms it, and records the ledger
    /// rows using `rate`. Deciding a slip twice is a conflict.
    async fn decide_bank_slip(
        &self,
        slip_id: i64,
        approve: bool,
        rate: CommissionRate,
    ) -> Result<(BankSlip, Order), MarketGatewayError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), MarketGatewayError> {
        Ok(())
    }
}
