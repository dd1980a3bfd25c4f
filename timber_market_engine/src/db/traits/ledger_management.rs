use tmg_common::CommissionRate;

use crate::{
    api::order_objects::{DesignerEarnings, MarketplaceIncome},
    db::traits::MarketGatewayError,
    db_types::{LedgerEntry, OrderId},
};

/// The designer-payment ledger. One row per `(order_id, order_item_id)`, enforced by a unique compound index;
/// rows are created when an order becomes payable and are never deleted.
#[allow(async_fn_in_trait)]
pub trait LedgerManagement {
    /// Records one unreleased ledger row per line item of the given order, splitting each item's subtotal with
    /// `rate`. Idempotent: rows that already exist are skipped, not an error, and calling this twice can never
    /// produce duplicates.
    async fn record_ledger_entries(
        &self,
        oid: &OrderId,
        rate: CommissionRate,
    ) -> Result<Vec<LedgerEntry>, MarketGatewayError>;

    /// Flips a ledger row to `released` and stamps `released_at`. The parent order must be delivered. This is
    /// deliberately NOT idempotent: releasing twice is a conflict that should alert an operator, and the second
    /// call must leave `released_at` untouched.
    async fn release_designer_payment(
        &self,
        oid: &OrderId,
        order_item_id: i64,
    ) -> Result<LedgerEntry, MarketGatewayError>;

    async fn ledger_entries_for_order(&self, oid: &OrderId) -> Result<Vec<LedgerEntry>, MarketGatewayError>;

    /// All ledger rows plus marketplace-wide totals, for the financial dashboard.
    async fn marketplace_income(&self) -> Result<MarketplaceIncome, MarketGatewayError>;

    /// One designer's ledger rows plus released/pending totals.
    async fn designer_earnings(&self, email: &str) -> Result<DesignerEarnings, MarketGatewayError>;
}
