//! Unified API for the designer-payment ledger.

use std::fmt::Debug;

use tmg_common::CommissionRate;

use crate::{
    api::order_objects::{DesignerEarnings, MarketplaceIncome},
    db::traits::{LedgerManagement, MarketGatewayError},
    db_types::{LedgerEntry, OrderId},
};

/// `LedgerApi` records commission splits and releases designer payouts. Both operations are idempotent at the
/// storage layer: re-recording is a no-op and a second release is a conflict.
pub struct LedgerApi<B> {
    db: B,
    commission: CommissionRate,
}

impl<B: Debug> Debug for LedgerApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LedgerApi ({:?})", self.db)
    }
}

impl<B> LedgerApi<B>
where B: LedgerManagement
{
    pub fn new(db: B, commission: CommissionRate) -> Self {
        Self { db, commission }
    }

    /// Records one ledger entry per order item at the configured commission rate. Entries that already exist are
    /// left untouched.
    pub async fn record_entries(&self, oid: &OrderId) -> Result<Vec<LedgerEntry>, MarketGatewayError> {
        self.db.record_ledger_entries(oid, self.commission).await
    }

    /// Releases the designer's share for a single order item. The order must be delivered, and each entry can be
    /// released exactly once.
    pub async fn release_payment(
        &self,
        oid: &OrderId,
        order_item_id: i64,
    ) -> Result<LedgerEntry, MarketGatewayError> {
        self.db.release_designer_payment(oid, order_item_id).await
    }

    pub async fn entries_for_order(&self, oid: &OrderId) -> Result<Vec<LedgerEntry>, MarketGatewayError> {
        self.db.ledger_entries_for_order(oid).await
    }

    pub async fn marketplace_income(&self) -> Result<MarketplaceIncome, MarketGatewayError> {
        self.db.marketplace_income().await
    }

    pub async fn designer_earnings(&self, email: &str) -> Result<DesignerEarnings, MarketGatewayError> {
        self.db.designer_earnings(email).await
    }
}
