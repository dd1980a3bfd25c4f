use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tmg_common::Money;

use crate::db_types::{ConversionError, DeliveryStatus, LedgerEntry, OrderId, OrderStatus, PaymentMethod};

//--------------------------------------   DeliverySection    --------------------------------------------------------
/// The three courier dashboard buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverySection {
    /// Ready for pickup: notified to delivery, not yet picked up.
    Ready,
    /// Out for delivery: picked up or in transit.
    On,
    /// Delivered.
    Completed,
}

impl Display for DeliverySection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliverySection::Ready => write!(f, "ready"),
            DeliverySection::On => write!(f, "on"),
            DeliverySection::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for DeliverySection {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready" => Ok(Self::Ready),
            "on" => Ok(Self::On),
            "completed" => Ok(Self::Completed),
            s => Err(ConversionError(format!("Invalid delivery section: {s}"))),
        }
    }
}

impl DeliverySection {
    /// The delivery statuses each bucket covers.
    pub fn delivery_statuses(&self) -> &'static [DeliveryStatus] {
        match self {
            DeliverySection::Ready => &[DeliveryStatus::Assigned],
            DeliverySection::On => &[DeliveryStatus::PickedUp, DeliveryStatus::InTransit],
            DeliverySection::Completed => &[DeliveryStatus::Delivered],
        }
    }
}

//--------------------------------------  DesignerOrderLine   --------------------------------------------------------
/// One sold line item from a designer's point of view: the order context plus the earning attached to it, if the
/// ledger row exists yet (bank-transfer orders only get one after slip approval).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DesignerOrderLine {
    pub order_id: OrderId,
    pub order_item_id: i64,
    pub design_id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub subtotal: Money,
    pub order_status: OrderStatus,
    pub delivery_status: DeliveryStatus,
    pub payment_method: PaymentMethod,
    pub ordered_at: DateTime<Utc>,
    pub designer_amount: Option<Money>,
    pub released: Option<bool>,
}

//--------------------------------------  MarketplaceIncome   --------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeTotals {
    /// Sum of item prices across the ledger.
    pub gross: Money,
    /// The company's cut.
    pub commission: Money,
    /// Everything owed to designers, released or not.
    pub designer_total: Money,
    /// Designer amounts already paid out.
    pub released_total: Money,
    /// Designer amounts still awaiting release.
    pub pending_total: Money,
}

impl IncomeTotals {
    pub fn accumulate(entries: &[LedgerEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut totals, e| {
            totals.gross = totals.gross + e.item_price;
            totals.commission = totals.commission + e.commission;
            totals.designer_total = totals.designer_total + e.designer_amount;
            if e.released {
                totals.released_total = totals.released_total + e.designer_amount;
            } else {
                totals.pending_total = totals.pending_total + e.designer_amount;
            }
            totals
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceIncome {
    pub rows: Vec<LedgerEntry>,
    pub totals: IncomeTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignerEarnings {
    pub designer_email: String,
    pub rows: Vec<LedgerEntry>,
    pub totals: IncomeTotals,
}
