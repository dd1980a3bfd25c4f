use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
pub use tmg_common::Money;

#[derive(Debug, Clone, Error)]
#[error("Invalid value: {0}")]
pub struct ConversionError(pub String);

//--------------------------------------        OrderId        -------------------------------------------------------
/// The human-facing order identifier, e.g. `TMG-20240601-4F7A21`. Distinct from the storage primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------      OrderStatus      -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Newly created; payment not verified yet. Bank-transfer orders start here.
    Pending,
    /// Payment verified. COD orders are confirmed at creation.
    Confirmed,
    /// A designer is preparing the items.
    Preparing,
    /// Handed over to the delivery queue.
    ReadyForDelivery,
    /// Terminal. Only reachable through the delivery sub-machine.
    Delivered,
    /// Terminal. Reserved stock has been restored.
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The order lifecycle transition table. `Delivered` is deliberately absent as a target here: an order only
    /// becomes delivered via [`DeliveryStatus::Delivered`], which carries the cash-collection guard.
    pub fn can_transition_to(&self, new: OrderStatus) -> bool {
        use OrderStatus::*;
        match (*self, new) {
            (Pending, Confirmed) => true,
            (Confirmed, Preparing) => true,
            (Confirmed | Preparing, ReadyForDelivery) => true,
            (Pending | Confirmed | Preparing | ReadyForDelivery, Cancelled) => true,
            (_, _) => false,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::ReadyForDelivery => "ready_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl FromStr for OrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "ready_for_delivery" => Ok(Self::ReadyForDelivery),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------    DeliveryStatus     -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    NotAssigned,
    Assigned,
    PickedUp,
    InTransit,
    Delivered,
}

impl DeliveryStatus {
    /// The delivery sub-machine is strictly forward. `NotAssigned -> Assigned` only happens through the
    /// notify-delivery transition, never through a raw status update. The courier UI has no "in transit" button
    /// for short runs, so `PickedUp -> Delivered` is a legal skip.
    pub fn can_advance_to(&self, new: DeliveryStatus) -> bool {
        use DeliveryStatus::*;
        matches!((*self, new), (Assigned, PickedUp) | (PickedUp, InTransit) | (PickedUp | InTransit, Delivered))
    }
}

impl Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DeliveryStatus::NotAssigned => "not_assigned",
            DeliveryStatus::Assigned => "assigned",
            DeliveryStatus::PickedUp => "picked_up",
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::Delivered => "delivered",
        };
        write!(f, "{s}")
    }
}

impl FromStr for DeliveryStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_assigned" => Ok(Self::NotAssigned),
            "assigned" => Ok(Self::Assigned),
            "picked_up" => Ok(Self::PickedUp),
            "in_transit" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            s => Err(ConversionError(format!("Invalid delivery status: {s}"))),
        }
    }
}

//--------------------------------------    PaymentMethod      -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CashOnDelivery,
    BankTransfer,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::CashOnDelivery => write!(f, "cash_on_delivery"),
            PaymentMethod::BankTransfer => write!(f, "bank_transfer"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash_on_delivery" => Ok(Self::CashOnDelivery),
            "bank_transfer" => Ok(Self::BankTransfer),
            s => Err(ConversionError(format!("Invalid payment method: {s}"))),
        }
    }
}

//--------------------------------------    PaymentStatus      -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

//--------------------------------------        Order         --------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_id: OrderId,
    pub customer_email: String,
    pub delivery_fee: Money,
    pub total_amount: Money,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub delivery_status: DeliveryStatus,
    pub cash_collected: bool,
    pub bank_slip_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// The cash-collection guard: a COD order may only complete delivery once the courier has confirmed
    /// collection. Enforced here, independently of anything the UI disables.
    pub fn may_complete_delivery(&self) -> bool {
        self.payment_method != PaymentMethod::CashOnDelivery || self.cash_collected
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: OrderId,
    pub design_id: i64,
    pub designer_email: String,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub subtotal: Money,
}

//--------------------------------------       NewOrder       --------------------------------------------------------
/// An incoming marketplace order, before stock has been reserved. Prices are never taken from the client; they are
/// read from the design rows inside the reservation transaction.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_id: OrderId,
    pub customer_email: String,
    pub payment_method: PaymentMethod,
    pub delivery_fee: Money,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub design_id: i64,
    pub quantity: i64,
}

/// The result of a successful order placement. `stock_updates` carries the post-reservation state of every design
/// touched, so callers can publish `designUpdated` events after the transaction commits.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub stock_updates: Vec<Design>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

//--------------------------------------        Design        --------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Design {
    pub id: i64,
    pub designer_email: String,
    pub item_name: String,
    pub description: String,
    pub material: String,
    pub board_size: String,
    pub board_color: String,
    pub board_thickness: String,
    pub price: Money,
    pub quantity: i64,
    pub reorder_level: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDesign {
    pub designer_email: String,
    pub item_name: String,
    #[serde(default)]
    pub description: String,
    pub material: String,
    pub board_size: String,
    pub board_color: String,
    pub board_thickness: String,
    pub price: Money,
    pub quantity: i64,
    #[serde(default)]
    pub reorder_level: i64,
}

/// A partial update to a marketplace listing. Only the fields a designer may edit are exposed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignUpdate {
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub quantity: Option<i64>,
    pub reorder_level: Option<i64>,
}

impl DesignUpdate {
    pub fn is_empty(&self) -> bool {
        self.item_name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.reorder_level.is_none()
    }
}

//--------------------------------------     LedgerEntry      --------------------------------------------------------
/// One `DesignerPayment` row: the money owed to a designer for a single order line item. Rows are created once the
/// order is payable, never deleted, and flip to `released` exactly once.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub order_id: OrderId,
    pub order_item_id: i64,
    pub design_id: i64,
    pub designer_email: String,
    pub item_name: String,
    pub quantity: i64,
    pub item_price: Money,
    pub commission: Money,
    pub designer_amount: Money,
    pub released: bool,
    pub released_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------   CustomOrderStatus   -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CustomOrderStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl CustomOrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CustomOrderStatus::Completed | CustomOrderStatus::Cancelled)
    }

    pub fn can_transition_to(&self, new: CustomOrderStatus) -> bool {
        use CustomOrderStatus::*;
        match (*self, new) {
            (Pending, Accepted) => true,
            (Accepted, InProgress) => true,
            (InProgress, Completed) => true,
            (Pending | Accepted | InProgress, Cancelled) => true,
            (_, _) => false,
        }
    }
}

impl Display for CustomOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CustomOrderStatus::Pending => "pending",
            CustomOrderStatus::Accepted => "accepted",
            CustomOrderStatus::InProgress => "in_progress",
            CustomOrderStatus::Completed => "completed",
            CustomOrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl FromStr for CustomOrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid custom order status: {s}"))),
        }
    }
}

//--------------------------------------     CustomOrder       -------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CustomOrder {
    pub id: i64,
    pub order_id: OrderId,
    pub customer_email: String,
    pub material: String,
    pub board_color: String,
    pub board_size: String,
    pub board_thickness: String,
    pub description: String,
    pub reference_image_path: Option<String>,
    pub estimated_price: Option<Money>,
    pub final_price: Option<Money>,
    pub status: CustomOrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
    pub cash_collected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomOrder {
    pub fn may_complete_delivery(&self) -> bool {
        self.payment_method != PaymentMethod::CashOnDelivery || self.cash_collected
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomOrder {
    pub customer_email: String,
    pub material: String,
    pub board_color: String,
    pub board_size: String,
    pub board_thickness: String,
    #[serde(default)]
    pub description: String,
    pub reference_image_path: Option<String>,
    pub estimated_price: Option<Money>,
    pub payment_method: PaymentMethod,
}

//--------------------------------------      StockItem        -------------------------------------------------------
/// A raw-material inventory line, keyed by its physical specification. Distinct from design stock: this is what
/// the inventory team releases to staff designers for custom work.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StockItem {
    pub id: i64,
    pub material: String,
    pub board_size: String,
    pub board_thickness: String,
    pub board_color: String,
    pub price: Money,
    pub available_quantity: i64,
    pub reorder_level: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStockItem {
    pub material: String,
    pub board_size: String,
    pub board_thickness: String,
    pub board_color: String,
    pub price: Money,
    pub available_quantity: i64,
    #[serde(default)]
    pub reorder_level: i64,
}

//--------------------------------------       CartLine        -------------------------------------------------------
/// A cart row joined with the listing it points at, so the UI can render name/price without extra fetches.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CartLine {
    pub user_email: String,
    pub design_id: i64,
    pub quantity: i64,
    pub item_name: String,
    pub unit_price: Money,
    pub available_quantity: i64,
}

//--------------------------------------      BankSlip         -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BankSlipStatus {
    Pending,
    Approved,
    Rejected,
}

impl Display for BankSlipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BankSlipStatus::Pending => write!(f, "pending"),
            BankSlipStatus::Approved => write!(f, "approved"),
            BankSlipStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BankSlip {
    pub id: i64,
    pub order_id: OrderId,
    pub slip_path: String,
    pub status: BankSlipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
