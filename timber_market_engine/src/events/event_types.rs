use serde::{Deserialize, Serialize};
use tmg_common::Money;

use crate::db_types::{Design, Order};

/// The payload broadcast to storefront clients whenever a design listing changes (price edits, stock reservations,
/// restocks and cancellations all funnel through here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignUpdatedEvent {
    pub design_id: i64,
    pub item_name: String,
    pub description: String,
    pub material: String,
    pub board_size: String,
    pub board_color: String,
    pub board_thickness: String,
    pub price: Money,
    pub quantity: i64,
}

impl From<&Design> for DesignUpdatedEvent {
    fn from(design: &Design) -> Self {
        Self {
            design_id: design.id,
            item_name: design.item_name.clone(),
            description: design.description.clone(),
            material: design.material.clone(),
            board_size: design.board_size.clone(),
            board_color: design.board_color.clone(),
            board_thickness: design.board_thickness.clone(),
            price: design.price,
            quantity: design.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPaidEvent {
    pub order: Order,
}

impl OrderPaidEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}
