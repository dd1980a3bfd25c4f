use std::fmt::Display;

use serde::{Deserialize, Serialize};
use timber_market_engine::db_types::{
    CustomOrderStatus,
    DeliveryStatus,
    Money,
    NewOrderItem,
    OrderId,
    PaymentMethod,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

//----------------------------------------------  Orders  ----------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub customer_email: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreatedResponse {
    pub success: bool,
    pub order_id: OrderId,
    pub total_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderIdParams {
    pub order_id: OrderId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDeliveryStatusParams {
    pub order_id: OrderId,
    pub delivery_status: DeliveryStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionQuery {
    pub section: String,
}

//----------------------------------------------  Ledger  ----------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleasePaymentParams {
    pub order_id: OrderId,
    pub order_item_id: i64,
}

//----------------------------------------------  Custom orders  ---------------------------------------------

/// The base64 `data` is decoded and persisted under the configured upload dir.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
    pub file_name: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomOrderRequest {
    pub customer_email: String,
    pub material: String,
    pub board_color: String,
    pub board_size: String,
    pub board_thickness: String,
    #[serde(default)]
    pub description: String,
    pub estimated_price: Option<Money>,
    pub payment_method: PaymentMethod,
    pub reference_image: Option<FileUpload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptCustomOrderParams {
    pub final_price: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomOrderStatusParams {
    pub status: CustomOrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryStatusParams {
    pub delivery_status: DeliveryStatus,
}

//----------------------------------------------  Bank slips  ------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlipUploadParams {
    pub order_id: OrderId,
    pub slip: FileUpload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlipDecisionParams {
    pub approve: bool,
}

//----------------------------------------------  Carts  -----------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemParams {
    pub email: String,
    pub design_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineParams {
    pub email: String,
    pub design_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartClearParams {
    pub email: String,
}

//----------------------------------------------  Inventory  -------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustParams {
    pub stock_id: i64,
    pub delta: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockReleaseParams {
    pub stock_id: i64,
    pub quantity: i64,
}
