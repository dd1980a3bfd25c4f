use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use serde_json::json;
use timber_market_engine::{
    db_types::{
        CustomOrder,
        CustomOrderStatus,
        DeliveryStatus,
        Money,
        OrderId,
        PaymentMethod,
        PaymentStatus,
    },
    CustomOrderApi,
    MarketGatewayError,
};

use super::helpers::{get_request, put_request};
use crate::{
    endpoint_tests::mocks::MockCustomOrderManager,
    routes::{AcceptCustomOrderRoute, CustomDeliverySectionsRoute, UpdateCustomOrderStatusRoute},
};

#[actix_web::test]
async fn accepting_quotes_the_final_price() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "final_price": 500000 });
    let (status, body) = put_request("/customOrder/TMC-20240601-9QK3DX/accept", body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
    assert!(body.contains(r#""status":"accepted""#));
    assert!(body.contains(r#""final_price":500000"#));
}

#[actix_web::test]
async fn the_status_endpoint_refuses_acceptance() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "status": "accepted" });
    let (status, body) = put_request("/customOrder/TMC-20240601-9QK3DX/status", body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("accept endpoint"));
}

#[actix_web::test]
async fn illegal_lifecycle_steps_are_conflicts() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "status": "completed" });
    let (status, body) = put_request("/customOrder/TMC-20240601-9QK3DX/status", body, configure).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("cannot move"));
}

#[actix_web::test]
async fn delivery_sections_require_a_known_bucket() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/customOrder/delivery?section=done", configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid delivery section"));
}

fn configure(cfg: &mut ServiceConfig) {
    let mut custom = MockCustomOrderManager::new();
    custom.expect_accept_custom_order().returning(|oid, final_price| {
        let mut order = custom_order_response(oid.clone());
        order.status = CustomOrderStatus::Accepted;
        order.final_price = Some(final_price);
        Ok(order)
    });
    custom.expect_update_custom_order_status().returning(|oid, new| {
        Err(MarketGatewayError::conflict(format!("Custom order {oid} cannot move from pending to {new}")))
    });
    let api = CustomOrderApi::new(custom);
    cfg.service(AcceptCustomOrderRoute::<MockCustomOrderManager>::new())
        .service(UpdateCustomOrderStatusRoute::<MockCustomOrderManager>::new())
        .service(CustomDeliverySectionsRoute::<MockCustomOrderManager>::new())
        .app_data(web::Data::new(api));
}

fn custom_order_response(oid: OrderId) -> CustomOrder {
    let created = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    CustomOrder {
        id: 1,
        order_id: oid,
        customer_email: "alice@example.com".into(),
        material: "Teak".into(),
        board_color: "Natural".into(),
        board_size: "60x90cm".into(),
        board_thickness: "25mm".into(),
        description: "Carved family name board".into(),
        reference_image_path: None,
        estimated_price: Some(Money::from_rupees(4500)),
        final_price: None,
        status: CustomOrderStatus::Pending,
        payment_method: PaymentMethod::CashOnDelivery,
        payment_status: PaymentStatus::Pending,
        delivery_status: DeliveryStatus::NotAssigned,
        cash_collected: false,
        created_at: created,
        updated_at: created,
    }
}
