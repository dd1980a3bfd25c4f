use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use serde_json::json;
use timber_market_engine::{
    db_types::{
        BankSlip,
        BankSlipStatus,
        DeliveryStatus,
        Money,
        Order,
        OrderId,
        OrderStatus,
        PaymentMethod,
        PaymentStatus,
        PlacedOrder,
    },
    events::EventProducers,
    MarketGatewayError,
    OrderFlowApi,
};
use tmg_common::CommissionRate;

use super::helpers::{post_request, put_request};
use crate::{
    config::ServerConfig,
    endpoint_tests::mocks::MockGatewayDb,
    routes::{
        CancelOrderRoute,
        CollectCashRoute,
        CreateOrderRoute,
        DecideBankSlipRoute,
        NotifyDeliveryRoute,
        UpdateOrderDeliveryRoute,
        UploadBankSlipRoute,
    },
};

const SOLD_OUT_DESIGN: i64 = 99;
const DELIVERED_ORDER: &str = "TMG-20240601-DONE11";

#[actix_web::test]
async fn placing_an_order_returns_id_and_total() {
    let _ = env_logger::try_init().ok();
    let body = json!({
        "customer_email": "alice@example.com",
        "payment_method": "cash_on_delivery",
        "items": [{ "design_id": 7, "quantity": 2 }]
    });
    let (status, body) = post_request("/orders/create", body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
    assert!(body.contains(r#""order_id":"TMG-"#));
    assert!(body.contains(r#""total_amount":225000"#));
}

#[actix_web::test]
async fn sold_out_items_are_named_in_the_conflict() {
    let _ = env_logger::try_init().ok();
    let body = json!({
        "customer_email": "bob@example.com",
        "payment_method": "cash_on_delivery",
        "items": [{ "design_id": SOLD_OUT_DESIGN, "quantity": 1 }]
    });
    let (status, body) = post_request("/orders/create", body, configure).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains(r#""success":false"#));
    assert!(body.contains("One-off sculpture"));
}

#[actix_web::test]
async fn couriers_advance_the_delivery_status() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "order_id": "TMG-20240601-4F7A21", "delivery_status": "picked_up" });
    let (status, body) = put_request("/orders/update-status", body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
    assert!(body.contains(r#""delivery_status":"picked_up""#));
}

#[actix_web::test]
async fn the_cash_guard_blocks_delivery_completion() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "order_id": "TMG-20240601-4F7A21", "delivery_status": "delivered" });
    let (status, body) = put_request("/orders/update-status", body, configure).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("cash has not been collected"));
}

#[actix_web::test]
async fn collecting_cash_marks_the_order_paid() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "order_id": "TMG-20240601-4F7A21" });
    let (status, body) = post_request("/orders/collect-cash", body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""cash_collected":true"#));
    assert!(body.contains(r#""payment_status":"paid""#));
}

#[actix_web::test]
async fn notify_delivery_assigns_the_courier_queue() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "order_id": "TMG-20240601-4F7A21" });
    let (status, body) = post_request("/orders/notify-delivery", body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""status":"ready_for_delivery""#));
    assert!(body.contains(r#""delivery_status":"assigned""#));
}

#[actix_web::test]
async fn cancelling_restores_and_reports_the_order() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "order_id": "TMG-20240601-4F7A21" });
    let (status, body) = post_request("/orders/cancel", body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
    assert!(body.contains(r#""status":"cancelled""#));
}

#[actix_web::test]
async fn cancelling_a_delivered_order_is_a_conflict() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "order_id": DELIVERED_ORDER });
    let (status, body) = post_request("/orders/cancel", body, configure).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("already delivered"));
}

#[actix_web::test]
async fn uploading_a_slip_attaches_a_pending_record() {
    let _ = env_logger::try_init().ok();
    let body = json!({
        "order_id": "TMG-20240601-4F7A21",
        "slip": { "file_name": "slip.png", "data": base64::encode(b"not really a png") }
    });
    let (status, body) = post_request("/bankSlip/upload", body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
    assert!(body.contains(r#""status":"pending""#));
    assert!(body.contains("slips"));
}

#[actix_web::test]
async fn approving_a_slip_confirms_the_order() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "approve": true });
    let (status, body) = put_request("/bankSlip/1/status", body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
    assert!(body.contains(r#""status":"approved""#));
    assert!(body.contains(r#""payment_status":"paid""#));
}

fn configure(cfg: &mut ServiceConfig) {
    let mut db = MockGatewayDb::new();
    db.expect_create_order().returning(|order, _rate| {
        if order.items.iter().any(|i| i.design_id == SOLD_OUT_DESIGN) {
            return Err(MarketGatewayError::InsufficientStock { items: vec!["One-off sculpture".into()] });
        }
        let mut created = order_response(order.order_id);
        created.total_amount = Money::from_rupees(2250);
        Ok(PlacedOrder { order: created, items: vec![], stock_updates: vec![] })
    });
    db.expect_advance_delivery_status().returning(|oid, new| {
        if new == DeliveryStatus::Delivered {
            return Err(MarketGatewayError::conflict(format!(
                "Order {oid} is cash-on-delivery and cash has not been collected"
            )));
        }
        let mut order = order_response(oid.clone());
        order.delivery_status = new;
        Ok(order)
    });
    db.expect_collect_cash().returning(|oid| {
        let mut order = order_response(oid.clone());
        order.cash_collected = true;
        order.payment_status = PaymentStatus::Paid;
        Ok(order)
    });
    db.expect_notify_delivery().returning(|oid| {
        let mut order = order_response(oid.clone());
        order.status = OrderStatus::ReadyForDelivery;
        order.delivery_status = DeliveryStatus::Assigned;
        Ok(order)
    });
    db.expect_cancel_order().returning(|oid| {
        if oid.as_str() == DELIVERED_ORDER {
            return Err(MarketGatewayError::conflict(format!("Order {oid} is already delivered")));
        }
        let mut order = order_response(oid.clone());
        order.status = OrderStatus::Cancelled;
        Ok((order, vec![]))
    });
    db.expect_attach_bank_slip().returning(|oid, slip_path| Ok(slip_response(oid.clone(), slip_path)));
    db.expect_decide_bank_slip().returning(|_slip_id, approve, _rate| {
        let oid = OrderId("TMG-20240601-4F7A21".into());
        let mut slip = slip_response(oid.clone(), "uploads/slips/slip.png");
        slip.status = if approve { BankSlipStatus::Approved } else { BankSlipStatus::Rejected };
        let mut order = order_response(oid);
        order.payment_status = PaymentStatus::Paid;
        order.status = OrderStatus::Confirmed;
        Ok((slip, order))
    });
    let api = OrderFlowApi::new(db, CommissionRate::default(), Money::from_rupees(250), EventProducers::default());
    let config = ServerConfig { upload_dir: "../data/test_uploads".into(), ..Default::default() };
    cfg.service(CreateOrderRoute::<MockGatewayDb>::new())
        .service(UpdateOrderDeliveryRoute::<MockGatewayDb>::new())
        .service(CollectCashRoute::<MockGatewayDb>::new())
        .service(NotifyDeliveryRoute::<MockGatewayDb>::new())
        .service(CancelOrderRoute::<MockGatewayDb>::new())
        .service(UploadBankSlipRoute::<MockGatewayDb>::new())
        .service(DecideBankSlipRoute::<MockGatewayDb>::new())
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(config));
}

fn order_response(oid: OrderId) -> Order {
    let created = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
    Order {
        id: 1,
        order_id: oid,
        customer_email: "alice@example.com".into(),
        delivery_fee: Money::from_rupees(250),
        total_amount: Money::from_rupees(2250),
        payment_method: PaymentMethod::CashOnDelivery,
        payment_status: PaymentStatus::Pending,
        status: OrderStatus::Confirmed,
        delivery_status: DeliveryStatus::NotAssigned,
        cash_collected: false,
        bank_slip_url: None,
        created_at: created,
        updated_at: created,
    }
}

fn slip_response(oid: OrderId, slip_path: &str) -> BankSlip {
    let created = Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap();
    BankSlip {
        id: 1,
        order_id: oid,
        slip_path: slip_path.to_string(),
        status: BankSlipStatus::Pending,
        created_at: created,
        updated_at: created,
    }
}
