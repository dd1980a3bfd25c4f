use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use timber_market_engine::{
    db_types::{
        DeliveryStatus,
        Money,
        Order,
        OrderId,
        OrderItem,
        OrderStatus,
        OrderWithItems,
        PaymentMethod,
        PaymentStatus,
    },
    events::EventProducers,
    order_objects::{DeliverySection, DesignerOrderLine},
    OrderFlowApi,
};
use tmg_common::CommissionRate;

use super::helpers::get_request;
use crate::{
    endpoint_tests::mocks::MockOrderManager,
    routes::{MarketplaceDeliveryRoute, OrderByIdRoute, OrdersForCustomerRoute, OrdersForDesignerRoute},
};

#[actix_web::test]
async fn fetch_customer_orders() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/orders/customer/alice%40example.com", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
    assert!(body.contains(r#""orders":["#));
    assert!(body.contains(r#""order_id":"TMG-20240601-4F7A21""#));
    assert!(body.contains(r#""item_name":"Wall clock""#));
}

#[actix_web::test]
async fn delivery_dashboard_requires_a_known_section() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/orders/delivery/marketplace?section=finished", configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid delivery section"));
}

#[actix_web::test]
async fn delivery_dashboard_ready_bucket() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/orders/delivery/marketplace?section=ready", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""delivery_status":"assigned""#));
}

#[actix_web::test]
async fn unknown_order_is_a_404() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/orders/id/TMG-20240601-MISSING", configure).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains(r#""success":false"#));
}

#[actix_web::test]
async fn designer_lines_carry_earnings_and_release_state() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/orders/designer/maya%40example.com", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""designer_amount":160000"#));
    assert!(body.contains(r#""released":false"#));
}

fn configure(cfg: &mut ServiceConfig) {
    let mut orders = MockOrderManager::new();
    orders.expect_orders_for_customer().returning(|_| Ok(vec![order_response()]));
    orders.expect_orders_in_delivery_section().returning(|section| {
        assert_eq!(section, DeliverySection::Ready);
        let mut order = order_response();
        order.order.delivery_status = DeliveryStatus::Assigned;
        Ok(vec![order])
    });
    orders.expect_order_with_items().returning(|_| Ok(None));
    orders.expect_orders_for_designer().returning(|_| Ok(vec![designer_line()]));
    let api = OrderFlowApi::new(orders, CommissionRate::default(), Money::from_rupees(250), EventProducers::default());
    cfg.service(OrdersForCustomerRoute::<MockOrderManager>::new())
        .service(OrdersForDesignerRoute::<MockOrderManager>::new())
        .service(MarketplaceDeliveryRoute::<MockOrderManager>::new())
        .service(OrderByIdRoute::<MockOrderManager>::new())
        .app_data(web::Data::new(api));
}

fn designer_line() -> DesignerOrderLine {
    DesignerOrderLine {
        order_id: OrderId("TMG-20240601-4F7A21".into()),
        order_item_id: 10,
        design_id: 7,
        item_name: "Wall clock".into(),
        quantity: 2,
        unit_price: Money::from_rupees(1000),
        subtotal: Money::from_rupees(2000),
        order_status: OrderStatus::Confirmed,
        delivery_status: DeliveryStatus::NotAssigned,
        payment_method: PaymentMethod::CashOnDelivery,
        ordered_at: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
        designer_amount: Some(Money::from_rupees(1600)),
        released: Some(false),
    }
}

fn order_response() -> OrderWithItems {
    let created = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
    OrderWithItems {
        order: Order {
            id: 1,
            order_id: OrderId("TMG-20240601-4F7A21".into()),
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
        },
        items: vec![OrderItem {
            id: 10,
            order_id: OrderId("TMG-20240601-4F7A21".into()),
            design_id: 7,
            designer_email: "maya@example.com".into(),
            item_name: "Wall clock".into(),
            quantity: 2,
            unit_price: Money::from_rupees(1000),
            subtotal: Money::from_rupees(2000),
        }],
    }
}
