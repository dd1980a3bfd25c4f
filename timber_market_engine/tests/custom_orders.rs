use timber_market_engine::{
    db_types::*,
    order_objects::DeliverySection,
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    CustomOrderApi,
    MarketGatewayError,
    SqliteDatabase,
};
use tmg_common::Money;

async fn new_api() -> CustomOrderApi<SqliteDatabase> {
    let url = random_db_path();
    prepare_test_env(&url).await;
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database");
    CustomOrderApi::new(db)
}

fn request(email: &str) -> NewCustomOrder {
    NewCustomOrder {
        customer_email: email.into(),
        material: "Oak".into(),
        board_color: "Natural".into(),
        board_size: "60x40cm".into(),
        board_thickness: "20mm".into(),
        description: "Family name carved in relief".into(),
        reference_image_path: Some("uploads/custom/ref-001.jpg".into()),
        estimated_price: Some(Money::from_rupees(3500)),
        payment_method: PaymentMethod::CashOnDelivery,
    }
}

#[tokio::test]
async fn full_custom_lifecycle() {
    let api = new_api().await;
    let order = api.submit_request(request("kim@example.com")).await.unwrap();
    assert!(order.order_id.as_str().starts_with("TMC-"));
    assert_eq!(order.status, CustomOrderStatus::Pending);
    assert_eq!(order.final_price, None);

    let order = api.accept(&order.order_id, Money::from_rupees(4000)).await.unwrap();
    assert_eq!(order.status, CustomOrderStatus::Accepted);
    assert_eq!(order.final_price, Some(Money::from_rupees(4000)));

    let order = api.update_status(&order.order_id, CustomOrderStatus::InProgress).await.unwrap();
    assert_eq!(order.status, CustomOrderStatus::InProgress);
    let order = api.update_status(&order.order_id, CustomOrderStatus::Completed).await.unwrap();
    assert_eq!(order.status, CustomOrderStatus::Completed);

    let order = api.notify_delivery(&order.order_id).await.unwrap();
    assert_eq!(order.delivery_status, DeliveryStatus::Assigned);

    let ready = api.orders_in_delivery_section(DeliverySection::Ready).await.unwrap();
    assert_eq!(ready.len(), 1);

    api.advance_delivery_status(&order.order_id, DeliveryStatus::PickedUp).await.unwrap();
    // COD guard applies to custom orders too.
    let err = api.advance_delivery_status(&order.order_id, DeliveryStatus::Delivered).await.unwrap_err();
    assert!(matches!(err, MarketGatewayError::Conflict(_)));

    api.collect_cash(&order.order_id).await.unwrap();
    let order = api.advance_delivery_status(&order.order_id, DeliveryStatus::Delivered).await.unwrap();
    assert_eq!(order.delivery_status, DeliveryStatus::Delivered);
    assert_eq!(order.payment_status, PaymentStatus::Paid);

    let completed = api.orders_in_delivery_section(DeliverySection::Completed).await.unwrap();
    assert_eq!(completed.len(), 1);
}

#[tokio::test]
async fn custom_lifecycle_cannot_skip_or_reverse() {
    let api = new_api().await;
    let order = api.submit_request(request("lena@example.com")).await.unwrap();

    // Pending -> InProgress skips acceptance.
    let err = api.update_status(&order.order_id, CustomOrderStatus::InProgress).await.unwrap_err();
    assert!(matches!(err, MarketGatewayError::Conflict(_)));

    // Delivery cannot start before the piece is completed.
    let err = api.notify_delivery(&order.order_id).await.unwrap_err();
    assert!(matches!(err, MarketGatewayError::Conflict(_)));

    let order = api.accept(&order.order_id, Money::from_rupees(2500)).await.unwrap();
    // Accepting twice conflicts.
    let err = api.accept(&order.order_id, Money::from_rupees(9999)).await.unwrap_err();
    assert!(matches!(err, MarketGatewayError::Conflict(_)));
    // And the quoted price did not move.
    let order = api.order_by_order_id(&order.order_id).await.unwrap().unwrap();
    assert_eq!(order.final_price, Some(Money::from_rupees(2500)));
}

#[tokio::test]
async fn cancelled_requests_are_terminal() {
    let api = new_api().await;
    let order = api.submit_request(request("mo@example.com")).await.unwrap();
    let order = api.update_status(&order.order_id, CustomOrderStatus::Cancelled).await.unwrap();
    assert_eq!(order.status, CustomOrderStatus::Cancelled);

    let err = api.accept(&order.order_id, Money::from_rupees(1000)).await.unwrap_err();
    assert!(matches!(err, MarketGatewayError::Conflict(_)));
    let err = api.update_status(&order.order_id, CustomOrderStatus::Pending).await.unwrap_err();
    assert!(matches!(err, MarketGatewayError::Conflict(_)));
}

#[tokio::test]
async fn customers_see_their_own_requests() {
    let api = new_api().await;
    api.submit_request(request("nia@example.com")).await.unwrap();
    api.submit_request(request("nia@example.com")).await.unwrap();
    api.submit_request(request("other@example.com")).await.unwrap();

    let mine = api.orders_for_customer("nia@example.com").await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|o| o.customer_email == "nia@example.com"));
}

#[tokio::test]
async fn request_validation() {
    let api = new_api().await;
    let mut bad = request("");
    let err = api.submit_request(bad.clone()).await.unwrap_err();
    assert!(matches!(err, MarketGatewayError::ValidationError(_)));

    bad.customer_email = "ok@example.com".into();
    bad.material = "  ".into();
    let err = api.submit_request(bad).await.unwrap_err();
    assert!(matches!(err, MarketGatewayError::ValidationError(_)));
}
