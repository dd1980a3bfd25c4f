use actix_web::{http::StatusCode, web, web::ServiceConfig};
use serde_json::json;
use timber_market_engine::{db_types::CartLine, CartApi, MarketGatewayError};
use tmg_common::Money;

use super::helpers::{get_request, post_request};
use crate::{
    endpoint_tests::mocks::MockCartManager,
    routes::{CartAddRoute, CartClearRoute, CartFetchRoute},
};

#[actix_web::test]
async fn adding_returns_the_refreshed_cart() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "email": "alice@example.com", "design_id": 7, "quantity": 2 });
    let (status, body) = post_request("/cart/add", body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
    assert!(body.contains(r#""design_id":7"#));
    assert!(body.contains(r#""quantity":2"#));
}

#[actix_web::test]
async fn adding_an_unknown_design_is_a_404() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "email": "alice@example.com", "design_id": 99, "quantity": 1 });
    let (status, body) = post_request("/cart/add", body, configure).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Design 99"));
}

#[actix_web::test]
async fn clearing_returns_a_success_envelope() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "email": "alice@example.com" });
    let (status, body) = post_request("/cart/clear", body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
}

#[actix_web::test]
async fn an_empty_cart_is_an_empty_list() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/cart/bob%40example.com", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
    assert!(body.contains(r#""cart":[]"#));
}

fn configure(cfg: &mut ServiceConfig) {
    let mut carts = MockCartManager::new();
    carts.expect_add_to_cart().returning(|email, design_id, quantity| {
        if design_id != 7 {
            return Err(MarketGatewayError::not_found(format!("Design {design_id}")));
        }
        Ok(vec![CartLine {
            user_email: email.to_string(),
            design_id,
            quantity,
            item_name: "Wall clock".into(),
            unit_price: Money::from_rupees(1000),
            available_quantity: 5,
        }])
    });
    carts.expect_clear_cart().returning(|_| Ok(()));
    carts.expect_fetch_cart().returning(|_| Ok(vec![]));
    let api = CartApi::new(carts);
    cfg.service(CartAddRoute::<MockCartManager>::new())
        .service(CartClearRoute::<MockCartManager>::new())
        .service(CartFetchRoute::<MockCartManager>::new())
        .app_data(web::Data::new(api));
}
