use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use serde_json::json;
use timber_market_engine::{
    db_types::{Design, Money, StockItem},
    events::EventProducers,
    CatalogApi,
    MarketGatewayError,
};

use super::helpers::{get_request, post_request, put_request};
use crate::{
    endpoint_tests::mocks::MockCatalogManager,
    routes::{
        CreateDesignRoute,
        DesignByIdRoute,
        ListDesignsRoute,
        LowStockItemsRoute,
        ReleaseStockRoute,
        UpdateDesignRoute,
    },
};

#[actix_web::test]
async fn designs_are_listed() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/designs", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
    assert!(body.contains(r#""designs":["#));
    assert!(body.contains(r#""item_name":"Wall clock""#));
}

#[actix_web::test]
async fn unknown_design_is_a_404() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/designs/99", configure).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains(r#""success":false"#));
}

#[actix_web::test]
async fn listing_validation_failures_are_400s() {
    let _ = env_logger::try_init().ok();
    let body = json!({
        "designer_email": "maya@example.com",
        "item_name": "Wall clock",
        "material": "Teak",
        "board_size": "30x40cm",
        "board_color": "Natural",
        "board_thickness": "18mm",
        "price": 0,
        "quantity": 5
    });
    let (status, body) = post_request("/designs", body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("price must be positive"));
}

#[actix_web::test]
async fn empty_design_updates_are_rejected() {
    let _ = env_logger::try_init().ok();
    let (status, body) = put_request("/designs/7", json!({}), configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("empty"));
}

#[actix_web::test]
async fn over_releasing_raw_stock_is_a_conflict() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "stock_id": 3, "quantity": 50 });
    let (status, body) = post_request("/inventory/stock/release", body, configure).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("Not enough"));
}

#[actix_web::test]
async fn low_stock_report() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/inventory/stock/low", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""available_quantity":2"#));
}

fn configure(cfg: &mut ServiceConfig) {
    let mut catalog = MockCatalogManager::new();
    catalog.expect_fetch_designs().returning(|| Ok(vec![design_response()]));
    catalog.expect_fetch_design().returning(|_| Ok(None));
    catalog.expect_insert_design().returning(|_| Err(MarketGatewayError::validation("Design price must be positive")));
    catalog.expect_update_design().returning(|_, _| Err(MarketGatewayError::validation("Design update is empty")));
    catalog
        .expect_release_stock()
        .returning(|id, qty| Err(MarketGatewayError::conflict(format!("Not enough of stock item {id} to release {qty}"))));
    catalog.expect_low_stock_items().returning(|| Ok(vec![stock_response()]));
    let api = CatalogApi::new(catalog, EventProducers::default());
    cfg.service(ListDesignsRoute::<MockCatalogManager>::new())
        .service(DesignByIdRoute::<MockCatalogManager>::new())
        .service(CreateDesignRoute::<MockCatalogManager>::new())
        .service(UpdateDesignRoute::<MockCatalogManager>::new())
        .service(ReleaseStockRoute::<MockCatalogManager>::new())
        .service(LowStockItemsRoute::<MockCatalogManager>::new())
        .app_data(web::Data::new(api));
}

fn design_response() -> Design {
    let created = Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap();
    Design {
        id: 7,
        designer_email: "maya@example.com".into(),
        item_name: "Wall clock".into(),
        description: "Hand carved teak wall clock".into(),
        material: "Teak".into(),
        board_size: "30x40cm".into(),
        board_color: "Natural".into(),
        board_thickness: "18mm".into(),
        price: Money::from_rupees(1000),
        quantity: 5,
        reorder_level: 2,
        created_at: created,
        updated_at: created,
    }
}

fn stock_response() -> StockItem {
    let created = Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap();
    StockItem {
        id: 3,
        material: "Mahogany".into(),
        board_size: "60x60cm".into(),
        board_thickness: "25mm".into(),
        board_color: "Dark".into(),
        price: Money::from_rupees(3500),
        available_quantity: 2,
        reorder_level: 5,
        created_at: created,
        updated_at: created,
    }
}
