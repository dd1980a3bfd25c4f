use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use serde_json::json;
use timber_market_engine::{
    db_types::{LedgerEntry, Money, OrderId},
    order_objects::{IncomeTotals, MarketplaceIncome},
    LedgerApi,
    MarketGatewayError,
};
use tmg_common::CommissionRate;

use super::helpers::{get_request, post_request};
use crate::{
    endpoint_tests::mocks::MockLedgerManager,
    routes::{MarketplaceIncomeRoute, ReleaseDesignerPaymentRoute},
};

#[actix_web::test]
async fn releasing_a_payment_returns_the_stamped_entry() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "order_id": "TMG-20240601-4F7A21", "order_item_id": 10 });
    let (status, body) = post_request("/financial/release-designer-payment", body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
    assert!(body.contains(r#""released":true"#));
    assert!(body.contains(r#""designer_amount":160000"#));
}

#[actix_web::test]
async fn releasing_twice_is_a_conflict() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "order_id": "TMG-20240601-4F7A21", "order_item_id": 11 });
    let (status, body) = post_request("/financial/release-designer-payment", body, configure).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("already been released"));
}

#[actix_web::test]
async fn income_report_carries_rows_and_totals() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/financial/marketplace-income", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#));
    assert!(body.contains(r#""rows":["#));
    assert!(body.contains(r#""commission":40000"#));
    assert!(body.contains(r#""pending_total":0"#));
}

fn configure(cfg: &mut ServiceConfig) {
    let mut ledger = MockLedgerManager::new();
    ledger.expect_release_designer_payment().returning(|oid, item_id| match item_id {
        10 => Ok(released_entry()),
        _ => Err(MarketGatewayError::conflict(format!("Payment for order {oid} item {item_id} has already been released"))),
    });
    ledger.expect_marketplace_income().returning(|| {
        let rows = vec![released_entry()];
        let totals = IncomeTotals::accumulate(&rows);
        Ok(MarketplaceIncome { rows, totals })
    });
    let api = LedgerApi::new(ledger, CommissionRate::default());
    cfg.service(ReleaseDesignerPaymentRoute::<MockLedgerManager>::new())
        .service(MarketplaceIncomeRoute::<MockLedgerManager>::new())
        .app_data(web::Data::new(api));
}

fn released_entry() -> LedgerEntry {
    let created = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
    LedgerEntry {
        id: 1,
        order_id: OrderId("TMG-20240601-4F7A21".into()),
        order_item_id: 10,
        design_id: 7,
        designer_email: "maya@example.com".into(),
        item_name: "Wall clock".into(),
        quantity: 2,
        item_price: Money::from_rupees(2000),
        commission: Money::from_rupees(400),
        designer_amount: Money::from_rupees(1600),
        released: true,
        released_at: Some(Utc.with_ymd_and_hms(2024, 6, 9, 9, 0, 0).unwrap()),
        created_at: created,
    }
}
