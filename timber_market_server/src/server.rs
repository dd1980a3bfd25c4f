use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use timber_market_engine::{
    events::{EventHandlers, EventHooks, EventProducers},
    CartApi,
    CatalogApi,
    CustomOrderApi,
    LedgerApi,
    OrderFlowApi,
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        events,
        health,
        AcceptCustomOrderRoute,
        AdjustStockRoute,
        CancelOrderRoute,
        CartAddRoute,
        CartClearRoute,
        CartFetchRoute,
        CartRemoveRoute,
        CartUpdateRoute,
        CollectCashRoute,
        CollectCustomCashRoute,
        CreateCustomOrderRoute,
        CreateDesignRoute,
        CreateOrderRoute,
        CustomDeliverySectionsRoute,
        CustomOrdersForCustomerRoute,
        DecideBankSlipRoute,
        DesignByIdRoute,
        DesignerEarningsRoute,
        ListDesignsRoute,
        LowStockItemsRoute,
        MarketplaceDeliveryRoute,
        MarketplaceIncomeRoute,
        NotifyCustomDeliveryRoute,
        NotifyDeliveryRoute,
        OrderByIdRoute,
        OrdersForCustomerRoute,
        OrdersForDesignerRoute,
        ReleaseDesignerPaymentRoute,
        ReleaseStockRoute,
        StockItemsRoute,
        UpdateCustomOrderDeliveryRoute,
        UpdateCustomOrderStatusRoute,
        UpdateDesignRoute,
        UpdateOrderDeliveryRoute,
        UploadBankSlipRoute,
        UpsertStockItemRoute,
    },
    sse::DesignBroadcaster,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.auto_migrate {
        db.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
        info!("🚀️ Database migrations are up to date");
    }
    let broadcaster = DesignBroadcaster::new(config.event_buffer_size);
    let producers = start_event_handlers(config.event_buffer_size, broadcaster.clone()).await;
    let srv = create_server_instance(config, db, producers, broadcaster)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Wires the engine's event hooks up and spawns their handler tasks. Design updates flow into the SSE
/// broadcaster; paid orders are only logged for now.
async fn start_event_handlers(buffer_size: usize, broadcaster: DesignBroadcaster) -> EventProducers {
    let mut hooks = EventHooks::default();
    hooks.on_design_updated(move |event| {
        let broadcaster = broadcaster.clone();
        Box::pin(async move {
            broadcaster.publish(event);
        })
    });
    hooks.on_order_paid(|event| {
        Box::pin(async move {
            info!("📬️💰️ Order [{}] has been paid. Total: {}", event.order.order_id, event.order.total_amount);
        })
    });
    let handlers = EventHandlers::new(buffer_size, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    producers
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
    broadcaster: DesignBroadcaster,
) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), config.commission, config.delivery_fee, producers.clone());
        let ledger_api = LedgerApi::new(db.clone(), config.commission);
        let custom_orders_api = CustomOrderApi::new(db.clone());
        let cart_api = CartApi::new(db.clone());
        let catalog_api = CatalogApi::new(db.clone(), producers.clone());
        let api_scope = web::scope("/api")
            .service(CreateOrderRoute::<SqliteDatabase>::new())
            .service(UpdateOrderDeliveryRoute::<SqliteDatabase>::new())
            .service(CollectCashRoute::<SqliteDatabase>::new())
            .service(NotifyDeliveryRoute::<SqliteDatabase>::new())
            .service(CancelOrderRoute::<SqliteDatabase>::new())
            .service(MarketplaceDeliveryRoute::<SqliteDatabase>::new())
            .service(OrdersForDesignerRoute::<SqliteDatabase>::new())
            .service(OrdersForCustomerRoute::<SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new())
            .service(ReleaseDesignerPaymentRoute::<SqliteDatabase>::new())
            .service(MarketplaceIncomeRoute::<SqliteDatabase>::new())
            .service(DesignerEarningsRoute::<SqliteDatabase>::new())
            .service(CreateCustomOrderRoute::<SqliteDatabase>::new())
            .service(AcceptCustomOrderRoute::<SqliteDatabase>::new())
            .service(UpdateCustomOrderStatusRoute::<SqliteDatabase>::new())
            .service(UpdateCustomOrderDeliveryRoute::<SqliteDatabase>::new())
            .service(NotifyCustomDeliveryRoute::<SqliteDatabase>::new())
            .service(CollectCustomCashRoute::<SqliteDatabase>::new())
            .service(CustomDeliverySectionsRoute::<SqliteDatabase>::new())
            .service(CustomOrdersForCustomerRoute::<SqliteDatabase>::new())
            .service(UploadBankSlipRoute::<SqliteDatabase>::new())
            .service(DecideBankSlipRoute::<SqliteDatabase>::new())
            .service(CartAddRoute::<SqliteDatabase>::new())
            .service(CartUpdateRoute::<SqliteDatabase>::new())
            .service(CartRemoveRoute::<SqliteDatabase>::new())
            .service(CartClearRoute::<SqliteDatabase>::new())
            .service(CartFetchRoute::<SqliteDatabase>::new())
            .service(StockItemsRoute::<SqliteDatabase>::new())
            .service(LowStockItemsRoute::<SqliteDatabase>::new())
            .service(UpsertStockItemRoute::<SqliteDatabase>::new())
            .service(AdjustStockRoute::<SqliteDatabase>::new())
            .service(ReleaseStockRoute::<SqliteDatabase>::new())
            .service(CreateDesignRoute::<SqliteDatabase>::new())
            .service(UpdateDesignRoute::<SqliteDatabase>::new())
            .service(ListDesignsRoute::<SqliteDatabase>::new())
            .service(DesignByIdRoute::<SqliteDatabase>::new())
            .service(events);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("tmg::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(ledger_api))
            .app_data(web::Data::new(custom_orders_api))
            .app_data(web::Data::new(cart_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(broadcaster.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(api_scope)
            .service(health)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
