//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will
//! cause the current worker to stop processing new requests. For this reason, any long, non-cpu-bound operation
//! (e.g. I/O, database operations, etc.) should be expressed as futures or asynchronous functions.

use std::str::FromStr;

use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use serde_json::json;
use timber_market_engine::{
    db_types::{CustomOrderStatus, NewDesign, NewStockItem, OrderId},
    order_objects::DeliverySection,
    CartApi,
    CartManagement,
    CatalogApi,
    CatalogManagement,
    CustomOrderApi,
    CustomOrderManagement,
    LedgerApi,
    LedgerManagement,
    MarketGatewayDatabase,
    OrderFlowApi,
    OrderManagement,
};

use crate::{
    config::ServerConfig,
    data_objects::{
        AcceptCustomOrderParams,
        CartClearParams,
        CartItemParams,
        CartLineParams,
        CustomOrderStatusParams,
        DeliveryStatusParams,
        JsonResponse,
        NewCustomOrderRequest,
        NewOrderRequest,
        OrderCreatedResponse,
        OrderIdParams,
        ReleasePaymentParams,
        SectionQuery,
        SlipDecisionParams,
        SlipUploadParams,
        StockAdjustParams,
        StockReleaseParams,
        UpdateDeliveryStatusParams,
    },
    errors::ServerError,
    sse::DesignBroadcaster,
    uploads::save_upload,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

fn parse_section(query: &SectionQuery) -> Result<DeliverySection, ServerError> {
    DeliverySection::from_str(&query.section).map_err(|e| ServerError::InvalidRequestPath(e.to_string()))
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Events  ----------------------------------------------------
/// The `designUpdated` SSE stream. Each subscriber gets every event published after it connected; missed events
/// are never replayed.
#[get("/events")]
pub async fn events(broadcaster: web::Data<DesignBroadcaster>) -> impl Responder {
    debug!("💻️ New designUpdated subscriber");
    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(broadcaster.event_stream())
}

// ----------------------------------------------   Orders  ----------------------------------------------------

route!(create_order => Post "/orders/create" impl MarketGatewayDatabase);
/// Places a marketplace order. Stock is reserved atomically for every line item; the response carries the
/// generated order id and the server-computed total (item prices come from the catalogue, never the client).
pub async fn create_order<B: MarketGatewayDatabase>(
    body: web::Json<NewOrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    debug!("💻️ POST create_order for {} with {} items", req.customer_email, req.items.len());
    let placed = api.place_order(&req.customer_email, req.payment_method, req.items).await?;
    Ok(HttpResponse::Ok().json(OrderCreatedResponse {
        success: true,
        order_id: placed.order.order_id,
        total_amount: placed.order.total_amount,
    }))
}

route!(update_order_delivery => Put "/orders/update-status" impl MarketGatewayDatabase);
/// Advances the delivery sub-machine for a marketplace order. Completing delivery is blocked for COD orders
/// until cash has been collected.
pub async fn update_order_delivery<B: MarketGatewayDatabase>(
    body: web::Json<UpdateDeliveryStatusParams>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    debug!("💻️ PUT delivery status {} for {}", params.delivery_status, params.order_id);
    let order = api.advance_delivery_status(&params.order_id, params.delivery_status).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "order": order })))
}

route!(collect_cash => Post "/orders/collect-cash" impl MarketGatewayDatabase);
pub async fn collect_cash<B: MarketGatewayDatabase>(
    body: web::Json<OrderIdParams>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let oid = body.into_inner().order_id;
    debug!("💻️ POST collect_cash for {oid}");
    let order = api.collect_cash(&oid).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "order": order })))
}

route!(notify_delivery => Post "/orders/notify-delivery" impl MarketGatewayDatabase);
/// The unified ready-for-delivery transition: marks the order ready and assigns it to the courier queue in one
/// atomic step.
pub async fn notify_delivery<B: MarketGatewayDatabase>(
    body: web::Json<OrderIdParams>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let oid = body.into_inner().order_id;
    debug!("💻️ POST notify_delivery for {oid}");
    let order = api.notify_delivery(&oid).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "order": order })))
}

route!(cancel_order => Post "/orders/cancel" impl MarketGatewayDatabase);
pub async fn cancel_order<B: MarketGatewayDatabase>(
    body: web::Json<OrderIdParams>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let oid = body.into_inner().order_id;
    debug!("💻️ POST cancel_order for {oid}");
    let order = api.cancel_order(&oid).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "order": order })))
}

route!(marketplace_delivery => Get "/orders/delivery/marketplace" impl OrderManagement);
/// The courier dashboard buckets: `?section=ready|on|completed`.
pub async fn marketplace_delivery<B: OrderManagement>(
    query: web::Query<SectionQuery>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let section = parse_section(&query)?;
    debug!("💻️ GET marketplace delivery section {section}");
    let orders = api.orders_in_delivery_section(section).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "orders": orders })))
}

route!(orders_for_designer => Get "/orders/designer/{email}" impl OrderManagement);
/// A designer's sold line items with per-item earnings and release state attached.
pub async fn orders_for_designer<B: OrderManagement>(
    path: web::Path<String>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let email = path.into_inner();
    debug!("💻️ GET orders for designer {email}");
    let lines = api.orders_for_designer(&email).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "orders": lines })))
}

route!(orders_for_customer => Get "/orders/customer/{email}" impl OrderManagement);
pub async fn orders_for_customer<B: OrderManagement>(
    path: web::Path<String>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let email = path.into_inner();
    debug!("💻️ GET orders for customer {email}");
    let orders = api.orders_for_customer(&email).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "orders": orders })))
}

route!(order_by_id => Get "/orders/id/{order_id}" impl OrderManagement);
pub async fn order_by_id<B: OrderManagement>(
    path: web::Path<String>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let oid = OrderId(path.into_inner());
    debug!("💻️ GET order {oid}");
    match api.order_with_items(&oid).await? {
        Some(order) => Ok(HttpResponse::Ok().json(json!({ "success": true, "order": order }))),
        None => Ok(HttpResponse::NotFound().json(JsonResponse::failure(format!("Order {oid} not found")))),
    }
}

// ----------------------------------------------   Financial  -------------------------------------------------

route!(release_designer_payment => Post "/financial/release-designer-payment" impl LedgerManagement);
/// The one-shot payout release. A second release of the same ledger row is a 409 and leaves the row untouched.
pub async fn release_designer_payment<B: LedgerManagement>(
    body: web::Json<ReleasePaymentParams>,
    api: web::Data<LedgerApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    debug!("💻️ POST release payment for {} item {}", params.order_id, params.order_item_id);
    let entry = api.release_payment(&params.order_id, params.order_item_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "entry": entry })))
}

route!(marketplace_income => Get "/financial/marketplace-income" impl LedgerManagement);
pub async fn marketplace_income<B: LedgerManagement>(
    api: web::Data<LedgerApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET marketplace income");
    let income = api.marketplace_income().await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "rows": income.rows, "totals": income.totals })))
}

route!(designer_earnings => Get "/financial/designer-earnings/{email}" impl LedgerManagement);
pub async fn designer_earnings<B: LedgerManagement>(
    path: web::Path<String>,
    api: web::Data<LedgerApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let email = path.into_inner();
    debug!("💻️ GET earnings for designer {email}");
    let earnings = api.designer_earnings(&email).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "designer_email": earnings.designer_email,
        "rows": earnings.rows,
        "totals": earnings.totals,
    })))
}

// ----------------------------------------------   Custom orders  ---------------------------------------------

route!(create_custom_order => Post "/customOrder/create" impl CustomOrderManagement);
/// Submits a bespoke commission request. An optional base64 reference image is persisted under the upload dir.
pub async fn create_custom_order<B: CustomOrderManagement>(
    body: web::Json<NewCustomOrderRequest>,
    api: web::Data<CustomOrderApi<B>>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    debug!("💻️ POST create_custom_order for {}", req.customer_email);
    let reference_image_path =
        req.reference_image.as_ref().map(|img| save_upload(&config.upload_dir, "custom", img)).transpose()?;
    let order = api
        .submit_request(timber_market_engine::db_types::NewCustomOrder {
            customer_email: req.customer_email,
            material: req.material,
            board_color: req.board_color,
            board_size: req.board_size,
            board_thickness: req.board_thickness,
            description: req.description,
            reference_image_path,
            estimated_price: req.estimated_price,
            payment_method: req.payment_method,
        })
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "order": order })))
}

route!(accept_custom_order => Put "/customOrder/{id}/accept" impl CustomOrderManagement);
pub async fn accept_custom_order<B: CustomOrderManagement>(
    path: web::Path<String>,
    body: web::Json<AcceptCustomOrderParams>,
    api: web::Data<CustomOrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let oid = OrderId(path.into_inner());
    let final_price = body.into_inner().final_price;
    debug!("💻️ PUT accept custom order {oid} at {final_price}");
    let order = api.accept(&oid, final_price).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "order": order })))
}

route!(update_custom_order_status => Put "/customOrder/{id}/status" impl CustomOrderManagement);
pub async fn update_custom_order_status<B: CustomOrderManagement>(
    path: web::Path<String>,
    body: web::Json<CustomOrderStatusParams>,
    api: web::Data<CustomOrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let oid = OrderId(path.into_inner());
    let status = body.into_inner().status;
    debug!("💻️ PUT custom order {oid} status {status:?}");
    let order = match status {
        // Acceptance carries a price and has its own endpoint.
        CustomOrderStatus::Accepted => {
            return Err(ServerError::InvalidRequestBody(
                "Use the accept endpoint to accept a custom order with its final price".to_string(),
            ));
        },
        other => api.update_status(&oid, other).await?,
    };
    Ok(HttpResponse::Ok().json(json!({ "success": true, "order": order })))
}

route!(update_custom_order_delivery => Put "/customOrder/{id}/delivery-status" impl CustomOrderManagement);
pub async fn update_custom_order_delivery<B: CustomOrderManagement>(
    path: web::Path<String>,
    body: web::Json<DeliveryStatusParams>,
    api: web::Data<CustomOrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let oid = OrderId(path.into_inner());
    let status = body.into_inner().delivery_status;
    debug!("💻️ PUT custom order {oid} delivery status {status}");
    let order = api.advance_delivery_status(&oid, status).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "order": order })))
}

route!(notify_custom_delivery => Post "/customOrder/{id}/notify-delivery" impl CustomOrderManagement);
pub async fn notify_custom_delivery<B: CustomOrderManagement>(
    path: web::Path<String>,
    api: web::Data<CustomOrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let oid = OrderId(path.into_inner());
    debug!("💻️ POST notify delivery for custom order {oid}");
    let order = api.notify_delivery(&oid).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "order": order })))
}

route!(collect_custom_cash => Post "/customOrder/{id}/collect-cash" impl CustomOrderManagement);
pub async fn collect_custom_cash<B: CustomOrderManagement>(
    path: web::Path<String>,
    api: web::Data<CustomOrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let oid = OrderId(path.into_inner());
    debug!("💻️ POST collect cash for custom order {oid}");
    let order = api.collect_cash(&oid).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "order": order })))
}

route!(custom_delivery_sections => Get "/customOrder/delivery" impl CustomOrderManagement);
pub async fn custom_delivery_sections<B: CustomOrderManagement>(
    query: web::Query<SectionQuery>,
    api: web::Data<CustomOrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let section = parse_section(&query)?;
    debug!("💻️ GET custom order delivery section {section}");
    let orders = api.orders_in_delivery_section(section).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "orders": orders })))
}

route!(custom_orders_for_customer => Get "/customOrder/customer/{email}" impl CustomOrderManagement);
pub async fn custom_orders_for_customer<B: CustomOrderManagement>(
    path: web::Path<String>,
    api: web::Data<CustomOrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let email = path.into_inner();
    debug!("💻️ GET custom orders for {email}");
    let orders = api.orders_for_customer(&email).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "orders": orders })))
}

// ----------------------------------------------   Bank slips  ------------------------------------------------

route!(upload_bank_slip => Post "/bankSlip/upload" impl MarketGatewayDatabase);
/// Persists the uploaded slip image and attaches a pending slip record to the bank-transfer order.
pub async fn upload_bank_slip<B: MarketGatewayDatabase>(
    body: web::Json<SlipUploadParams>,
    api: web::Data<OrderFlowApi<B>>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    debug!("💻️ POST bank slip upload for {}", params.order_id);
    let path = save_upload(&config.upload_dir, "slips", &params.slip)?;
    let slip = api.attach_bank_slip(&params.order_id, &path).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "slip": slip })))
}

route!(decide_bank_slip => Put "/bankSlip/{id}/status" impl MarketGatewayDatabase);
/// Approves or rejects a pending slip. Approval marks the order paid and confirmed and records the designer
/// ledger entries.
pub async fn decide_bank_slip<B: MarketGatewayDatabase>(
    path: web::Path<i64>,
    body: web::Json<SlipDecisionParams>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let slip_id = path.into_inner();
    let approve = body.into_inner().approve;
    debug!("💻️ PUT bank slip {slip_id} decision: approve={approve}");
    let (slip, order) = api.decide_bank_slip(slip_id, approve).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "slip": slip, "order": order })))
}

// ----------------------------------------------   Carts  -----------------------------------------------------

route!(cart_add => Post "/cart/add" impl CartManagement);
pub async fn cart_add<B: CartManagement>(
    body: web::Json<CartItemParams>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    trace!("💻️ POST cart add for {}", params.email);
    let cart = api.add_item(&params.email, params.design_id, params.quantity).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "cart": cart })))
}

route!(cart_update => Post "/cart/update" impl CartManagement);
pub async fn cart_update<B: CartManagement>(
    body: web::Json<CartItemParams>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    trace!("💻️ POST cart update for {}", params.email);
    let cart = api.set_item_quantity(&params.email, params.design_id, params.quantity).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "cart": cart })))
}

route!(cart_remove => Post "/cart/remove" impl CartManagement);
pub async fn cart_remove<B: CartManagement>(
    body: web::Json<CartLineParams>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    trace!("💻️ POST cart remove for {}", params.email);
    let cart = api.remove_item(&params.email, params.design_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "cart": cart })))
}

route!(cart_clear => Post "/cart/clear" impl CartManagement);
pub async fn cart_clear<B: CartManagement>(
    body: web::Json<CartClearParams>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let email = body.into_inner().email;
    trace!("💻️ POST cart clear for {email}");
    api.clear(&email).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Cart cleared")))
}

route!(cart_fetch => Get "/cart/{email}" impl CartManagement);
pub async fn cart_fetch<B: CartManagement>(
    path: web::Path<String>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let email = path.into_inner();
    trace!("💻️ GET cart for {email}");
    let cart = api.cart(&email).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "cart": cart })))
}

// ----------------------------------------------   Inventory  -------------------------------------------------

route!(stock_items => Get "/inventory/stock" impl CatalogManagement);
pub async fn stock_items<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET stock items");
    let items = api.stock_items().await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "items": items })))
}

route!(low_stock_items => Get "/inventory/stock/low" impl CatalogManagement);
pub async fn low_stock_items<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET low stock items");
    let items = api.low_stock_items().await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "items": items })))
}

route!(upsert_stock_item => Post "/inventory/stock" impl CatalogManagement);
pub async fn upsert_stock_item<B: CatalogManagement>(
    body: web::Json<NewStockItem>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let item = body.into_inner();
    debug!("💻️ POST stock item {} {}", item.material, item.board_size);
    let item = api.upsert_stock_item(item).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "item": item })))
}

route!(adjust_stock => Post "/inventory/stock/adjust" impl CatalogManagement);
pub async fn adjust_stock<B: CatalogManagement>(
    body: web::Json<StockAdjustParams>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    debug!("💻️ POST adjust stock {} by {}", params.stock_id, params.delta);
    let item = api.adjust_stock_quantity(params.stock_id, params.delta).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "item": item })))
}

route!(release_stock => Post "/inventory/stock/release" impl CatalogManagement);
/// Releases raw material to a staff designer; conflicts when there is not enough on hand.
pub async fn release_stock<B: CatalogManagement>(
    body: web::Json<StockReleaseParams>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    debug!("💻️ POST release stock {} x{}", params.stock_id, params.quantity);
    let item = api.release_stock(params.stock_id, params.quantity).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "item": item })))
}

// ----------------------------------------------   Designs  ---------------------------------------------------

route!(create_design => Post "/designs" impl CatalogManagement);
pub async fn create_design<B: CatalogManagement>(
    body: web::Json<NewDesign>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let design = body.into_inner();
    debug!("💻️ POST new design {} by {}", design.item_name, design.designer_email);
    let design = api.add_design(design).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "design": design })))
}

route!(update_design => Put "/designs/{id}" impl CatalogManagement);
/// Partial listing edit; the update is broadcast to `designUpdated` subscribers after it commits.
pub async fn update_design<B: CatalogManagement>(
    path: web::Path<i64>,
    body: web::Json<timber_market_engine::db_types::DesignUpdate>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let design_id = path.into_inner();
    debug!("💻️ PUT design {design_id}");
    let design = api.update_design(design_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "design": design })))
}

route!(list_designs => Get "/designs" impl CatalogManagement);
pub async fn list_designs<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET designs");
    let designs = api.designs().await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "designs": designs })))
}

route!(design_by_id => Get "/designs/{id}" impl CatalogManagement);
pub async fn design_by_id<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let design_id = path.into_inner();
    trace!("💻️ GET design {design_id}");
    match api.design(design_id).await? {
        Some(design) => Ok(HttpResponse::Ok().json(json!({ "success": true, "design": design }))),
        None => Ok(HttpResponse::NotFound().json(JsonResponse::failure(format!("Design {design_id} not found")))),
    }
}
