//! # Timber market engine public API
//!
//! The `api` module exposes the programmatic API for the market engine. The API is modular, so clients can pick
//! and choose the functionality they want, and each API only requires the backend traits it actually uses.
//!
//! * [`order_flow_api`] is the primary API for placing orders and driving them through payment, fulfilment and
//!   delivery.
//! * [`ledger_api`] covers the designer-payment ledger: recording splits, releasing payouts and income reports.
//! * [`custom_order_api`] handles bespoke commission requests and their separate lifecycle.
//! * [`cart_api`] and [`catalog_api`] cover shopping carts and the design/raw-stock catalogue.
//!
//! The pattern for using all the APIs is the same. An API instance is created by supplying a database backend that
//! implements the specific backend traits required by the API.

pub mod cart_api;
pub mod catalog_api;
pub mod custom_order_api;
pub mod ledger_api;
pub mod order_flow_api;
pub mod order_objects;

pub use cart_api::CartApi;
pub use catalog_api::CatalogApi;
pub use custom_order_api::CustomOrderApi;
pub use ledger_api::LedgerApi;
pub use order_flow_api::OrderFlowApi;
