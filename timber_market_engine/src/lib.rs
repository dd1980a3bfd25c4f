//! Timber Market Engine
//!
//! The Timber Market Engine contains the core logic for a wood-art marketplace: catalogue designs, shopping carts,
//! order placement with atomic stock reservation, cash-on-delivery and bank-transfer payment flows, the delivery
//! pipeline, bespoke commission requests and the designer-payment ledger.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@db`]). SQLite is the supported backend. You should never need to
//!    access the database directly. Instead, use the public API provided by the engine. The exception is the data
//!    types used in the database, which are defined in the `db_types` module and are public.
//! 2. The engine public API ([`mod@api`]). This provides the public-facing functionality of the marketplace:
//!    orders, carts, the catalogue, custom commissions and the ledger. Specific backends need to implement the
//!    traits in [`mod@db`] in order to act as a backend for the market server.
//!
//! The engine also provides a set of events that can be subscribed to. These events are emitted when certain
//! actions occur, for example a `DesignUpdatedEvent` whenever a listing's price or stock changes. A simple actor
//! framework is used so that you can hook into these events and perform custom actions.
pub mod api;
pub mod db;
pub mod db_types;
pub mod events;
pub mod helpers;

#[cfg(feature = "sqlite")]
pub mod test_utils;

pub use api::{order_objects, CartApi, CatalogApi, CustomOrderApi, LedgerApi, OrderFlowApi};
#[cfg(feature = "sqlite")]
pub use db::sqlite::SqliteDatabase;
pub use db::traits::{
    CartManagement,
    CatalogManagement,
    CustomOrderManagement,
    LedgerManagement,
    MarketGatewayDatabase,
    MarketGatewayError,
    OrderManagement,
};
