//! Interface contracts for market gateway database backends.
//!
//! The server and the public API structs program against these traits rather than a concrete database, so the
//! SQLite backend can be swapped out (or mocked in endpoint tests) without touching any flow logic.
//!
//! * [`MarketGatewayDatabase`] carries the transactional order flows: placement with stock reservation,
//!   cancellation, the delivery sub-machine and the bank-slip workflow.
//! * [`OrderManagement`] is the read side for orders: lookups, delivery buckets, per-role listings.
//! * [`LedgerManagement`] owns the designer-payment ledger.
//! * [`CustomOrderManagement`] drives the bespoke-order lifecycle.
//! * [`CartManagement`] and [`CatalogManagement`] cover carts, listings and raw-material stock.

mod cart_management;
mod catalog_management;
mod custom_order_management;
mod errors;
mod ledger_management;
mod market_gateway_database;
mod order_management;

pub use cart_management::CartManagement;
pub use catalog_management::CatalogManagement;
pub use custom_order_management::CustomOrderManagement;
pub use errors::MarketGatewayError;
pub use ledger_management::LedgerManagement;
pub use market_gateway_database::MarketGatewayDatabase;
pub use order_management::OrderManagement;
