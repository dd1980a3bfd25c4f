pub mod bank_slips;
pub mod carts;
pub mod custom_orders;
pub mod db;
pub mod designs;
pub mod ledger;
pub mod orders;
pub mod stock_items;

use std::env;

pub use db::SqliteDatabase;
use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
    ConnectOptions,
};

use crate::db::traits::MarketGatewayError;

const SQLITE_DB_URL: &str = "sqlite://data/timber_market.db";

pub fn db_url() -> String {
    let result = env::var("TMG_DATABASE_URL").unwrap_or_else(|_| {
        info!("TMG_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, MarketGatewayError> {
    // WAL lets readers proceed while an order transaction holds the write lock.
    let options = url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5))
        .disable_statement_logging();
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}
