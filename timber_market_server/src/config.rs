use std::env;

use log::*;
use tmg_common::{parse_boolean_flag, CommissionRate, Money};

const DEFAULT_TMG_HOST: &str = "127.0.0.1";
const DEFAULT_TMG_PORT: u16 = 8360;
const DEFAULT_TMG_DATABASE_URL: &str = "sqlite://data/timber_market.db";
const DEFAULT_DELIVERY_FEE_CENTS: i64 = 25_000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_EVENT_BUFFER_SIZE: usize = 64;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The marketplace commission on every sold item, in basis points.
    pub commission: CommissionRate,
    /// The flat delivery fee added to every marketplace order.
    pub delivery_fee: Money,
    /// Where uploaded bank slips and custom-order reference images are persisted.
    pub upload_dir: String,
    /// Buffer size of the event hook channels and the SSE broadcast channel.
    pub event_buffer_size: usize,
    /// Apply pending schema migrations at boot. Disable when migrations are managed out of band.
    pub auto_migrate: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_TMG_HOST.to_string(),
            port: DEFAULT_TMG_PORT,
            database_url: DEFAULT_TMG_DATABASE_URL.to_string(),
            commission: CommissionRate::default(),
            delivery_fee: Money::from_cents(DEFAULT_DELIVERY_FEE_CENTS),
            upload_dir: DEFAULT_UPLOAD_DIR.to_string(),
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
            auto_migrate: true,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("TMG_HOST").ok().unwrap_or_else(|| DEFAULT_TMG_HOST.into());
        let port = env::var("TMG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for TMG_PORT. {e} Using the default, {DEFAULT_TMG_PORT}, instead."
                    );
                    DEFAULT_TMG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_TMG_PORT);
        let database_url = env::var("TMG_DATABASE_URL").unwrap_or_else(|_| {
            warn!("🪛️ TMG_DATABASE_URL is not set. Using the default SQLite database.");
            DEFAULT_TMG_DATABASE_URL.to_string()
        });
        let commission = env::var("TMG_COMMISSION_BPS")
            .ok()
            .and_then(|s| {
                s.parse::<u32>()
                    .map_err(|e| {
                        error!("🪛️ {s} is not a valid value for TMG_COMMISSION_BPS. {e} Using the default.");
                        e
                    })
                    .ok()
            })
            .and_then(|bps| {
                let rate = CommissionRate::new(bps);
                if rate.is_none() {
                    error!("🪛️ TMG_COMMISSION_BPS must be between 0 and 10000. Using the default.");
                }
                rate
            })
            .unwrap_or_default();
        let delivery_fee = env::var("TMG_DELIVERY_FEE_CENTS")
            .ok()
            .and_then(|s| {
                s.parse::<i64>()
                    .map_err(|e| {
                        error!("🪛️ {s} is not a valid value for TMG_DELIVERY_FEE_CENTS. {e} Using the default.");
                        e
                    })
                    .ok()
            })
            .map(Money::from_cents)
            .unwrap_or_else(|| Money::from_cents(DEFAULT_DELIVERY_FEE_CENTS));
        let upload_dir = env::var("TMG_UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string());
        let event_buffer_size = env::var("TMG_EVENT_BUFFER_SIZE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_EVENT_BUFFER_SIZE);
        let auto_migrate = parse_boolean_flag(env::var("TMG_AUTO_MIGRATE").ok(), true);
        Self { host, port, database_url, commission, delivery_fee, upload_dir, event_buffer_size, auto_migrate }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8360);
        assert_eq!(config.delivery_fee, Money::from_rupees(250));
        assert_eq!(config.commission.basis_points(), 2000);
        assert!(config.auto_migrate);
    }
}
