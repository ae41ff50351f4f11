use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    /// How far forward the week horizon reaches from today.
    pub horizon_months: u32,
    /// Weeks per page when browsing the horizon.
    pub week_page_size: usize,
    /// Upper bound for any single reconciliation or availability update.
    pub op_timeout_ms: u64,

    // Rate limiting
    pub rate_read_per_min: u32,
    pub rate_write_per_min: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "".to_string()),

            horizon_months: env::var("HORIZON_MONTHS")
                .unwrap_or_else(|_| "12".to_string())
                .parse()
                .unwrap(),
            week_page_size: env::var("WEEK_PAGE_SIZE")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap(),
            op_timeout_ms: env::var("OP_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap(),

            rate_read_per_min: env::var("RATE_READ_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),
            rate_write_per_min: env::var("RATE_WRITE_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),
        }
    }
}
