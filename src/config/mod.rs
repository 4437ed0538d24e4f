pub mod loader;

pub use loader::AppConfig;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub public_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_dir: "public".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub pair: String,
    pub timeout_ms: u64,
    pub reference_source: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        UpstreamConfig {
            base_url: "https://criptoya.com/api".to_string(),
            pair: "USDT/ARS/1".to_string(),
            timeout_ms: crate::DEFAULT_UPSTREAM_TIMEOUT_MS,
            reference_source: "binancep2p".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CacheConfig {
    pub ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            ttl_ms: crate::DEFAULT_CACHE_TTL_MS,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EconomicConfig {
    pub blue_url: String,
    pub inflation_monthly: f64,
    pub fixed_deposit_annual_rate: f64,
}

impl Default for EconomicConfig {
    fn default() -> Self {
        EconomicConfig {
            blue_url: "https://dolarapi.com/v1/dolares/blue".to_string(),
            inflation_monthly: 8.5,
            fixed_deposit_annual_rate: 110.0,
        }
    }
}
