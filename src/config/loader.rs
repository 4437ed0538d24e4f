use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::config::{CacheConfig, EconomicConfig, ServerConfig, UpstreamConfig};
use crate::error::{Error, Result};
use crate::quotes::SourceConfig;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub economic: EconomicConfig,
    pub sources: Vec<SourceConfig>,
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("QUOTEPROXY"))
            .build()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The reference source must be one of the configured sources.
    pub fn reference_source(&self) -> Result<SourceConfig> {
        self.sources
            .iter()
            .find(|s| s.id == self.upstream.reference_source)
            .cloned()
            .ok_or_else(|| {
                Error::ConfigError(format!(
                    "reference source '{}' is not in the source list",
                    self.upstream.reference_source
                ))
            })
    }

    fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(Error::ConfigError(
                "at least one quote source must be configured".to_string(),
            ));
        }
        self.reference_source().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_sources(ids: &[&str]) -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            cache: CacheConfig::default(),
            economic: EconomicConfig::default(),
            sources: ids
                .iter()
                .map(|id| SourceConfig {
                    id: id.to_string(),
                    name: id.to_string(),
                    icon: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn reference_source_resolves_from_the_list() {
        let config = config_with_sources(&["binancep2p", "ripio"]);
        assert_eq!(config.reference_source().unwrap().id, "binancep2p");
    }

    #[test]
    fn unknown_reference_source_is_a_config_error() {
        let config = config_with_sources(&["ripio"]);
        assert!(matches!(
            config.reference_source(),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn empty_source_list_fails_validation() {
        let config = config_with_sources(&[]);
        assert!(config.validate().is_err());
    }
}
