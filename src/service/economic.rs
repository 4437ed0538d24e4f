use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::{Duration, timeout};

use crate::config::EconomicConfig;
use crate::error::{Error, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicData {
    pub inflation: IndicatorEstimate,
    pub fixed_deposit: DepositEstimate,
    pub blue_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorEstimate {
    pub monthly: f64,
    pub source: String,
    pub last_update: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositEstimate {
    pub annual_rate: f64,
    pub source: String,
    pub last_update: DateTime<Utc>,
}

// Reference-dollar payload; only the selling price is used.
#[derive(Deserialize)]
struct BlueRatePayload {
    venta: f64,
}

/// Uncached passthrough combining the reference-dollar rate with configured
/// macro estimates.
pub struct EconomicService {
    http: reqwest::Client,
    config: EconomicConfig,
    timeout: Duration,
}

impl EconomicService {
    pub fn new(http: reqwest::Client, config: EconomicConfig, timeout: Duration) -> Self {
        EconomicService {
            http,
            config,
            timeout,
        }
    }

    pub async fn get_economic_data(&self) -> Result<EconomicData> {
        let fetch = async {
            let response = self
                .http
                .get(&self.config.blue_url)
                .send()
                .await
                .map_err(|e| Error::EconomicDataUnavailable(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(Error::EconomicDataUnavailable(format!(
                    "upstream returned HTTP {}",
                    status.as_u16()
                )));
            }

            response
                .json::<BlueRatePayload>()
                .await
                .map_err(|e| Error::EconomicDataUnavailable(e.to_string()))
        };

        let payload = timeout(self.timeout, fetch).await.map_err(|_| {
            Error::EconomicDataUnavailable(format!(
                "request timed out after {} ms",
                self.timeout.as_millis()
            ))
        })??;

        let now = Utc::now();
        Ok(EconomicData {
            inflation: IndicatorEstimate {
                monthly: self.config.inflation_monthly,
                source: "historical estimate".to_string(),
                last_update: now,
            },
            fixed_deposit: DepositEstimate {
                annual_rate: self.config.fixed_deposit_annual_rate,
                source: "average of local banks".to_string(),
                last_update: now,
            },
            blue_rate: payload.venta,
        })
    }
}
