//! AviationStack live flight pass-through

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::{FlightDataProvider, base_url};
use crate::config::ProvidersConfig;
use crate::{Result, SkyRouteError};

const PROVIDER: &str = "aviationstack";

/// `GET {aviation_base_url}/flights`
pub struct AviationStackClient {
    client: Client,
    base_url: String,
    access_key: String,
    limit: u32,
}

impl AviationStackClient {
    pub fn new(client: Client, config: &ProvidersConfig, limit: u32) -> Self {
        Self {
            client,
            base_url: base_url(&config.aviation_base_url).to_string(),
            access_key: config.aviation_api_key.clone().unwrap_or_default(),
            limit,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FlightsResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

#[async_trait]
impl FlightDataProvider for AviationStackClient {
    #[instrument(skip(self))]
    async fn live_flights(&self, flight_number: Option<&str>) -> Result<Option<Vec<Value>>> {
        let mut url = format!(
            "{}/flights?access_key={}&limit={}",
            self.base_url,
            urlencoding::encode(&self.access_key),
            self.limit
        );
        if let Some(flight) = flight_number {
            url.push_str("&flight_iata=");
            url.push_str(&urlencoding::encode(flight));
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body: FlightsResponse = response.json().await.map_err(|e| {
            SkyRouteError::provider(PROVIDER, format!("Invalid flights response: {e}"))
        })?;

        match body.data {
            Some(records) if status.is_success() && !records.is_empty() => {
                info!("Fetched {} live flight records", records.len());
                Ok(Some(records))
            }
            _ => {
                warn!("Flight provider answered {} without usable data", status);
                Ok(None)
            }
        }
    }
}
