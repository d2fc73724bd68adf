//! Stormglass client for NOAA ocean current data

use super::{OceanCurrentProvider, decode_json};
use crate::config::StormglassConfig;
use crate::models::OceanCurrentSample;
use crate::{CoastcastError, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, instrument};

const PROVIDER: &str = "Stormglass";
const PARAMS: &str = "currentSpeed,currentDirection";
const SOURCE: &str = "noaa";

pub struct StormglassClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StormglassClient {
    /// Create a client; fails when no API key is configured
    pub fn new(client: Client, config: &StormglassConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CoastcastError::config("Stormglass API key is not configured"))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl OceanCurrentProvider for StormglassClient {
    #[instrument(skip(self))]
    async fn ocean_currents(
        &self,
        latitude: f64,
        longitude: f64,
        end: DateTime<Utc>,
    ) -> Result<Vec<OceanCurrentSample>> {
        debug!("Getting ocean currents for {:.4}, {:.4}", latitude, longitude);
        let start_time = Instant::now();

        let response = self
            .client
            .get(format!("{}/v2/ocean/currents/point", self.base_url))
            .query(&[
                ("lat", latitude.to_string()),
                ("lng", longitude.to_string()),
                ("params", PARAMS.to_string()),
                ("source", SOURCE.to_string()),
                ("end", end.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ])
            .header("Authorization", &self.api_key)
            .send()
            .await?;

        let body: dto::CurrentsResponse = decode_json(PROVIDER, response).await?;

        // hours without a NOAA value for both parameters carry no reading
        let samples: Vec<OceanCurrentSample> = body
            .hours
            .into_iter()
            .filter_map(|hour| {
                Some(OceanCurrentSample {
                    time: hour.time,
                    speed_ms: hour.current_speed?.noaa?,
                    direction_deg: hour.current_direction?.noaa?,
                })
            })
            .collect();

        info!(
            "Retrieved {} ocean current hours in {:.3}s",
            samples.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(samples)
    }
}

/// Stormglass response structures
mod dto {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct SourceValue {
        pub noaa: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Hour {
        pub time: Option<DateTime<Utc>>,
        pub current_speed: Option<SourceValue>,
        pub current_direction: Option<SourceValue>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentsResponse {
        #[serde(default)]
        pub hours: Vec<Hour>,
    }
}
