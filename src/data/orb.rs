use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::domain::weather::{Location, WeatherSnapshot};

const ORB_ENDPOINT_URL: &str =
    "https://weather-orb.netlify.com/.netlify/functions/get-weather-data";

/// Client side of the aggregator endpoint.
#[derive(Debug, Clone)]
pub struct OrbClient {
    client: Client,
    base_url: String,
}

impl Default for OrbClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbClient {
    pub fn new() -> Self {
        Self::with_base_url(ORB_ENDPOINT_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client"),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch(&self, location: &Location) -> Result<WeatherSnapshot> {
        let response = self
            .client
            .post(&self.base_url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
            ])
            .send()
            .await
            .context("weather endpoint request failed")?
            .error_for_status()
            .context("weather endpoint returned non-success status")?;

        let payload: AggregatePayload = response
            .json()
            .await
            .context("failed to parse weather endpoint payload")?;

        let currently = payload
            .darksky
            .context("weather endpoint payload has no darksky data")?
            .currently;

        Ok(WeatherSnapshot {
            temperature: currently.temperature,
            cloud_cover: currently.cloud_cover,
            precip_intensity: currently.precip_intensity,
            wind_speed: currently.wind_speed,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AggregatePayload {
    darksky: Option<DarkskyPayload>,
}

#[derive(Debug, Deserialize)]
struct DarkskyPayload {
    currently: CurrentlyBlock,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentlyBlock {
    temperature: f64,
    #[serde(default)]
    cloud_cover: f64,
    #[serde(default)]
    precip_intensity: f64,
    #[serde(default)]
    wind_speed: f64,
}
