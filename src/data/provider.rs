use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Upper bound on one provider call, so a hung provider cannot hold the
/// merged response forever.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

const DARKSKY_URL_TEMPLATE: &str = "https://api.darksky.net/forecast/{api_key}/{lat},{lon}";

/// One upstream weather source. `url_template` may use `{lat}`, `{lon}` and
/// `{api_key}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpec {
    pub name: String,
    pub url_template: String,
}

impl ProviderSpec {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    pub fn darksky() -> Self {
        Self::new("darksky", DARKSKY_URL_TEMPLATE)
    }

    #[must_use]
    pub fn url_for(&self, lat: &str, lon: &str, api_key: &str) -> String {
        self.url_template
            .replace("{api_key}", api_key)
            .replace("{lat}", lat)
            .replace("{lon}", lon)
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {provider} failed: {source}")]
    Request {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} answered with status {status}")]
    Status {
        provider: String,
        status: StatusCode,
    },
    #[error("reading the {provider} response body failed: {source}")]
    Body {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: Client,
    api_key: String,
}

impl ProviderClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, PROVIDER_TIMEOUT)
    }

    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("reqwest client"),
            api_key: api_key.into(),
        }
    }

    /// Raw body from one provider: parsed JSON, or the text itself when it is
    /// not JSON. Anything other than 200 is a failure.
    pub async fn fetch(
        &self,
        spec: &ProviderSpec,
        lat: &str,
        lon: &str,
    ) -> Result<Value, ProviderError> {
        let url = spec.url_for(lat, lon, &self.api_key);
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|source| ProviderError::Request {
                    provider: spec.name.clone(),
                    source,
                })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProviderError::Status {
                provider: spec.name.clone(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ProviderError::Body {
                provider: spec.name.clone(),
                source,
            })?;
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
