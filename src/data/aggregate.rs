//! Fan-out to every configured provider and merge what comes back.

use futures::future::join_all;
use serde_json::{Map, Value};
use tracing::warn;

use super::provider::{ProviderClient, ProviderError, ProviderSpec};

#[derive(Debug)]
pub struct ProviderOutcome {
    pub provider: String,
    pub result: Result<Value, ProviderError>,
}

/// Every provider's outcome, in configured order.
#[derive(Debug, Default)]
pub struct AggregateReport {
    pub outcomes: Vec<ProviderOutcome>,
}

impl AggregateReport {
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ProviderError)> {
        self.outcomes.iter().filter_map(|outcome| {
            outcome
                .result
                .as_ref()
                .err()
                .map(|err| (outcome.provider.as_str(), err))
        })
    }

    /// Partial-success merge: failed providers are simply left out.
    pub fn into_payload(self) -> Map<String, Value> {
        self.outcomes
            .into_iter()
            .filter_map(|outcome| outcome.result.ok().map(|body| (outcome.provider, body)))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    client: ProviderClient,
    providers: Vec<ProviderSpec>,
}

impl Aggregator {
    pub fn new(client: ProviderClient, providers: Vec<ProviderSpec>) -> Self {
        Self { client, providers }
    }

    pub fn providers(&self) -> &[ProviderSpec] {
        &self.providers
    }

    /// Calls all providers concurrently and waits for every one to settle.
    pub async fn aggregate(&self, lat: &str, lon: &str) -> AggregateReport {
        let calls = self.providers.iter().map(|spec| async move {
            let result = self.client.fetch(spec, lat, lon).await;
            if let Err(err) = &result {
                warn!(provider = %spec.name, error = %err, "weather provider call failed");
            }
            ProviderOutcome {
                provider: spec.name.clone(),
                result,
            }
        });

        AggregateReport {
            outcomes: join_all(calls).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;

    fn failed(provider: &str) -> ProviderOutcome {
        ProviderOutcome {
            provider: provider.to_string(),
            result: Err(ProviderError::Status {
                provider: provider.to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            }),
        }
    }

    #[test]
    fn payload_drops_failed_providers() {
        let report = AggregateReport {
            outcomes: vec![
                ProviderOutcome {
                    provider: "darksky".to_string(),
                    result: Ok(json!({"currently": {"temperature": 50.0}})),
                },
                failed("openweathermap"),
            ],
        };

        let failures: Vec<_> = report.failures().map(|(name, _)| name).collect();
        assert_eq!(failures, vec!["openweathermap"]);

        let payload = report.into_payload();
        assert_eq!(payload.len(), 1);
        assert!(payload.contains_key("darksky"));
        assert!(!payload.contains_key("openweathermap"));
    }

    #[test]
    fn all_failures_yield_empty_object() {
        let report = AggregateReport {
            outcomes: vec![failed("darksky")],
        };
        assert!(report.into_payload().is_empty());
    }
}
