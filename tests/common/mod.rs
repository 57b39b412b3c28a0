#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::net::TcpListener;
use weather_orb::{
    data::{
        aggregate::Aggregator,
        provider::{ProviderClient, ProviderSpec},
    },
    server,
};

pub const TEST_API_KEY: &str = "test-key";

pub fn darksky_payload(temperature: f64, cloud_cover: f64, wind_speed: f64) -> Value {
    json!({
        "latitude": 41.6734,
        "longitude": -91.75705,
        "currently": {
            "time": 1_760_554_800,
            "summary": "Overcast",
            "temperature": temperature,
            "cloudCover": cloud_cover,
            "precipIntensity": 0.0,
            "windSpeed": wind_speed,
        }
    })
}

/// Provider spec pointed at `base` using the hosted URL shape.
pub fn mock_provider(name: &str, base: &str) -> ProviderSpec {
    ProviderSpec::new(name, format!("{base}/{name}/{{api_key}}/{{lat}},{{lon}}"))
}

/// Serves the aggregator on an ephemeral port and returns its base URL.
pub async fn spawn_endpoint(providers: Vec<ProviderSpec>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let aggregator = Aggregator::new(ProviderClient::new(TEST_API_KEY), providers);
    tokio::spawn(server::serve(listener, Arc::new(aggregator)));
    format!("http://{addr}")
}
