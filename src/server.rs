//! HTTP front for the provider aggregator.

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::data::aggregate::Aggregator;

pub const WEATHER_DATA_PATH: &str = "/get-weather-data";
pub const LEGACY_WEATHER_DATA_PATH: &str = "/.netlify/functions/get-weather-data";

#[derive(Clone)]
pub struct ServerState {
    pub aggregator: Arc<Aggregator>,
}

/// Coordinates forwarded to providers as-is, without validation. A missing
/// key becomes an empty string and a repeated key keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coords {
    pub lat: String,
    pub lon: String,
}

impl Coords {
    pub fn from_query(mut params: HashMap<String, String>) -> Self {
        Self {
            lat: params.remove("lat").unwrap_or_default(),
            lon: params.remove("lon").unwrap_or_default(),
        }
    }
}

/// GET|POST /get-weather-data - merged provider payloads, always 200
async fn get_weather_data(
    State(state): State<ServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Map<String, Value>> {
    let coords = Coords::from_query(params);
    let report = state.aggregator.aggregate(&coords.lat, &coords.lon).await;
    let failed: Vec<&str> = report.failures().map(|(provider, _)| provider).collect();
    debug!(
        providers = report.outcomes.len(),
        failed = ?failed,
        "weather data aggregated"
    );
    Json(report.into_payload())
}

async fn health_check() -> &'static str {
    "ok"
}

pub fn create_router(aggregator: Arc<Aggregator>) -> Router {
    let state = ServerState { aggregator };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(
            WEATHER_DATA_PATH,
            get(get_weather_data).post(get_weather_data),
        )
        .route(
            LEGACY_WEATHER_DATA_PATH,
            get(get_weather_data).post(get_weather_data),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(aggregator: Arc<Aggregator>, bind: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding {bind} failed"))?;
    serve(listener, aggregator).await
}

pub async fn serve(listener: TcpListener, aggregator: Arc<Aggregator>) -> Result<()> {
    let addr = listener.local_addr().context("listener has no address")?;
    info!(%addr, providers = aggregator.providers().len(), "weather endpoint listening");
    axum::serve(listener, create_router(aggregator))
        .await
        .context("weather endpoint server failed")
}
