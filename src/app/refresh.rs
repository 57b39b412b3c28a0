use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, warn};

use crate::{
    data::orb::OrbClient,
    domain::{
        daylight::classify,
        palette::PaletteError,
        visual::{VisualParameters, map_weather},
        weather::{Location, WeatherSnapshot},
    },
};

pub type ParameterSender = watch::Sender<Option<VisualParameters>>;
pub type ParameterReceiver = watch::Receiver<Option<VisualParameters>>;

pub fn parameter_channel() -> (ParameterSender, ParameterReceiver) {
    watch::channel(None)
}

pub fn compute_parameters(
    snapshot: &WeatherSnapshot,
    location: &Location,
    now: DateTime<Utc>,
) -> Result<VisualParameters, PaletteError> {
    let reading = classify(now, location);
    map_weather(snapshot, &reading)
}

pub async fn refresh_once(
    client: &OrbClient,
    location: &Location,
    now: DateTime<Utc>,
) -> Result<VisualParameters> {
    let snapshot = client.fetch(location).await?;
    Ok(compute_parameters(&snapshot, location, now)?)
}

/// Fetches immediately, then once per `period`. A failed cycle publishes
/// nothing; the receiver keeps the previous snapshot. Stops once every
/// receiver is gone.
pub fn spawn_refresh_task(
    client: OrbClient,
    location: Location,
    period: Duration,
    tx: ParameterSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period.max(Duration::from_millis(10)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if tx.is_closed() {
                break;
            }
            match refresh_once(&client, &location, Utc::now()).await {
                Ok(params) => {
                    debug!(phase = params.phase.label(), hue = params.hue_angle, "weather refreshed");
                    if tx.send(Some(params)).is_err() {
                        break;
                    }
                }
                Err(err) => warn!(error = %format!("{err:#}"), "weather refresh failed"),
            }
        }
    })
}
