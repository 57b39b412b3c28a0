use std::{future::Future, time::Duration};

use anyhow::Result;
use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior, interval};
use tracing::{debug, trace};

use super::refresh::ParameterReceiver;
use crate::domain::visual::VisualParameters;

/// Values handed to the orb's shader uniforms for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameUniforms {
    pub time: f64,
    pub rotation_y: f64,
    pub weather_color: f64,
    pub daylight_value: f64,
    pub saturation: f64,
    pub precip_intensity: f64,
    pub wind_speed: f64,
    pub noise_multiplier: f64,
    pub background_lightness: u8,
}

impl FrameUniforms {
    /// Shader defaults used until the first weather snapshot lands.
    #[must_use]
    pub fn initial(time: f64) -> Self {
        Self {
            time,
            rotation_y: time / 4.0,
            weather_color: 0.0,
            daylight_value: 1.0,
            saturation: 1.0,
            precip_intensity: 1.5,
            wind_speed: 0.25,
            noise_multiplier: 1.0,
            background_lightness: 95,
        }
    }

    #[must_use]
    pub fn from_parameters(params: &VisualParameters, time: f64) -> Self {
        Self {
            time,
            rotation_y: time / 4.0,
            weather_color: params.hue_angle,
            daylight_value: params.daylight_value,
            saturation: params.saturation,
            precip_intensity: params.precip_intensity,
            wind_speed: params.wind_speed,
            noise_multiplier: params.noise_multiplier,
            background_lightness: params.background_lightness,
        }
    }
}

/// Render-side state. Reads whatever snapshot the refresh task published
/// last and never blocks on it.
#[derive(Debug)]
pub struct RenderLoop {
    rx: ParameterReceiver,
    current: Option<VisualParameters>,
    snapshots_applied: u64,
}

impl RenderLoop {
    pub fn new(rx: ParameterReceiver) -> Self {
        Self {
            rx,
            current: None,
            snapshots_applied: 0,
        }
    }

    pub fn frame(&mut self, time: f64) -> FrameUniforms {
        self.pick_up_snapshot();
        match &self.current {
            Some(params) => FrameUniforms::from_parameters(params, time),
            None => FrameUniforms::initial(time),
        }
    }

    pub fn parameters(&self) -> Option<&VisualParameters> {
        self.current.as_ref()
    }

    pub fn snapshots_applied(&self) -> u64 {
        self.snapshots_applied
    }

    fn pick_up_snapshot(&mut self) {
        // Ref::has_changed still reports an unseen value after the writer is dropped.
        let latest = self.rx.borrow_and_update();
        if !latest.has_changed() {
            return;
        }
        let Some(params) = *latest else {
            return;
        };
        drop(latest);

        debug!(phase = ?params.phase, "render loop picked up new parameters");
        self.current = Some(params);
        self.snapshots_applied += 1;
    }
}

/// Ticks `render` at `fps` until `shutdown` resolves, handing every newly
/// applied snapshot to `on_snapshot`. `shutdown` is polled across frames, so
/// a signal that lands between ticks is not lost.
pub async fn run_frames<F>(
    render: &mut RenderLoop,
    fps: u8,
    shutdown: F,
    mut on_snapshot: impl FnMut(&VisualParameters) -> Result<()>,
) -> Result<()>
where
    F: Future,
{
    let started = Instant::now();
    let mut ticker = interval(Duration::from_millis(1000 / u64::from(fps.max(1))));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);
    let mut reported = render.snapshots_applied();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let uniforms = render.frame(started.elapsed().as_secs_f64());
                trace!(?uniforms, "frame");
                if render.snapshots_applied() != reported {
                    reported = render.snapshots_applied();
                    if let Some(params) = render.parameters() {
                        on_snapshot(params)?;
                    }
                }
            }
            _ = &mut shutdown => return Ok(()),
        }
    }
}
