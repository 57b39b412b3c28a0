use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};

use crate::domain::weather::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE, Location};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "weather-orb",
    version,
    about = "Weather-driven ambient orb: aggregation endpoint and shader parameters"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Serve the weather aggregation endpoint
    Serve(ServeArgs),
    /// Poll the endpoint and drive the orb's parameters
    Watch(WatchArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8888")]
    pub bind: SocketAddr,
}

#[derive(Debug, Args, Clone)]
pub struct WatchArgs {
    /// Latitude of the orb's location
    #[arg(long, default_value_t = DEFAULT_LATITUDE, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the orb's location
    #[arg(long, default_value_t = DEFAULT_LONGITUDE, allow_negative_numbers = true)]
    pub lon: f64,

    /// Aggregation endpoint URL override
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Refresh interval in seconds
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub refresh_interval: u64,

    /// Target frame rate of the render loop (1..60)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(1..=60))]
    pub fps: u8,

    /// Fetch once, print the parameters and exit
    #[arg(long)]
    pub one_shot: bool,
}

impl WatchArgs {
    #[must_use]
    pub fn location(&self) -> Location {
        Location::from_coords(self.lat, self.lon)
    }
}
