pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod server;

#[cfg(test)]
mod test_support;

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{
    refresh::{parameter_channel, refresh_once, spawn_refresh_task},
    render::{RenderLoop, run_frames},
    settings::{api_key_from_env, load_provider_settings},
};
use cli::{Cli, Command, ServeArgs, WatchArgs};
use data::{aggregate::Aggregator, orb::OrbClient, provider::ProviderClient};

/// Installs the global subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::Watch(args) => run_watch(args).await,
    }
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let (settings, path) = load_provider_settings().context("loading provider settings failed")?;
    if let Some(path) = path {
        info!(path = %path.display(), "provider settings resolved");
    }
    let aggregator = Aggregator::new(ProviderClient::new(api_key_from_env()), settings.providers);
    server::run_server(Arc::new(aggregator), args.bind).await
}

async fn run_watch(args: WatchArgs) -> Result<()> {
    let client = match args.endpoint_url.as_deref() {
        Some(url) => OrbClient::with_base_url(url),
        None => OrbClient::new(),
    };
    let location = args.location();

    if args.one_shot {
        let params = refresh_once(&client, &location, Utc::now()).await?;
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    info!(location = %location.name, endpoint = client.base_url(), "watching weather");
    let (tx, rx) = parameter_channel();
    let refresh = spawn_refresh_task(
        client,
        location,
        Duration::from_secs(args.refresh_interval),
        tx,
    );
    let mut render = RenderLoop::new(rx);
    let result = run_frames(
        &mut render,
        args.fps,
        tokio::signal::ctrl_c(),
        |params| {
            println!("{}", serde_json::to_string(params)?);
            Ok(())
        },
    )
    .await;

    refresh.abort();
    result
}
