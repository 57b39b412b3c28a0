use anyhow::Result;
use clap::Parser;
use weather_orb::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    weather_orb::init_tracing();
    weather_orb::run(cli).await
}
