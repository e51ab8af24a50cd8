// src/bin/check_missing.rs
// Reports active places that have never had weather data fetched.

use anyhow::Context;
use std::process;
use weather_finder::config::Config;
use weather_finder::report::{self, RED, RESET};
use weather_finder::services::{Diagnostics, SupabaseClient};

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env();
    weather_finder::init_logging(&config.log_level);

    let client = SupabaseClient::from_config(&config).context("Supabase is not configured")?;

    let missing = Diagnostics::check_missing(&client)
        .await
        .context("Missing-weather check failed")?;

    print!("{}", report::render_missing_weather(&missing));
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}❌ {:#}{}", RED, e, RESET);
        process::exit(1);
    }
}
