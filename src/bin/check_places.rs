// src/bin/check_places.rs
// Prints place counts, the per-country distribution and the most attractive places.

use anyhow::Context;
use std::process;
use weather_finder::config::Config;
use weather_finder::report::{self, RED, RESET};
use weather_finder::services::{Diagnostics, SupabaseClient};

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env();
    weather_finder::init_logging(&config.log_level);

    let client = SupabaseClient::from_config(&config).context("Supabase is not configured")?;

    let overview = Diagnostics::check_places(&client)
        .await
        .context("Places check failed")?;

    print!("{}", report::render_places_overview(&overview));
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}❌ {:#}{}", RED, e, RESET);
        process::exit(1);
    }
}
