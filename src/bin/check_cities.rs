// src/bin/check_cities.rs
// Looks up city names in the places table (case-insensitive substring match).
// Usage: check_cities [NAME...]   (defaults to a built-in list)

use anyhow::Context;
use std::env;
use std::process;
use weather_finder::config::Config;
use weather_finder::report::{self, RED, RESET};
use weather_finder::services::{Diagnostics, SupabaseClient, DEFAULT_CITIES};

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env();
    weather_finder::init_logging(&config.log_level);

    let client = SupabaseClient::from_config(&config).context("Supabase is not configured")?;

    let mut cities: Vec<String> = env::args().skip(1).collect();
    if cities.is_empty() {
        cities = DEFAULT_CITIES.iter().map(|c| c.to_string()).collect();
    }

    let lookups = Diagnostics::check_cities(&client, &cities)
        .await
        .context("City lookup failed")?;

    print!("{}", report::render_city_lookups(&lookups));
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}❌ {:#}{}", RED, e, RESET);
        process::exit(1);
    }
}
