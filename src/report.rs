// src/report.rs
// DOCUMENTATION: Console rendering for the diagnostic binaries
// PURPOSE: Turn diagnostic results into human-readable text

use crate::services::{CityLookup, CountryTally, MissingWeatherReport, PlacesOverview};
use std::fmt::Write;

// --- ANSI colours for the terminal ---
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

const RULE: &str = "──────────────────────────────────────────────────────────────";

/// Rows shown in a country distribution
const COUNTRY_ROWS: usize = 15;

pub fn header(title: &str) -> String {
    format!("{}{}\n  {}\n{}{}\n", CYAN, RULE, title, RULE, RESET)
}

pub fn render_country_table(tally: &CountryTally) -> String {
    let mut out = String::new();

    if tally.is_empty() {
        let _ = writeln!(out, "  (no records)");
        return out;
    }

    let _ = writeln!(out, "  {:<10} {:>8} {:>8}", "Country", "Places", "Share");
    for (code, count) in tally.sorted_desc().into_iter().take(COUNTRY_ROWS) {
        let share = count as f64 * 100.0 / tally.total() as f64;
        let _ = writeln!(out, "  {:<10} {:>8} {:>7.1}%", code, count, share);
    }
    if tally.len() > COUNTRY_ROWS {
        let _ = writeln!(out, "  ... and {} more countries", tally.len() - COUNTRY_ROWS);
    }
    out
}

pub fn render_city_lookups(lookups: &[CityLookup]) -> String {
    let mut out = header("City lookup (places)");
    let mut found = 0;

    for lookup in lookups {
        if lookup.found() {
            found += 1;
            let _ = writeln!(
                out,
                "{}✅ {}{}: {} match(es)",
                GREEN,
                lookup.query,
                RESET,
                lookup.matches.len()
            );
            for place in &lookup.matches {
                let _ = writeln!(
                    out,
                    "    • {} [{}] ({}) active={}",
                    place.name,
                    place.country_code.as_deref().unwrap_or("??"),
                    place.coordinates_label(),
                    place.is_active.map_or("?".to_string(), |a| a.to_string())
                );
            }
        } else {
            let _ = writeln!(out, "{}❌ {}{}: not found", RED, lookup.query, RESET);
        }
    }

    let _ = writeln!(
        out,
        "\n{}{} of {} cities found{}",
        BOLD,
        found,
        lookups.len(),
        RESET
    );
    out
}

pub fn render_missing_weather(report: &MissingWeatherReport) -> String {
    let mut out = header("Places missing weather data");

    let colour = if report.missing_count == 0 { GREEN } else { YELLOW };
    let _ = writeln!(out, "  Active places:          {}", report.active_places);
    let _ = writeln!(
        out,
        "  Never fetched weather:  {}{}{}",
        colour, report.missing_count, RESET
    );
    let _ = writeln!(out, "  Weather coverage:       {:.1}%", report.coverage_percent());

    if report.missing_count == 0 {
        let _ = writeln!(out, "\n{}✨ Every active place has weather data{}", GREEN, RESET);
        return out;
    }

    let _ = writeln!(out, "\n{}By country{}", BOLD, RESET);
    out.push_str(&render_country_table(&report.by_country));

    let _ = writeln!(out, "\n{}Sample ({} rows){}", BOLD, report.sample.len(), RESET);
    for place in &report.sample {
        let _ = writeln!(
            out,
            "    • {} [{}] ({})",
            place.name,
            place.country_code.as_deref().unwrap_or("??"),
            place.coordinates_label()
        );
    }
    out
}

pub fn render_places_overview(overview: &PlacesOverview) -> String {
    let mut out = header("Places overview");
    let snapshot = &overview.snapshot;

    let _ = writeln!(out, "  Total places:     {}", snapshot.total);
    let _ = writeln!(out, "  Active places:    {}{}{}", GREEN, snapshot.active, RESET);
    let _ = writeln!(out, "  Inactive places:  {}", snapshot.inactive());
    if !snapshot.reconciles() {
        let _ = writeln!(
            out,
            "{}⚠️  Active count exceeds total; counts were taken from different snapshots{}",
            YELLOW, RESET
        );
    }

    let _ = writeln!(out, "\n{}Active places by country{}", BOLD, RESET);
    out.push_str(&render_country_table(&overview.by_country));

    let _ = writeln!(out, "\n{}Top places by attractiveness{}", BOLD, RESET);
    if overview.top_places.is_empty() {
        let _ = writeln!(out, "  (no rows in places_with_latest_weather)");
    }
    for (i, row) in overview.top_places.iter().enumerate() {
        let temperature = row
            .temperature
            .map_or("?".to_string(), |t| format!("{:.1}°C", t));
        let _ = writeln!(
            out,
            "  {:>2}. {:<28} {:<4} {:>8}  {:<20} pop={} score={}",
            i + 1,
            row.place.name,
            row.place.country_code.as_deref().unwrap_or("??"),
            temperature,
            row.weather_description.as_deref().unwrap_or("-"),
            row.population.map_or("?".to_string(), |p| p.to_string()),
            row.attractiveness_score
                .map_or("?".to_string(), |s| format!("{:.2}", s)),
        );
    }
    out
}
