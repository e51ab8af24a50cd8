// src/services/diagnostics.rs
// DOCUMENTATION: Data-quality checks over the hosted places tables
// PURPOSE: Query, aggregate and hand back report structs; rendering lives in report.rs

use crate::errors::FinderError;
use crate::models::{
    CountryCodeRow, PlaceRecord, PlaceWithWeather, PLACE_COLUMNS, PLACE_WEATHER_COLUMNS,
};
use crate::services::{Query, SupabaseClient};
use serde::Serialize;
use std::collections::HashMap;

pub const PLACES_TABLE: &str = "places";
pub const WEATHER_VIEW: &str = "places_with_latest_weather";

/// Cities looked up by check_cities when none are given
pub const DEFAULT_CITIES: [&str; 10] = [
    "Paris",
    "London",
    "New York",
    "Tokyo",
    "Barcelona",
    "Sydney",
    "Rome",
    "Lisbon",
    "Cape Town",
    "Rio de Janeiro",
];

const CITY_MATCH_LIMIT: u64 = 10;
const MISSING_SAMPLE_LIMIT: u64 = 20;
const TOP_PLACES_LIMIT: u64 = 10;

/// Count of records per country code
/// DOCUMENTATION: Records without a code are counted under UNKNOWN, so
/// total() always equals the number of records added.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CountryTally {
    counts: HashMap<String, u64>,
    total: u64,
}

impl CountryTally {
    pub const UNKNOWN: &'static str = "UNKNOWN";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut tally = Self::new();
        for code in codes {
            tally.add(code.as_ref().map(|c| c.as_ref()));
        }
        tally
    }

    pub fn add(&mut self, code: Option<&str>) {
        let key = match code.map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => Self::UNKNOWN.to_string(),
        };
        *self.counts.entry(key).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn get(&self, code: &str) -> u64 {
        self.counts.get(code).copied().unwrap_or(0)
    }

    /// Number of records tallied
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct countries
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// (code, count) by count descending; equal counts by code ascending
    pub fn sorted_desc(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(code, count)| (code.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

/// Total and active row counts of the places table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivitySnapshot {
    pub total: u64,
    pub active: u64,
}

impl ActivitySnapshot {
    pub fn inactive(&self) -> u64 {
        self.total.saturating_sub(self.active)
    }

    /// False when the two counts came from inconsistent snapshots
    pub fn reconciles(&self) -> bool {
        self.active <= self.total
    }
}

/// Result of looking up one city name
#[derive(Debug, Clone, Serialize)]
pub struct CityLookup {
    pub query: String,
    pub matches: Vec<PlaceRecord>,
}

impl CityLookup {
    pub fn found(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Active places that never had weather fetched
#[derive(Debug, Clone, Serialize)]
pub struct MissingWeatherReport {
    pub active_places: u64,
    pub missing_count: u64,
    pub sample: Vec<PlaceRecord>,
    pub by_country: CountryTally,
}

impl MissingWeatherReport {
    /// Share of active places that do have weather, in percent
    pub fn coverage_percent(&self) -> f64 {
        if self.active_places == 0 {
            return 100.0;
        }
        let covered = self.active_places.saturating_sub(self.missing_count);
        covered as f64 * 100.0 / self.active_places as f64
    }
}

/// Overall state of the places table and weather view
#[derive(Debug, Clone, Serialize)]
pub struct PlacesOverview {
    pub snapshot: ActivitySnapshot,
    pub by_country: CountryTally,
    pub top_places: Vec<PlaceWithWeather>,
}

/// Diagnostic checks
/// DOCUMENTATION: Each check runs its queries sequentially and stops at the
/// first failed query.
pub struct Diagnostics;

impl Diagnostics {
    /// Case-insensitive name lookup for each city
    /// DOCUMENTATION: Names are trimmed and blank names skipped, since an
    /// empty pattern matches every row. No usable name at all is InvalidInput.
    pub async fn check_cities(
        client: &SupabaseClient,
        cities: &[String],
    ) -> Result<Vec<CityLookup>, FinderError> {
        let names: Vec<&str> = cities
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        if names.len() < cities.len() {
            log::warn!("Skipping {} blank city name(s)", cities.len() - names.len());
        }
        if names.is_empty() {
            return Err(FinderError::InvalidInput(
                "No non-blank city names given".to_string(),
            ));
        }

        let mut lookups = Vec::with_capacity(names.len());

        for city in names {
            let query = Query::new()
                .select(PLACE_COLUMNS)
                .ilike("name", city)
                .limit(CITY_MATCH_LIMIT);
            let matches: Vec<PlaceRecord> = client.fetch(PLACES_TABLE, &query).await?;

            log::info!("City '{}': {} matches", city, matches.len());
            lookups.push(CityLookup {
                query: city.to_string(),
                matches,
            });
        }

        Ok(lookups)
    }

    /// Active places whose last_weather_fetch is NULL
    pub async fn check_missing(client: &SupabaseClient) -> Result<MissingWeatherReport, FinderError> {
        let active = Query::new().eq("is_active", true);
        let missing = active.clone().is_null("last_weather_fetch");

        let active_places = client.count(PLACES_TABLE, &active).await?;
        let missing_count = client.count(PLACES_TABLE, &missing).await?;

        let sample_query = missing
            .clone()
            .select(PLACE_COLUMNS)
            .order("name", false)
            .limit(MISSING_SAMPLE_LIMIT);
        let sample: Vec<PlaceRecord> = client.fetch(PLACES_TABLE, &sample_query).await?;

        let rows: Vec<CountryCodeRow> = client
            .fetch_all(
                PLACES_TABLE,
                &missing.select("country_code").order("id", false),
            )
            .await?;
        let by_country = CountryTally::from_codes(rows.into_iter().map(|r| r.country_code));

        log::info!(
            "Missing weather: {} of {} active places",
            missing_count,
            active_places
        );

        Ok(MissingWeatherReport {
            active_places,
            missing_count,
            sample,
            by_country,
        })
    }

    /// Counts, per-country distribution and the most attractive places
    pub async fn check_places(client: &SupabaseClient) -> Result<PlacesOverview, FinderError> {
        let total = client.count(PLACES_TABLE, &Query::new()).await?;
        let active = client
            .count(PLACES_TABLE, &Query::new().eq("is_active", true))
            .await?;
        let snapshot = ActivitySnapshot { total, active };

        if !snapshot.reconciles() {
            log::warn!(
                "Inconsistent counts: {} active out of {} total",
                active,
                total
            );
        }

        let rows: Vec<CountryCodeRow> = client
            .fetch_all(
                PLACES_TABLE,
                &Query::new()
                    .select("country_code")
                    .eq("is_active", true)
                    .order("id", false),
            )
            .await?;
        let by_country = CountryTally::from_codes(rows.into_iter().map(|r| r.country_code));

        let top_places: Vec<PlaceWithWeather> = client
            .fetch(
                WEATHER_VIEW,
                &Query::new()
                    .select(PLACE_WEATHER_COLUMNS)
                    .order("attractiveness_score", true)
                    .limit(TOP_PLACES_LIMIT),
            )
            .await?;

        Ok(PlacesOverview {
            snapshot,
            by_country,
            top_places,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_scenario() {
        let tally = CountryTally::from_codes(
            ["US", "US", "CA", "MX", "US"].iter().map(|c| Some(*c)),
        );

        assert_eq!(tally.get("US"), 3);
        assert_eq!(tally.get("CA"), 1);
        assert_eq!(tally.get("MX"), 1);
        assert_eq!(tally.len(), 3);
        assert_eq!(
            tally.sorted_desc(),
            vec![
                ("US".to_string(), 3),
                ("CA".to_string(), 1),
                ("MX".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_tally_counts_sum_to_input_length() {
        let codes = vec![
            Some("FR"),
            None,
            Some("FR"),
            Some(""),
            Some("JP"),
            Some("BR"),
            Some("JP"),
            Some("FR"),
        ];
        let tally = CountryTally::from_codes(codes.clone());

        let sum: u64 = tally.sorted_desc().iter().map(|(_, n)| n).sum();
        assert_eq!(sum, codes.len() as u64);
        assert_eq!(tally.total(), codes.len() as u64);
        assert_eq!(tally.get(CountryTally::UNKNOWN), 2);
    }

    #[test]
    fn test_tally_sorted_is_non_increasing() {
        let codes = ["DE", "IT", "DE", "ES", "IT", "DE", "PT", "ES", "ES", "ES"];
        let sorted = CountryTally::from_codes(codes.iter().map(|c| Some(*c))).sorted_desc();

        assert!(sorted.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(sorted[0], ("ES".to_string(), 4));
    }

    #[test]
    fn test_empty_tally() {
        let tally = CountryTally::from_codes(Vec::<Option<&str>>::new());
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
        assert!(tally.sorted_desc().is_empty());
    }

    #[test]
    fn test_snapshot_reconciles() {
        let snapshot = ActivitySnapshot { total: 120, active: 97 };
        assert!(snapshot.reconciles());
        assert_eq!(snapshot.active + snapshot.inactive(), snapshot.total);

        let skewed = ActivitySnapshot { total: 10, active: 11 };
        assert!(!skewed.reconciles());
        assert_eq!(skewed.inactive(), 0);
    }

    #[test]
    fn test_coverage_percent() {
        let report = MissingWeatherReport {
            active_places: 200,
            missing_count: 50,
            sample: Vec::new(),
            by_country: CountryTally::new(),
        };
        assert!((report.coverage_percent() - 75.0).abs() < f64::EPSILON);

        let empty = MissingWeatherReport {
            active_places: 0,
            ..report
        };
        assert!((empty.coverage_percent() - 100.0).abs() < f64::EPSILON);
    }
}
