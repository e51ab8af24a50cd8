// src/models/place.rs
// DOCUMENTATION: Rows of the externally owned places table and weather view
// PURPOSE: Typed deserialization targets for the Supabase REST diagnostics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an external place row; the schema may use integers or text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaceId {
    Int(i64),
    Text(String),
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceId::Int(id) => write!(f, "{}", id),
            PlaceId::Text(id) => f.write_str(id),
        }
    }
}

/// Columns selected from `places`
pub const PLACE_COLUMNS: &str =
    "id,name,latitude,longitude,country_code,is_active,last_weather_fetch";

/// Columns selected from `places_with_latest_weather`
pub const PLACE_WEATHER_COLUMNS: &str = "id,name,latitude,longitude,country_code,is_active,\
     last_weather_fetch,temperature,weather_description,population,attractiveness_score";

/// A row of the `places` table
/// DOCUMENTATION: Every column is optional so narrower selects still decode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceRecord {
    pub id: Option<PlaceId>,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country_code: Option<String>,
    pub is_active: Option<bool>,
    /// Raw timestamp text as returned by PostgREST
    pub last_weather_fetch: Option<String>,
}

/// A row of the `places_with_latest_weather` view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceWithWeather {
    #[serde(flatten)]
    pub place: PlaceRecord,
    pub temperature: Option<f64>,
    pub weather_description: Option<String>,
    pub population: Option<i64>,
    pub attractiveness_score: Option<f64>,
}

/// Projection used when only the country is needed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CountryCodeRow {
    pub country_code: Option<String>,
}

impl PlaceRecord {
    /// "lat, lon" formatted for reports, or "?" when coordinates are missing
    pub fn coordinates_label(&self) -> String {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => format!("{:.4}, {:.4}", lat, lon),
            _ => "?".to_string(),
        }
    }
}
