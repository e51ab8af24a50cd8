// src/models/saved_place.rs
// DOCUMENTATION: Places a user bookmarked in the app
// PURPOSE: Saved place record, creation request and map (GeoJSON) conversions

use crate::clock::Clock;
use chrono::{DateTime, Utc};
use geo_types::Point;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value as GeoValue};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A place saved by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SavedPlace {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub saved_at: DateTime<Utc>,
}

/// Request DTO for saving a place
/// DOCUMENTATION: saved_at is optional; the clock fills it in when absent
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSavedPlace {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SavedPlace {
    /// Build a saved place record, defaulting saved_at to the clock's now
    pub fn new(id: Uuid, user_id: Uuid, req: NewSavedPlace, clock: &dyn Clock) -> Self {
        SavedPlace {
            id,
            user_id,
            name: req.name,
            latitude: req.latitude,
            longitude: req.longitude,
            description: req.description,
            saved_at: req.saved_at.unwrap_or_else(|| clock.now()),
        }
    }

    /// Coordinates as a point (x = longitude, y = latitude)
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// GeoJSON feature for map clients
    pub fn to_feature(&self) -> Feature {
        let point = self.point();

        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), json!(self.name));
        properties.insert("description".to_string(), json!(self.description));
        properties.insert("user_id".to_string(), json!(self.user_id));
        properties.insert("saved_at".to_string(), json!(self.saved_at.to_rfc3339()));

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(GeoValue::Point(vec![point.x(), point.y()]))),
            id: Some(Id::String(self.id.to_string())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Collect saved places into a GeoJSON feature collection
pub fn saved_places_to_geojson(places: &[SavedPlace]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: places.iter().map(SavedPlace::to_feature).collect(),
        foreign_members: None,
    }
}
