// src/config/manifest.rs
// DOCUMENTATION: Mobile app manifest
// PURPOSE: Describe app identity, permissions, plugins and the secrets surfaced to the app runtime

use crate::config::Config;
use serde::Serialize;

pub const APP_NAME: &str = "Weather Finder";
pub const APP_SLUG: &str = "weather-finder";
pub const BUNDLE_IDENTIFIER: &str = "com.weatherfinder.app";

const LOCATION_USAGE: &str =
    "Weather Finder uses your location to find destinations with the weather you want.";

/// Top-level manifest document, shaped like an Expo app config
#[derive(Debug, Clone, Serialize)]
pub struct AppManifest {
    pub expo: ExpoConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpoConfig {
    pub name: String,
    pub slug: String,
    pub version: String,
    pub orientation: String,
    pub ios: IosConfig,
    pub android: AndroidConfig,
    pub plugins: Vec<String>,
    pub extra: ManifestExtra,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IosConfig {
    pub bundle_identifier: String,
    pub info_plist: IosInfoPlist,
}

#[derive(Debug, Clone, Serialize)]
pub struct IosInfoPlist {
    #[serde(rename = "NSLocationWhenInUseUsageDescription")]
    pub location_when_in_use: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AndroidConfig {
    pub package: String,
    pub permissions: Vec<String>,
}

/// Values exposed to the app at runtime
/// Empty strings stand in for unconfigured keys
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestExtra {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    #[serde(rename = "openWeatherMapApiKey")]
    pub openweathermap_api_key: String,
    pub weatherbit_api_key: String,
}

impl AppManifest {
    /// Build the manifest from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        AppManifest {
            expo: ExpoConfig {
                name: APP_NAME.to_string(),
                slug: APP_SLUG.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                orientation: "portrait".to_string(),
                ios: IosConfig {
                    bundle_identifier: BUNDLE_IDENTIFIER.to_string(),
                    info_plist: IosInfoPlist {
                        location_when_in_use: LOCATION_USAGE.to_string(),
                    },
                },
                android: AndroidConfig {
                    package: BUNDLE_IDENTIFIER.to_string(),
                    permissions: vec![
                        "ACCESS_FINE_LOCATION".to_string(),
                        "ACCESS_COARSE_LOCATION".to_string(),
                    ],
                },
                plugins: vec!["expo-location".to_string()],
                extra: ManifestExtra {
                    supabase_url: config.supabase_url.clone(),
                    supabase_anon_key: config.supabase_anon_key.clone(),
                    openweathermap_api_key: config.openweathermap_api_key.clone(),
                    weatherbit_api_key: config.weatherbit_api_key.clone(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_surfaces_configured_keys() {
        let config = Config::from_lookup(|key| match key {
            "SUPABASE_URL" => Some("https://demo.supabase.co".to_string()),
            "OPENWEATHERMAP_API_KEY" => Some("owm".to_string()),
            _ => None,
        });

        let value = serde_json::to_value(AppManifest::from_config(&config)).unwrap();
        let extra = &value["expo"]["extra"];

        assert_eq!(extra["supabaseUrl"], "https://demo.supabase.co");
        assert_eq!(extra["openWeatherMapApiKey"], "owm");
        assert_eq!(extra["supabaseAnonKey"], "");
        assert_eq!(extra["weatherbitApiKey"], "");
    }

    #[test]
    fn test_manifest_requests_location_permissions() {
        let config = Config::from_lookup(|_| None);
        let value = serde_json::to_value(AppManifest::from_config(&config)).unwrap();

        let permissions = value["expo"]["android"]["permissions"].as_array().unwrap();
        assert_eq!(permissions.len(), 2);
        assert_eq!(value["expo"]["plugins"][0], "expo-location");
        assert!(value["expo"]["ios"]["infoPlist"]["NSLocationWhenInUseUsageDescription"].is_string());
    }
}
