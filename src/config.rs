use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::common::LatLng;

/// Viewer settings. Every field has a default, so a config file only needs
/// the keys it wants to override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub map: MapConfig,
    pub colors: ColorConfig,
    pub ui: UiConfig,
    pub data: DataConfig,
    pub storage: StorageConfig,
    pub links: LinkConfig,
    pub geolocation: GeolocationConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub default_center: LatLng,
    pub default_zoom: u8,
    pub detail_zoom: u8,
    pub segment_zoom: u8,
    pub bounds_padding_px: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub start_point: String,
    pub normal_point: String,
    pub voting_office: String,
    pub completed_board: String,
    pub route: String,
    pub current_location: String,
    /// Recolor for districts whose boards are all done.
    pub completed_district: String,
    pub district_palette: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub walking_speed_kmh: f64,
    pub copy_feedback_ms: u32,
    pub route_info_ms: u32,
    pub notice_ms: u32,
    /// Accuracy circles are only drawn for fixes at least this precise.
    pub max_accuracy_circle_m: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub geojson_path: String,
    pub export_filename: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub key: String,
    pub max_age_hours: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub directions_base: String,
    pub travel_mode: String,
}

/// Options handed to the platform geolocation API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            colors: ColorConfig::default(),
            ui: UiConfig::default(),
            data: DataConfig::default(),
            storage: StorageConfig::default(),
            links: LinkConfig::default(),
            geolocation: GeolocationConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: LatLng::new(35.8327, 140.1451),
            default_zoom: 13,
            detail_zoom: 16,
            segment_zoom: 15,
            bounds_padding_px: 50,
        }
    }
}

const DISTRICT_PALETTE: [&str; 23] = [
    "#3b82f6", "#2563eb", "#1d4ed8", "#1e40af", "#1e3a8a",
    "#3730a3", "#4338ca", "#4f46e5", "#6366f1", "#7c3aed",
    "#8b5cf6", "#9333ea", "#a855f7", "#b91c1c", "#dc2626",
    "#ef4444", "#f87171", "#fb7185", "#f43f5e", "#e11d48",
    "#be123c", "#9f1239", "#881337",
];

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            start_point: "#FF4757".into(),
            normal_point: "#667eea".into(),
            voting_office: "#ff4757".into(),
            completed_board: "#10b981".into(),
            route: "#667eea".into(),
            current_location: "#007bff".into(),
            completed_district: "#9ca3af".into(),
            district_palette: DISTRICT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            walking_speed_kmh: 4.0,
            copy_feedback_ms: 2000,
            route_info_ms: 5000,
            notice_ms: 3000,
            max_accuracy_circle_m: 100.0,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            geojson_path: "./data/poster_board_routes.geojson".into(),
            export_filename: "poster_board_routes_data.geojson".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { key: "electionBoardState".into(), max_age_hours: 24 }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            directions_base: "https://www.google.com/maps/dir/?api=1".into(),
            travel_mode: "walking".into(),
        }
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self { enable_high_accuracy: true, timeout_ms: 10_000, maximum_age_ms: 60_000 }
    }
}

impl Config {
    /// Read a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse a config from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse config JSON")
    }

    /// Palette color for the district at `index` in selector order.
    pub fn district_color(&self, index: usize) -> &str {
        let palette = &self.colors.district_palette;
        if palette.is_empty() { return &self.colors.route }
        &palette[index % palette.len()]
    }

    pub fn max_age(&self) -> chrono::Duration {
        chrono::Duration::hours(self.storage.max_age_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = Config::from_json_str(r#"{ "ui": { "walking_speed_kmh": 5.0 } }"#).unwrap();
        assert_eq!(config.ui.walking_speed_kmh, 5.0);
        assert_eq!(config.ui.copy_feedback_ms, 2000);
        assert_eq!(config.map.detail_zoom, 16);
        assert_eq!(config.storage.key, "electionBoardState");
    }

    #[test]
    fn palette_wraps_around() {
        let config = Config::default();
        assert_eq!(config.district_color(0), "#3b82f6");
        assert_eq!(config.district_color(23), "#3b82f6");
        assert_eq!(config.district_color(24), "#2563eb");
    }

    #[test]
    fn empty_palette_falls_back_to_route_color() {
        let mut config = Config::default();
        config.colors.district_palette.clear();
        assert_eq!(config.district_color(5), config.colors.route);
    }
}
