use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerLevel {
    High,
    Medium,
    Low,
}

impl DangerLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DangerLevel::High => "high",
            DangerLevel::Medium => "medium",
            DangerLevel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub description: String,
    pub image_url: String,
    pub heatmap_url: String,
    pub danger_level: DangerLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Danger,
    Warning,
    Info,
}

impl AlertType {
    /// Fixed mapping used for every generated alert.
    pub fn from_danger_level(level: DangerLevel) -> Self {
        match level {
            DangerLevel::High => AlertType::Danger,
            DangerLevel::Medium => AlertType::Warning,
            DangerLevel::Low => AlertType::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Danger => "danger",
            AlertType::Warning => "warning",
            AlertType::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Verified,
    Pending,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Verified => "verified",
            AlertStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub location: GeoLocation,
    pub timestamp: DateTime<Utc>,
    pub species: Species,
    pub status: AlertStatus,
}

#[derive(Debug, Clone)]
pub struct AlertTypeSummary {
    pub alert_type: AlertType,
    pub count: usize,
    pub verified: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SightingCluster {
    pub count: usize,
    pub center_lat: f64,
    pub center_lng: f64,
    pub radius_m: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn danger_levels_map_to_alert_types() {
        assert_eq!(AlertType::from_danger_level(DangerLevel::High), AlertType::Danger);
        assert_eq!(AlertType::from_danger_level(DangerLevel::Medium), AlertType::Warning);
        assert_eq!(AlertType::from_danger_level(DangerLevel::Low), AlertType::Info);
    }

    #[test]
    fn alert_type_serializes_under_type_key() {
        let species = Species {
            id: "9".to_string(),
            name: "Test Gecko".to_string(),
            scientific_name: "Testus geckonis".to_string(),
            description: "fixture".to_string(),
            image_url: "assets/species/test.jpg".to_string(),
            heatmap_url: "assets/heatmaps/test.png".to_string(),
            danger_level: DangerLevel::Low,
        };
        let alert = Alert {
            id: "1".to_string(),
            title: "t".to_string(),
            message: "m".to_string(),
            alert_type: AlertType::Info,
            location: GeoLocation {
                latitude: 25.7,
                longitude: -80.2,
                address: "Somewhere".to_string(),
            },
            timestamp: "2024-02-15T10:30:00Z".parse().unwrap(),
            species,
            status: AlertStatus::Pending,
        };

        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["type"], "info");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["timestamp"], "2024-02-15T10:30:00Z");
        assert_eq!(value["species"]["dangerLevel"], "low");
        assert_eq!(value["species"]["scientificName"], "Testus geckonis");
    }
}
