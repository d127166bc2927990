use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use rand::Rng;

use crate::catalog::{self, BURMESE_PYTHON_ID, CANE_TOADS_ID, FERAL_HOGS_ID, GREEN_IGUANA_ID};
use crate::locations::{self, HOG_LOCATIONS, IGUANA_LOCATIONS, PYTHON_LOCATIONS, TOAD_LOCATIONS};
use crate::models::{Alert, AlertStatus, AlertType, GeoLocation, Species};

pub const DEFAULT_RECENT_COUNT: usize = 3;
pub const SEED_ALERT_COUNT: usize = 4;

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub synthetic_count: usize,
    pub window_days: i64,
    pub verified_probability: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            synthetic_count: 26,
            window_days: 30,
            verified_probability: 0.7,
        }
    }
}

/// The full alert collection, most recent first. Immutable once built.
#[derive(Debug, Clone)]
pub struct AlertFeed {
    species: Vec<Species>,
    alerts: Vec<Alert>,
}

impl AlertFeed {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Self {
        Self::generate_with(rng, now, &FeedConfig::default())
    }

    pub fn generate_with<R: Rng + ?Sized>(
        rng: &mut R,
        now: DateTime<Utc>,
        config: &FeedConfig,
    ) -> Self {
        let species = catalog::species();
        let mut alerts = seed_alerts(&species);
        let seed_count = alerts.len();

        for index in 0..config.synthetic_count {
            alerts.push(synthetic_alert(index, &species, rng, now, config));
        }

        debug!(
            "generated {} seed and {} synthetic alerts relative to {}",
            seed_count,
            config.synthetic_count,
            now.to_rfc3339()
        );

        Self::from_alerts(species, alerts)
    }

    /// Wraps an existing alert set, sorting it most recent first.
    pub fn from_alerts(species: Vec<Species>, mut alerts: Vec<Alert>) -> Self {
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { species, alerts }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn recent(&self, count: usize) -> &[Alert] {
        &self.alerts[..count.min(self.alerts.len())]
    }

    pub fn by_type(&self, alert_type: AlertType) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|alert| alert.alert_type == alert_type)
            .collect()
    }

    pub fn by_status(&self, status: AlertStatus) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|alert| alert.status == status)
            .collect()
    }

    pub fn for_species(&self, species_id: &str) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|alert| alert.species.id == species_id)
            .collect()
    }
}

/// Per-species message templates. Anything without a bespoke template
/// gets `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTemplate {
    Python,
    FeralHog,
    CaneToad,
    Iguana,
    Generic,
}

impl AlertTemplate {
    pub fn for_species(species: &Species) -> Self {
        match species.id.as_str() {
            BURMESE_PYTHON_ID => AlertTemplate::Python,
            FERAL_HOGS_ID => AlertTemplate::FeralHog,
            CANE_TOADS_ID => AlertTemplate::CaneToad,
            GREEN_IGUANA_ID => AlertTemplate::Iguana,
            _ => AlertTemplate::Generic,
        }
    }

    /// Returns `(title, message)`.
    pub fn render<R: Rng + ?Sized>(
        &self,
        species: &Species,
        location: &GeoLocation,
        rng: &mut R,
    ) -> (String, String) {
        let report_number = rng.random_range(0..1000);
        match self {
            AlertTemplate::Python => (
                format!("Python Alert: {}", location.address),
                format!(
                    "FWC Notification #{}: {} Burmese Python(s) spotted by park ranger. Size estimate: {}ft. Last seen near coordinate markers {:.4}°N, {:.4}°W. Report sightings to 1-888-IVE-GOT1.",
                    report_number,
                    rng.random_range(1..=3),
                    rng.random_range(8..16),
                    location.latitude,
                    location.longitude.abs(),
                ),
            ),
            AlertTemplate::FeralHog => (
                format!("Agricultural Damage Report: {}", location.address),
                format!(
                    "Crop Protection Unit Report #{}: Feral hog activity detected. Group size: {} animals. Affected area: {}.5 acres. Current status: {}. Control teams dispatched.",
                    report_number,
                    rng.random_range(5..20),
                    rng.random_range(1..=2),
                    if rng.random_bool(0.5) { "Active" } else { "Recently departed" },
                ),
            ),
            AlertTemplate::CaneToad => (
                format!("Cane Toad Population Alert: {}", location.address),
                format!(
                    "Environmental Health Notice #{}: {} Cane Toads identified in residential area. Risk Level: {}. Pet owners advised to maintain vigilance. Report concentrations to Animal Services: 305-418-7000.",
                    report_number,
                    rng.random_range(10..40),
                    if rng.random_bool(0.5) { "Moderate" } else { "High" },
                ),
            ),
            AlertTemplate::Iguana => (
                format!("Iguana Burrow Report: {}", location.address),
                format!(
                    "Public Works Notice #{}: {} Green Iguanas observed near shoreline structures with {} active burrow(s). Seawall inspection scheduled. Report new burrows to 305-361-5207.",
                    report_number,
                    rng.random_range(2..10),
                    rng.random_range(1..=4),
                ),
            ),
            AlertTemplate::Generic => (
                format!("{} Activity: {}", species.name, location.address),
                format!(
                    "Wildlife Alert #{}: Increased {} activity reported. Public advised to maintain safe distance and report unusual behavior to FWC at 1-888-404-FWCC.",
                    report_number, species.name,
                ),
            ),
        }
    }
}

/// Hand-authored alerts always present in the feed. Their `type` is
/// curated and not derived from the species danger level.
pub fn seed_alerts(species: &[Species]) -> Vec<Alert> {
    let seeds = [
        (
            "1",
            BURMESE_PYTHON_ID,
            "URGENT: Large Python Cluster at Shark Valley",
            "FWC Alert: Multiple Burmese Pythons (12-15 individuals) spotted near Shark Valley Visitor Center. Park rangers have confirmed a potential breeding site. Visitors should maintain minimum 50ft distance. Report sightings to 1-888-IVE-GOT1. Area temporarily restricted for public safety. Coordinates: 25.7617°N, 80.7650°W",
            AlertType::Danger,
            PYTHON_LOCATIONS[0],
            // 2024-02-15T10:30:00Z
            1_707_993_000,
        ),
        (
            "2",
            FERAL_HOGS_ID,
            "Critical: Feral Hog Damage in Homestead",
            "Miami-Dade Agricultural Division Report #2024-089: Extensive crop damage by feral hog group (est. 20-25 animals) in Homestead farming district. Damage radius: ~2.5 miles. Affected crops: tomatoes, squash. Estimated damage: $75,000. Agricultural workers advised to exercise caution. Control measures being implemented. Emergency hotline: 305-248-3311",
            AlertType::Warning,
            HOG_LOCATIONS[0],
            // 2024-02-14T15:45:00Z
            1_707_925_500,
        ),
        (
            "3",
            CANE_TOADS_ID,
            "Health Advisory: Cane Toad Surge in Miami Springs",
            "Miami-Dade Health Department Notice: Significant increase in Cane Toad population around Miami Springs Circle Area. 47 specimens counted in recent survey. Pet owners advised to keep animals leashed and avoid dawn/dusk walks. Symptoms of pet exposure: excessive drooling, seizures, heat. Emergency vet contact: 305-666-4142. Report dense populations to Animal Services.",
            AlertType::Warning,
            TOAD_LOCATIONS[0],
            // 2024-02-13T20:15:00Z
            1_707_855_300,
        ),
        (
            "4",
            GREEN_IGUANA_ID,
            "Infrastructure Alert: Iguana Damage at Key Biscayne",
            "Key Biscayne Public Works Alert #KBI-24-156: Significant seawall erosion detected due to Green Iguana burrowing. Location: Bill Baggs Cape Florida State Park. Multiple burrow systems identified. Structural assessment underway. Public advised to report new burrow sightings to 305-361-5207. Temporary barriers being installed.",
            AlertType::Warning,
            IGUANA_LOCATIONS[0],
            // 2024-02-12T09:20:00Z
            1_707_729_600,
        ),
    ];

    seeds
        .into_iter()
        .filter_map(|(id, species_id, title, message, alert_type, spot, epoch_secs)| {
            let Some(species) = catalog::find_by_id(species, species_id) else {
                warn!("seed alert {id} skipped: species {species_id} is not in the catalog");
                return None;
            };
            Some(Alert {
                id: id.to_string(),
                title: title.to_string(),
                message: message.to_string(),
                alert_type,
                location: spot.to_geo(),
                timestamp: DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(epoch_secs),
                species: species.clone(),
                status: AlertStatus::Verified,
            })
        })
        .collect()
}

/// Builds the `index`-th generated alert. Ids continue after the seeds.
pub fn synthetic_alert<R: Rng + ?Sized>(
    index: usize,
    species: &[Species],
    rng: &mut R,
    now: DateTime<Utc>,
    config: &FeedConfig,
) -> Alert {
    let picked = &species[rng.random_range(0..species.len())];
    let location = locations::resolve_location(&picked.name, rng);
    let (title, message) = AlertTemplate::for_species(picked).render(picked, &location, rng);

    let window_ms = Duration::days(config.window_days.max(0)).num_milliseconds();
    let offset_ms = (rng.random::<f64>() * window_ms as f64) as i64;
    let status = if rng.random::<f64>() < config.verified_probability {
        AlertStatus::Verified
    } else {
        AlertStatus::Pending
    };

    Alert {
        id: (index + SEED_ALERT_COUNT + 1).to_string(),
        title,
        message,
        alert_type: AlertType::from_danger_level(picked.danger_level),
        location,
        timestamp: now - Duration::milliseconds(offset_ms),
        species: picked.clone(),
        status,
    }
}
