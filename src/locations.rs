use rand::Rng;

use crate::models::GeoLocation;

pub const FALLBACK_ADDRESS: &str = "Miami-Dade County";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingRegion {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.south..=self.north).contains(&latitude) && (self.west..=self.east).contains(&longitude)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let latitude = self.south + rng.random::<f64>() * (self.north - self.south);
        let longitude = self.west + rng.random::<f64>() * (self.east - self.west);
        (latitude, longitude)
    }
}

/// North Miami Beach to Homestead, Everglades to Miami Beach.
pub const MIAMI_DADE: BoundingRegion = BoundingRegion {
    north: 25.9918,
    south: 25.5916,
    east: -80.1324,
    west: -80.8779,
};

#[derive(Debug, Clone, Copy)]
pub struct KeyLocation {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl KeyLocation {
    pub fn to_geo(&self) -> GeoLocation {
        GeoLocation {
            latitude: self.latitude,
            longitude: self.longitude,
            address: self.name.to_string(),
        }
    }
}

const fn key(name: &'static str, latitude: f64, longitude: f64) -> KeyLocation {
    KeyLocation {
        name,
        latitude,
        longitude,
    }
}

pub const PYTHON_LOCATIONS: [KeyLocation; 4] = [
    key("Everglades National Park - Shark Valley", 25.7617, -80.7650),
    key("Big Cypress National Preserve - Loop Road", 25.8989, -80.8779),
    key("Everglades Safari Park Area", 25.7623, -80.7045),
    key("Tamiami Trail West", 25.7580, -80.8234),
];

pub const HOG_LOCATIONS: [KeyLocation; 4] = [
    key("Homestead Agricultural Area - SW 344th St", 25.5916, -80.5550),
    key("Kendall-West Agricultural District", 25.7087, -80.5570),
    key("South Dade Wetlands", 25.5234, -80.5123),
    key("Florida City Agricultural Zone", 25.4467, -80.4789),
];

pub const TOAD_LOCATIONS: [KeyLocation; 4] = [
    key("Miami Springs - Circle Area", 25.8575, -80.2781),
    key("Coral Gables - Granada Golf Course", 25.7215, -80.2684),
    key("Pinecrest Gardens", 25.6667, -80.3001),
    key("Matheson Hammock Park", 25.6803, -80.2744),
];

pub const IGUANA_LOCATIONS: [KeyLocation; 4] = [
    key("Key Biscayne - Bill Baggs Cape", 25.6891, -80.1628),
    key("Virginia Key Beach Park", 25.7466, -80.1324),
    key("South Beach - South Pointe Park", 25.7825, -80.1324),
    key("Crandon Park Marina", 25.7075, -80.1562),
];

/// Curated sighting spots for flagship species, keyed on display name.
pub fn curated_locations(species_name: &str) -> Option<&'static [KeyLocation]> {
    match species_name {
        "Burmese Python" => Some(&PYTHON_LOCATIONS),
        "Feral Hogs" => Some(&HOG_LOCATIONS),
        "Cane Toads" => Some(&TOAD_LOCATIONS),
        "Green Iguana" => Some(&IGUANA_LOCATIONS),
        _ => None,
    }
}

pub fn resolve_location<R: Rng + ?Sized>(species_name: &str, rng: &mut R) -> GeoLocation {
    match curated_locations(species_name) {
        Some(locations) if !locations.is_empty() => {
            locations[rng.random_range(0..locations.len())].to_geo()
        }
        _ => {
            let (latitude, longitude) = MIAMI_DADE.sample(rng);
            GeoLocation {
                latitude,
                longitude,
                address: FALLBACK_ADDRESS.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn curated_species_resolve_to_named_spots() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let location = resolve_location("Cane Toads", &mut rng);
            assert!(TOAD_LOCATIONS.iter().any(|spot| spot.name == location.address
                && spot.latitude == location.latitude
                && spot.longitude == location.longitude));
        }
    }

    #[test]
    fn uncurated_species_fall_inside_region() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let location = resolve_location("Argentine Tegu", &mut rng);
            assert_eq!(location.address, FALLBACK_ADDRESS);
            assert!(MIAMI_DADE.contains(location.latitude, location.longitude));
        }
    }

    #[test]
    fn unknown_names_use_fallback() {
        let mut rng = StdRng::seed_from_u64(3);
        let location = resolve_location("burmese python", &mut rng);
        assert_eq!(location.address, FALLBACK_ADDRESS);
    }

    #[test]
    fn region_contains_its_corners() {
        assert!(MIAMI_DADE.contains(MIAMI_DADE.south, MIAMI_DADE.west));
        assert!(MIAMI_DADE.contains(MIAMI_DADE.north, MIAMI_DADE.east));
        assert!(!MIAMI_DADE.contains(25.4467, -80.4789));
    }
}
