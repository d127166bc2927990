use crate::models::{DangerLevel, Species};

pub const BURMESE_PYTHON_ID: &str = "1";
pub const FERAL_HOGS_ID: &str = "2";
pub const CANE_TOADS_ID: &str = "3";
pub const GREEN_IGUANA_ID: &str = "4";

const CATALOG: [(&str, &str, &str, &str, &str, DangerLevel); 6] = [
    (
        "1",
        "Burmese Python",
        "Python bivittatus",
        "Large constrictor established across the Everglades. Preys on native mammals and wading birds and can exceed 18 feet in length.",
        "burmese-python",
        DangerLevel::High,
    ),
    (
        "2",
        "Feral Hogs",
        "Sus scrofa",
        "Travel in sounders that root up farmland and wetlands. Aggressive when cornered and carriers of swine brucellosis.",
        "feral-hogs",
        DangerLevel::High,
    ),
    (
        "3",
        "Cane Toads",
        "Rhinella marina",
        "Secrete bufotoxin from glands behind the head. Contact can be fatal to dogs and cats within hours.",
        "cane-toads",
        DangerLevel::Medium,
    ),
    (
        "4",
        "Green Iguana",
        "Iguana iguana",
        "Herbivorous lizard that burrows into seawalls, canal banks and sidewalks, undermining infrastructure.",
        "green-iguana",
        DangerLevel::Low,
    ),
    (
        "5",
        "Argentine Tegu",
        "Salvator merianae",
        "Omnivorous lizard that raids the nests of alligators, crocodiles and ground-nesting birds.",
        "argentine-tegu",
        DangerLevel::Medium,
    ),
    (
        "6",
        "Giant African Land Snail",
        "Lissachatina fulica",
        "Consumes over 500 plant species and can carry rat lungworm, a parasite harmful to humans.",
        "giant-african-land-snail",
        DangerLevel::Medium,
    ),
];

/// The monitored species, in display order.
pub fn species() -> Vec<Species> {
    CATALOG
        .iter()
        .map(|(id, name, scientific_name, description, slug, danger_level)| Species {
            id: id.to_string(),
            name: name.to_string(),
            scientific_name: scientific_name.to_string(),
            description: description.to_string(),
            image_url: format!("assets/species/{slug}.jpg"),
            heatmap_url: format!("assets/heatmaps/{slug}.png"),
            danger_level: *danger_level,
        })
        .collect()
}

pub fn find_by_id<'a>(catalog: &'a [Species], id: &str) -> Option<&'a Species> {
    catalog.iter().find(|species| species.id == id)
}

/// Case-insensitive match on the display name.
pub fn find_by_name<'a>(catalog: &'a [Species], name: &str) -> Option<&'a Species> {
    let needle = name.trim();
    catalog
        .iter()
        .find(|species| species.name.eq_ignore_ascii_case(needle))
}
