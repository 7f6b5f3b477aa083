//! Static carbon-footprint table, kg CO2e per kg of ingredient.
//!
//! Entries keep their definition order. The fuzzy tier scans in that order and
//! takes the first hit, so reordering entries changes which key wins for
//! names that contain (or are contained in) several keys.

use std::collections::HashMap;
use std::sync::LazyLock;

const CARBON_ENTRIES: &[(&str, f64)] = &[
    // Proteins
    ("beef", 27.0),
    ("lamb", 39.2),
    ("mutton", 39.2),
    ("pork", 12.1),
    ("chicken", 6.1),
    ("turkey", 10.9),
    ("duck", 9.8),
    ("salmon", 11.9),
    ("tuna", 6.1),
    ("fish", 5.4),
    ("shrimp", 11.8),
    ("prawns", 11.8),
    ("eggs", 4.8),
    ("tofu", 3.0),
    ("lentils", 0.9),
    ("chickpeas", 0.8),
    ("beans", 2.0),
    ("peas", 0.9),
    ("nuts", 0.3),
    // Grains
    ("rice", 2.7),
    ("wheat flour", 1.4),
    ("flour", 1.4),
    ("bread", 1.6),
    ("pasta", 1.7),
    ("noodles", 1.7),
    ("oats", 2.5),
    ("corn", 1.2),
    ("quinoa", 1.1),
    // Dairy
    ("cheese", 13.5),
    ("milk", 3.2),
    ("butter", 12.1),
    ("ghee", 12.1),
    ("cream", 7.6),
    ("yogurt", 2.2),
    ("paneer", 10.0),
    // Oils
    ("olive oil", 6.0),
    ("palm oil", 7.3),
    ("sunflower oil", 3.6),
    ("vegetable oil", 3.8),
    ("cooking oil", 3.8),
    // Vegetables and fruit
    ("tomato", 2.1),
    ("onion", 0.5),
    ("garlic", 0.6),
    ("potato", 0.5),
    ("carrot", 0.4),
    ("cabbage", 0.4),
    ("spinach", 0.5),
    ("lettuce", 0.9),
    ("pepper", 0.7),
    ("mushroom", 1.0),
    ("broccoli", 0.9),
    ("eggplant", 1.3),
    ("cucumber", 0.5),
    ("avocado", 2.5),
    ("banana", 0.9),
    ("apple", 0.4),
    ("lemon", 0.3),
    ("coconut", 2.0),
    // Pantry
    ("spices", 4.0),
    ("sugar", 3.2),
    ("salt", 0.2),
    ("chocolate", 18.7),
    ("coffee", 16.5),
];

static GLOBAL_TABLE: LazyLock<CarbonTable> =
    LazyLock::new(|| CarbonTable::from_entries(CARBON_ENTRIES.iter().copied()));

/// Read-only, case-insensitive ingredient name to carbon-per-kg mapping.
#[derive(Debug, Clone)]
pub struct CarbonTable {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl CarbonTable {
    /// The process-wide table, built on first use and never mutated.
    pub fn global() -> &'static CarbonTable {
        &GLOBAL_TABLE
    }

    /// Keys are lowercased; when a key repeats, its first definition wins.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut table = CarbonTable {
            entries: Vec::new(),
            index: HashMap::new(),
        };

        for (key, carbon_per_kg) in entries {
            let key = normalize_name(key.as_ref());
            if key.is_empty() || table.index.contains_key(&key) {
                continue;
            }
            table.index.insert(key.clone(), table.entries.len());
            table.entries.push((key, carbon_per_kg));
        }

        table
    }

    pub fn get_exact(&self, name: &str) -> Option<f64> {
        self.index
            .get(&normalize_name(name))
            .map(|&position| self.entries[position].1)
    }

    /// First key, in definition order, that contains `name` or is contained in it.
    pub fn find_fuzzy(&self, name: &str) -> Option<(&str, f64)> {
        let name = normalize_name(name);
        if name.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|(key, _)| name.contains(key.as_str()) || key.contains(name.as_str()))
            .map(|(key, carbon_per_kg)| (key.as_str(), *carbon_per_kg))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(key, carbon_per_kg)| (key.as_str(), *carbon_per_kg))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
