//! Stop directory with autocomplete.

use std::collections::HashMap;

use geo::Point;

use crate::domain::StopFeature;

/// A search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct StopMatch {
    pub name: String,
    pub location: Point<f64>,
}

/// Immutable stop name to coordinate lookup.
#[derive(Debug, Clone, Default)]
pub struct StopDirectory {
    /// Unique names, sorted.
    names: Vec<String>,
    coords: HashMap<String, Point<f64>>,
}

impl StopDirectory {
    /// Build from stop features. Blank names are skipped; when a name
    /// appears more than once the first coordinate is kept.
    pub fn from_features(features: &[StopFeature]) -> Self {
        let mut coords = HashMap::new();
        for feature in features {
            if let Some(name) = feature.usable_name() {
                coords.entry(name.to_string()).or_insert(feature.location);
            }
        }

        let mut names: Vec<String> = coords.keys().cloned().collect();
        names.sort();

        Self { names, coords }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.coords.contains_key(name)
    }

    /// Coordinate of a stop.
    pub fn coord(&self, name: &str) -> Option<Point<f64>> {
        self.coords.get(name).copied()
    }

    /// All names, sorted.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Case-insensitive name search.
    ///
    /// Names starting with the query come first, then names with a later
    /// word starting with it. Both groups keep alphabetical order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<StopMatch> {
        let query = query.trim().to_lowercase();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut prefix = Vec::new();
        let mut word_start = Vec::new();
        for name in &self.names {
            let lower = name.to_lowercase();
            if lower.starts_with(&query) {
                prefix.push(name);
            } else if lower
                .split(|c: char| c.is_whitespace() || c == '-' || c == '(' || c == '/')
                .any(|word| word.starts_with(&query))
            {
                word_start.push(name);
            }
        }

        prefix
            .into_iter()
            .chain(word_start)
            .take(limit)
            .filter_map(|name| {
                self.coord(name).map(|location| StopMatch {
                    name: name.clone(),
                    location,
                })
            })
            .collect()
    }
}
