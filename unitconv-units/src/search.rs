//! Category and unit search

use serde::Serialize;
use crate::units::normalize;
use crate::{Category, Unit};

/// A category matched by a search, with all of its units
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub category: Category,
    pub units: &'static [Unit],
}

/// Find categories whose name matches `query` or that contain a matching unit.
///
/// Matching is a case-insensitive substring test against the category name
/// and key, and against every unit's key, symbol and aliases. An empty query
/// matches everything.
pub fn search(query: &str) -> Vec<SearchHit> {
    let needle = normalize(query);

    Category::ALL
        .iter()
        .copied()
        .filter(|&category| needle.is_empty() || category_matches(category, &needle))
        .map(|category| SearchHit {
            category,
            units: category.units(),
        })
        .collect()
}

fn category_matches(category: Category, needle: &str) -> bool {
    normalize(category.name()).contains(needle)
        || category.key().contains(needle)
        || category
            .units()
            .iter()
            .flat_map(|unit| unit.names())
            .any(|name| normalize(name).contains(needle))
}
