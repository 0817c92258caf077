use serde::{Deserialize, Serialize};

/// One recipe entry, immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub diet: Vec<String>,
    pub meal_type: Vec<String>,
    pub steps: String,
}

/// Split a comma-separated source field into trimmed entries.
///
/// Order is preserved and duplicates survive (source fidelity);
/// empty segments are dropped.
pub fn split_field(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
