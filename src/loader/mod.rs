use crate::catalog::record::{split_field, RecipeRecord};
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use tracing::{error, info, warn};

/// Raw CSV row as it appears in the dataset. The list-valued columns
/// arrive as comma-separated strings and are split at this boundary.
#[derive(Debug, Deserialize)]
struct RawRecipeRow {
    id: String,
    name: String,
    #[serde(default)]
    ingredients: String,
    #[serde(default)]
    diet: String,
    #[serde(default)]
    meal_type: String,
    #[serde(default)]
    steps: String,
}

impl RawRecipeRow {
    fn into_record(self) -> RecipeRecord {
        RecipeRecord {
            id: self.id,
            name: self.name.trim().to_string(),
            ingredients: split_field(&self.ingredients),
            diet: split_field(&self.diet),
            meal_type: split_field(&self.meal_type),
            steps: self.steps,
        }
    }
}

/// Load recipe records from a CSV file.
///
/// The catalog never sees a parse failure: an unreadable file yields
/// an empty sequence and a malformed or nameless row is skipped, both
/// with a diagnostic.
pub fn load_recipes(path: impl AsRef<Path>) -> Vec<RecipeRecord> {
    let path = path.as_ref();
    match read_recipes(path) {
        Ok(records) => {
            info!("Loaded {} recipes from {}", records.len(), path.display());
            records
        }
        Err(e) => {
            error!("Failed to load recipes from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn read_recipes(path: &Path) -> Result<Vec<RecipeRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for (index, row) in reader.deserialize::<RawRecipeRow>().enumerate() {
        // Header is line 1, so data row N is line N + 1.
        let line = index + 2;
        match row {
            Ok(raw) if raw.name.trim().is_empty() => {
                warn!("Skipping recipe with empty name at line {}", line);
            }
            Ok(raw) => records.push(raw.into_record()),
            Err(e) => {
                warn!("Skipping malformed recipe row at line {}: {}", line, e);
            }
        }
    }

    Ok(records)
}
