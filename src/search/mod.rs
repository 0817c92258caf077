pub mod index;
pub mod schema;

pub use index::RecipeSearchIndex;

use crate::catalog::RecipeRecord;
use crate::config::SearchConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// Similarity search over recipe text, external to the catalog core.
///
/// Each query returns an ordered sequence of recipe names, truncated
/// to `limit`, and must return an empty sequence rather than fail when
/// the backing index is unavailable. Availability is reported
/// separately so front ends can surface degraded mode.
pub trait SemanticSearch: Send + Sync {
    fn is_available(&self) -> bool;
    fn search_by_text(&self, query: &str, limit: usize) -> Vec<String>;
    fn search_by_ingredient(&self, ingredient: &str, limit: usize) -> Vec<String>;
    fn search_by_diet(&self, diet: &str, limit: usize) -> Vec<String>;
    fn search_by_meal_type(&self, meal_type: &str, limit: usize) -> Vec<String>;
}

/// Adapter used when no index is configured or the build failed.
pub struct NoopSearch;

impl SemanticSearch for NoopSearch {
    fn is_available(&self) -> bool {
        false
    }

    fn search_by_text(&self, _query: &str, _limit: usize) -> Vec<String> {
        Vec::new()
    }

    fn search_by_ingredient(&self, _ingredient: &str, _limit: usize) -> Vec<String> {
        Vec::new()
    }

    fn search_by_diet(&self, _diet: &str, _limit: usize) -> Vec<String> {
        Vec::new()
    }

    fn search_by_meal_type(&self, _meal_type: &str, _limit: usize) -> Vec<String> {
        Vec::new()
    }
}

/// Select the search adapter at startup. An index-build failure
/// degrades to the no-op adapter instead of aborting the process.
pub fn build_search(config: &SearchConfig, records: &[RecipeRecord]) -> Arc<dyn SemanticSearch> {
    if !config.enabled {
        info!("Semantic search disabled by configuration");
        return Arc::new(NoopSearch);
    }

    match RecipeSearchIndex::build(records) {
        Ok(index) => Arc::new(index),
        Err(e) => {
            warn!("Semantic search unavailable, continuing without it: {}", e);
            Arc::new(NoopSearch)
        }
    }
}
