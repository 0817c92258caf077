pub mod filter;
pub mod record;

pub use filter::{Paging, RecipeFilter};
pub use record::RecipeRecord;

use std::collections::BTreeSet;

/// Immutable-after-load recipe collection with derived label sets.
///
/// Records keep their load order, which fixes pagination order. The
/// derived sets are caches over the records and are never updated
/// independently.
pub struct RecipeCatalog {
    records: Vec<RecipeRecord>,
    ingredients: BTreeSet<String>,
    diet_types: BTreeSet<String>,
    meal_types: BTreeSet<String>,
}

/// One page of query results plus pagination metadata.
pub struct QueryPage<'a> {
    pub records: Vec<&'a RecipeRecord>,
    pub paging: Paging,
}

impl RecipeCatalog {
    pub fn new(records: Vec<RecipeRecord>) -> Self {
        let mut ingredients = BTreeSet::new();
        let mut diet_types = BTreeSet::new();
        let mut meal_types = BTreeSet::new();

        for record in &records {
            ingredients.extend(record.ingredients.iter().cloned());
            diet_types.extend(record.diet.iter().cloned());
            meal_types.extend(record.meal_type.iter().cloned());
        }

        Self {
            records,
            ingredients,
            diet_types,
            meal_types,
        }
    }

    /// All records matching the filter, in load order.
    pub fn matching(&self, filter: &RecipeFilter) -> Vec<&RecipeRecord> {
        let compiled = filter.compile();
        self.records.iter().filter(|r| compiled.matches(r)).collect()
    }

    /// Filter and paginate. `page` is 1-indexed; a page past the end
    /// yields an empty record slice with correct totals.
    pub fn query(&self, filter: &RecipeFilter, page: usize, page_size: usize) -> QueryPage<'_> {
        let matched = self.matching(filter);
        let paging = Paging::new(page, page_size, matched.len());

        let records = matched
            .into_iter()
            .skip(paging.offset())
            .take(page_size)
            .collect();

        QueryPage { records, paging }
    }

    /// Exact-name lookup. A miss is a normal outcome, not an error.
    pub fn find_by_name(&self, name: &str) -> Option<&RecipeRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn records(&self) -> &[RecipeRecord] {
        &self.records
    }

    /// All recipe names, lexicographically sorted.
    pub fn recipe_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.iter().map(|r| r.name.clone()).collect();
        names.sort();
        names
    }

    /// Every ingredient seen across all records, sorted.
    pub fn all_ingredients(&self) -> Vec<String> {
        self.ingredients.iter().cloned().collect()
    }

    /// Every diet label seen across all records, sorted.
    pub fn all_diet_types(&self) -> Vec<String> {
        self.diet_types.iter().cloned().collect()
    }

    /// Every meal-type label seen across all records, sorted.
    pub fn all_meal_types(&self) -> Vec<String> {
        self.meal_types.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
