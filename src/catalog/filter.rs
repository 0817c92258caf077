use crate::catalog::record::RecipeRecord;
use serde::{Deserialize, Serialize};

/// Optional filter predicates, AND-combined when present.
///
/// An absent or blank field imposes no constraint. All matching is
/// case-insensitive; ingredient terms match by substring ("brambor"
/// matches "Brambory").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeFilter {
    pub diet: Option<String>,
    pub meal_type: Option<String>,
    pub name_contains: Option<String>,
    /// Comma-separated list of required ingredient substrings.
    pub includes_ingredients: Option<String>,
    /// Comma-separated list of forbidden ingredient substrings.
    pub excludes_ingredients: Option<String>,
}

impl RecipeFilter {
    /// True when no predicate is active. A zero-predicate query is
    /// valid at the catalog level and matches every record; front ends
    /// that require at least one predicate check this themselves.
    pub fn is_empty(&self) -> bool {
        fn blank(field: &Option<String>) -> bool {
            field.as_deref().map_or(true, |s| s.trim().is_empty())
        }

        blank(&self.diet)
            && blank(&self.meal_type)
            && blank(&self.name_contains)
            && blank(&self.includes_ingredients)
            && blank(&self.excludes_ingredients)
    }

    /// Lowercase the predicates once so per-record matching does not
    /// re-normalize the filter for every record.
    pub(crate) fn compile(&self) -> CompiledFilter {
        fn lowered(field: &Option<String>) -> Option<String> {
            field
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase)
        }

        CompiledFilter {
            diet: lowered(&self.diet),
            meal_type: lowered(&self.meal_type),
            name: lowered(&self.name_contains),
            required: self
                .includes_ingredients
                .as_deref()
                .map(parse_terms)
                .unwrap_or_default(),
            forbidden: self
                .excludes_ingredients
                .as_deref()
                .map(parse_terms)
                .unwrap_or_default(),
        }
    }
}

/// Parse a comma-separated term list into trimmed, lowercased terms.
pub fn parse_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// A filter with all predicates pre-lowercased.
pub(crate) struct CompiledFilter {
    diet: Option<String>,
    meal_type: Option<String>,
    name: Option<String>,
    required: Vec<String>,
    forbidden: Vec<String>,
}

impl CompiledFilter {
    /// Predicates commute; the order here is just cheapest-first.
    pub(crate) fn matches(&self, record: &RecipeRecord) -> bool {
        if let Some(diet) = &self.diet {
            if !record.diet.iter().any(|d| d.to_lowercase() == *diet) {
                return false;
            }
        }

        if let Some(meal_type) = &self.meal_type {
            if !record
                .meal_type
                .iter()
                .any(|m| m.to_lowercase() == *meal_type)
            {
                return false;
            }
        }

        if let Some(name) = &self.name {
            if !record.name.to_lowercase().contains(name.as_str()) {
                return false;
            }
        }

        if !self.required.is_empty() || !self.forbidden.is_empty() {
            let lowered: Vec<String> = record
                .ingredients
                .iter()
                .map(|i| i.to_lowercase())
                .collect();

            for term in &self.required {
                if !lowered.iter().any(|i| i.contains(term.as_str())) {
                    return false;
                }
            }

            for term in &self.forbidden {
                if lowered.iter().any(|i| i.contains(term.as_str())) {
                    return false;
                }
            }
        }

        true
    }
}

/// Pagination metadata: `total` counts matches before pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Paging {
    /// `page` is 1-indexed; a page past the end is representable and
    /// simply has no items.
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let total_pages = total.div_ceil(page_size);
        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter() {
        assert!(RecipeFilter::default().is_empty());

        let blank = RecipeFilter {
            diet: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.is_empty());

        let active = RecipeFilter {
            diet: Some("vegetarian".to_string()),
            ..Default::default()
        };
        assert!(!active.is_empty());
    }

    #[test]
    fn test_parse_terms() {
        assert_eq!(parse_terms("Cibule, Hovězí ,"), vec!["cibule", "hovězí"]);
        assert!(parse_terms("").is_empty());
    }

    #[test]
    fn test_paging_arithmetic() {
        // 23 matches at page size 10 span 3 pages.
        let first = Paging::new(1, 10, 23);
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_prev);
        assert!(first.has_next);

        let last = Paging::new(3, 10, 23);
        assert!(last.has_prev);
        assert!(!last.has_next);

        let past_end = Paging::new(4, 10, 23);
        assert_eq!(past_end.total_pages, 3);
        assert!(!past_end.has_next);
        assert_eq!(past_end.offset(), 30);
    }

    #[test]
    fn test_paging_empty_result() {
        let paging = Paging::new(1, 10, 0);
        assert_eq!(paging.total_pages, 0);
        assert!(!paging.has_next);
        assert!(!paging.has_prev);
    }
}
