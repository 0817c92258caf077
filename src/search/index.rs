use crate::catalog::RecipeRecord;
use crate::error::{Error, Result};
use crate::search::schema::RecipeSchema;
use crate::search::SemanticSearch;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::Field;
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy};
use tracing::{info, warn};

/// Full-text similarity index over the recipe collection.
///
/// Built once in RAM at startup from the loaded catalog. Queries
/// return ordered recipe names only; any backend failure degrades to
/// an empty result.
pub struct RecipeSearchIndex {
    index: Index,
    reader: IndexReader,
    schema: RecipeSchema,
}

impl RecipeSearchIndex {
    /// Index every record and prepare a reader.
    pub fn build(records: &[RecipeRecord]) -> Result<Self> {
        let schema = RecipeSchema::new();
        let index = Index::create_in_ram(schema.schema.clone());

        let mut writer: IndexWriter = index
            .writer(15_000_000)
            .map_err(|e| Error::Search(format!("Failed to create writer: {e}")))?;

        for record in records {
            let mut doc = doc!(schema.name => record.name.clone());

            for ingredient in &record.ingredients {
                doc.add_text(schema.ingredients, ingredient);
            }
            for diet in &record.diet {
                doc.add_text(schema.diet, diet);
            }
            for meal_type in &record.meal_type {
                doc.add_text(schema.meal_type, meal_type);
            }
            if !record.steps.is_empty() {
                doc.add_text(schema.steps, &record.steps);
            }

            writer.add_document(doc)?;
        }

        writer
            .commit()
            .map_err(|e| Error::Search(format!("Failed to commit: {e}")))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e| Error::Search(format!("Failed to create reader: {e}")))?;

        info!("Search index built over {} recipes", records.len());

        Ok(Self {
            index,
            reader,
            schema,
        })
    }

    fn query_fields(&self, fields: Vec<Field>, text: &str, limit: usize) -> Result<Vec<String>> {
        let text = text.trim();
        if text.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let searcher = self.reader.searcher();
        let query_parser = QueryParser::for_index(&self.index, fields);
        let query = query_parser
            .parse_query(text)
            .map_err(|e| Error::Search(format!("Invalid query: {e}")))?;

        let top_docs = searcher
            .search(&*query, &TopDocs::with_limit(limit))
            .map_err(|e| Error::Search(format!("Search failed: {e}")))?;

        let names = top_docs
            .into_iter()
            .filter_map(|(_score, doc_address)| {
                let doc = searcher.doc::<tantivy::TantivyDocument>(doc_address).ok()?;
                match doc.get_first(self.schema.name)? {
                    tantivy::schema::OwnedValue::Str(s) => Some(s.to_string()),
                    _ => None,
                }
            })
            .collect();

        Ok(names)
    }

    /// Degraded-mode contract: callers see an empty list, never an
    /// error.
    fn names_or_empty(&self, fields: Vec<Field>, text: &str, limit: usize) -> Vec<String> {
        match self.query_fields(fields, text, limit) {
            Ok(names) => names,
            Err(e) => {
                warn!("Search backend error for \"{}\": {}", text, e);
                Vec::new()
            }
        }
    }
}

impl SemanticSearch for RecipeSearchIndex {
    fn is_available(&self) -> bool {
        true
    }

    fn search_by_text(&self, query: &str, limit: usize) -> Vec<String> {
        let fields = vec![
            self.schema.name,
            self.schema.ingredients,
            self.schema.diet,
            self.schema.meal_type,
            self.schema.steps,
        ];
        self.names_or_empty(fields, query, limit)
    }

    fn search_by_ingredient(&self, ingredient: &str, limit: usize) -> Vec<String> {
        self.names_or_empty(vec![self.schema.ingredients], ingredient, limit)
    }

    fn search_by_diet(&self, diet: &str, limit: usize) -> Vec<String> {
        self.names_or_empty(vec![self.schema.diet], diet, limit)
    }

    fn search_by_meal_type(&self, meal_type: &str, limit: usize) -> Vec<String> {
        self.names_or_empty(vec![self.schema.meal_type], meal_type, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_records() -> Vec<RecipeRecord> {
        vec![
            RecipeRecord {
                id: "1".to_string(),
                name: "Bramborová polévka".to_string(),
                ingredients: vec!["Brambory".to_string(), "Cibule".to_string()],
                diet: vec!["vegetarian".to_string()],
                meal_type: vec!["polévka".to_string()],
                steps: "Uvařte brambory a cibuli.".to_string(),
            },
            RecipeRecord {
                id: "2".to_string(),
                name: "Guláš".to_string(),
                ingredients: vec!["Hovězí".to_string(), "Cibule".to_string()],
                diet: vec![],
                meal_type: vec!["hlavní chod".to_string()],
                steps: "Duste maso do měkka.".to_string(),
            },
        ]
    }

    #[test]
    fn test_build_and_search_by_text() {
        let index = RecipeSearchIndex::build(&fixture_records()).unwrap();
        assert!(index.is_available());

        let names = index.search_by_text("brambory", 10);
        assert_eq!(names, vec!["Bramborová polévka"]);
    }

    #[test]
    fn test_search_by_ingredient() {
        let index = RecipeSearchIndex::build(&fixture_records()).unwrap();

        let names = index.search_by_ingredient("cibule", 10);
        assert_eq!(names.len(), 2);

        let names = index.search_by_ingredient("hovězí", 10);
        assert_eq!(names, vec!["Guláš"]);
    }

    #[test]
    fn test_search_by_diet_and_meal_type() {
        let index = RecipeSearchIndex::build(&fixture_records()).unwrap();

        assert_eq!(
            index.search_by_diet("vegetarian", 10),
            vec!["Bramborová polévka"]
        );
        assert_eq!(index.search_by_meal_type("polévka", 10), vec![
            "Bramborová polévka"
        ]);
    }

    #[test]
    fn test_limit_truncates_results() {
        let index = RecipeSearchIndex::build(&fixture_records()).unwrap();
        let names = index.search_by_ingredient("cibule", 1);
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_blank_query_returns_empty() {
        let index = RecipeSearchIndex::build(&fixture_records()).unwrap();
        assert!(index.search_by_text("   ", 10).is_empty());
        assert!(index.search_by_text("cibule", 0).is_empty());
    }

    #[test]
    fn test_malformed_query_degrades_to_empty() {
        let index = RecipeSearchIndex::build(&fixture_records()).unwrap();
        // Unbalanced range syntax is a parser error, not a panic.
        assert!(index.search_by_text("name:[", 10).is_empty());
    }

    #[test]
    fn test_empty_collection_builds() {
        let index = RecipeSearchIndex::build(&[]).unwrap();
        assert!(index.search_by_text("cokoliv", 10).is_empty());
    }
}
