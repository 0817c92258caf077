use tantivy::schema::{Field, Schema, STORED, TEXT};

/// Schema for the recipe similarity-search index
#[derive(Clone)]
pub struct RecipeSchema {
    pub schema: Schema,
    pub name: Field,
    pub ingredients: Field,
    pub diet: Field,
    pub meal_type: Field,
    pub steps: Field,
}

impl RecipeSchema {
    pub fn new() -> Self {
        let mut schema_builder = Schema::builder();

        // Name is the only stored field: queries return recipe names,
        // callers fetch full records from the catalog.
        let name = schema_builder.add_text_field("name", TEXT | STORED);

        let ingredients = schema_builder.add_text_field("ingredients", TEXT);
        let diet = schema_builder.add_text_field("diet", TEXT);
        let meal_type = schema_builder.add_text_field("meal_type", TEXT);
        let steps = schema_builder.add_text_field("steps", TEXT);

        let schema = schema_builder.build();

        Self {
            schema,
            name,
            ingredients,
            diet,
            meal_type,
            steps,
        }
    }
}

impl Default for RecipeSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creation() {
        let schema = RecipeSchema::new();
        assert!(schema.schema.get_field("name").is_ok());
        assert!(schema.schema.get_field("ingredients").is_ok());
        assert!(schema.schema.get_field("meal_type").is_ok());
    }
}
