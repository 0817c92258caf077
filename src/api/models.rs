use crate::catalog::{Paging, RecipeRecord};
use serde::{Deserialize, Serialize};

fn default_page() -> usize {
    1
}

/// Catalog listing parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: usize,
}

/// Search request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub diet: Option<String>,
    pub meal_type: Option<String>,
    pub name: Option<String>,
    pub includes_ingredients: Option<String>,
    pub excludes_ingredients: Option<String>,
    #[serde(default = "default_page")]
    pub page: usize,
}

/// Paginated recipe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipesResponse {
    pub recipes: Vec<RecipeRecord>,
    pub pagination: Paging,
}

/// Exact-name lookup parameters
#[derive(Debug, Clone, Deserialize)]
pub struct NameParams {
    #[serde(default)]
    pub name: String,
}

/// Exact-name lookup result; a miss is `found: false`, not an error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeLookupResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<RecipeRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeNamesResponse {
    pub count: usize,
    pub recipe_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientsResponse {
    pub count: usize,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietsResponse {
    pub count: usize,
    pub diets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealTypesResponse {
    pub count: usize,
    pub meal_types: Vec<String>,
}

/// Shopping-list mutation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientsPayload {
    pub ingredients: Vec<String>,
}

/// Shopping-list responses always carry the full resulting list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub shopping_list: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SemanticTextParams {
    #[serde(default)]
    pub query: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SemanticIngredientParams {
    #[serde(default)]
    pub ingredient: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SemanticDietParams {
    #[serde(default)]
    pub diet: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SemanticMealTypeParams {
    #[serde(default)]
    pub meal_type: String,
    pub limit: Option<usize>,
}

/// Semantic search response: names only, with the availability flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticSearchResponse {
    pub query: String,
    pub recipe_names: Vec<String>,
    pub count: usize,
    pub available: bool,
}

/// System statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub total_recipes: usize,
    pub total_ingredients: usize,
    pub total_diet_types: usize,
    pub total_meal_types: usize,
    pub shopping_list_count: usize,
    pub semantic_search_available: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
