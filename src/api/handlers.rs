use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    api::models::*,
    catalog::{RecipeCatalog, RecipeFilter},
    search::SemanticSearch,
    shopping::ShoppingList,
    Error, Result,
};

/// Shared application state.
///
/// The catalog is read-only after load, so concurrent handlers share
/// it without synchronization. The shopping list is the one mutable
/// singleton and sits behind a lock; the lock is never held across an
/// await point.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RecipeCatalog>,
    pub shopping_list: Arc<RwLock<ShoppingList>>,
    pub search: Arc<dyn SemanticSearch>,
    pub settings: crate::config::Settings,
}

fn clamp_limit(limit: Option<usize>, settings: &crate::config::Settings) -> usize {
    limit
        .unwrap_or(settings.search.default_limit)
        .clamp(1, settings.search.max_limit)
}

/// GET /api/recipes - Whole catalog, paginated
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<RecipesResponse>> {
    debug!("List recipes request: page {}", params.page);

    let page_size = state.settings.pagination.page_size;
    let page = state
        .catalog
        .query(&RecipeFilter::default(), params.page, page_size);

    Ok(Json(RecipesResponse {
        recipes: page.records.into_iter().cloned().collect(),
        pagination: page.paging,
    }))
}

/// GET /api/recipes/search - Multi-criteria search, paginated
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<RecipesResponse>> {
    debug!("Search request: {:?}", params);

    let filter = RecipeFilter {
        diet: params.diet,
        meal_type: params.meal_type,
        name_contains: params.name,
        includes_ingredients: params.includes_ingredients,
        excludes_ingredients: params.excludes_ingredients,
    };

    // The zero-predicate query is valid at the catalog level; this
    // endpoint demands at least one parameter.
    if filter.is_empty() {
        return Err(Error::Validation(
            "Please provide at least one search parameter: 'diet', 'meal_type', 'name', \
             'includes_ingredients', or 'excludes_ingredients'"
                .to_string(),
        ));
    }

    let page_size = state.settings.pagination.page_size;
    let page = state.catalog.query(&filter, params.page, page_size);

    Ok(Json(RecipesResponse {
        recipes: page.records.into_iter().cloned().collect(),
        pagination: page.paging,
    }))
}

/// GET /api/recipes/by-name - Exact-name lookup
pub async fn recipe_by_name(
    State(state): State<AppState>,
    Query(params): Query<NameParams>,
) -> Result<Json<RecipeLookupResponse>> {
    debug!("Recipe lookup request: {}", params.name);

    if params.name.trim().is_empty() {
        return Err(Error::Validation("Name parameter required".to_string()));
    }

    let response = match state.catalog.find_by_name(&params.name) {
        Some(recipe) => RecipeLookupResponse {
            found: true,
            recipe: Some(recipe.clone()),
            message: None,
        },
        None => RecipeLookupResponse {
            found: false,
            recipe: None,
            message: Some(format!("Recipe '{}' not found", params.name)),
        },
    };

    Ok(Json(response))
}

/// GET /api/recipes/names - All recipe names, sorted
pub async fn list_recipe_names(State(state): State<AppState>) -> Result<Json<RecipeNamesResponse>> {
    let recipe_names = state.catalog.recipe_names();
    Ok(Json(RecipeNamesResponse {
        count: recipe_names.len(),
        recipe_names,
    }))
}

/// GET /api/ingredients - All unique ingredients, sorted
pub async fn list_ingredients(State(state): State<AppState>) -> Result<Json<IngredientsResponse>> {
    let ingredients = state.catalog.all_ingredients();
    Ok(Json(IngredientsResponse {
        count: ingredients.len(),
        ingredients,
    }))
}

/// GET /api/diets - All unique diet labels, sorted
pub async fn list_diets(State(state): State<AppState>) -> Result<Json<DietsResponse>> {
    let diets = state.catalog.all_diet_types();
    Ok(Json(DietsResponse {
        count: diets.len(),
        diets,
    }))
}

/// GET /api/meal-types - All unique meal-type labels, sorted
pub async fn list_meal_types(State(state): State<AppState>) -> Result<Json<MealTypesResponse>> {
    let meal_types = state.catalog.all_meal_types();
    Ok(Json(MealTypesResponse {
        count: meal_types.len(),
        meal_types,
    }))
}

/// GET /api/shopping-list - Current shopping list
pub async fn get_shopping_list(State(state): State<AppState>) -> Result<Json<ShoppingListResponse>> {
    let list = state.shopping_list.read().await;
    Ok(Json(ShoppingListResponse {
        message: None,
        shopping_list: list.items(),
        count: list.len(),
    }))
}

/// POST /api/shopping-list/add - Add ingredients
pub async fn add_ingredients(
    State(state): State<AppState>,
    Json(payload): Json<IngredientsPayload>,
) -> Result<Json<ShoppingListResponse>> {
    debug!("Add ingredients request: {:?}", payload.ingredients);

    if payload.ingredients.is_empty() {
        return Err(Error::Validation("Ingredients array is empty".to_string()));
    }

    let mut list = state.shopping_list.write().await;
    for ingredient in &payload.ingredients {
        list.add(ingredient);
    }

    Ok(Json(ShoppingListResponse {
        message: Some(format!("{} ingredients processed", payload.ingredients.len())),
        shopping_list: list.items(),
        count: list.len(),
    }))
}

/// POST /api/shopping-list/remove - Remove ingredients
pub async fn remove_ingredients(
    State(state): State<AppState>,
    Json(payload): Json<IngredientsPayload>,
) -> Result<Json<ShoppingListResponse>> {
    debug!("Remove ingredients request: {:?}", payload.ingredients);

    if payload.ingredients.is_empty() {
        return Err(Error::Validation("Ingredients array is empty".to_string()));
    }

    let mut list = state.shopping_list.write().await;
    list.remove_all(&payload.ingredients);

    Ok(Json(ShoppingListResponse {
        message: Some(format!(
            "Removal of {} ingredients attempted",
            payload.ingredients.len()
        )),
        shopping_list: list.items(),
        count: list.len(),
    }))
}

/// POST /api/shopping-list/clear - Clear the shopping list
pub async fn clear_shopping_list(
    State(state): State<AppState>,
) -> Result<Json<ShoppingListResponse>> {
    let mut list = state.shopping_list.write().await;
    list.clear();

    Ok(Json(ShoppingListResponse {
        message: Some("Shopping list cleared".to_string()),
        shopping_list: Vec::new(),
        count: 0,
    }))
}

/// GET /api/semantic/by-text - Similarity search by free text
pub async fn semantic_by_text(
    State(state): State<AppState>,
    Query(params): Query<SemanticTextParams>,
) -> Result<Json<SemanticSearchResponse>> {
    if params.query.trim().is_empty() {
        return Err(Error::Validation("Query parameter required".to_string()));
    }

    let limit = clamp_limit(params.limit, &state.settings);
    let recipe_names = state.search.search_by_text(&params.query, limit);

    Ok(Json(SemanticSearchResponse {
        query: params.query,
        count: recipe_names.len(),
        recipe_names,
        available: state.search.is_available(),
    }))
}

/// GET /api/semantic/by-ingredient - Similarity search by ingredient
pub async fn semantic_by_ingredient(
    State(state): State<AppState>,
    Query(params): Query<SemanticIngredientParams>,
) -> Result<Json<SemanticSearchResponse>> {
    if params.ingredient.trim().is_empty() {
        return Err(Error::Validation(
            "Ingredient parameter required".to_string(),
        ));
    }

    let limit = clamp_limit(params.limit, &state.settings);
    let recipe_names = state.search.search_by_ingredient(&params.ingredient, limit);

    Ok(Json(SemanticSearchResponse {
        query: params.ingredient,
        count: recipe_names.len(),
        recipe_names,
        available: state.search.is_available(),
    }))
}

/// GET /api/semantic/by-diet - Similarity search by diet label
pub async fn semantic_by_diet(
    State(state): State<AppState>,
    Query(params): Query<SemanticDietParams>,
) -> Result<Json<SemanticSearchResponse>> {
    if params.diet.trim().is_empty() {
        return Err(Error::Validation("Diet parameter required".to_string()));
    }

    let limit = clamp_limit(params.limit, &state.settings);
    let recipe_names = state.search.search_by_diet(&params.diet, limit);

    Ok(Json(SemanticSearchResponse {
        query: params.diet,
        count: recipe_names.len(),
        recipe_names,
        available: state.search.is_available(),
    }))
}

/// GET /api/semantic/by-meal-type - Similarity search by meal type
pub async fn semantic_by_meal_type(
    State(state): State<AppState>,
    Query(params): Query<SemanticMealTypeParams>,
) -> Result<Json<SemanticSearchResponse>> {
    if params.meal_type.trim().is_empty() {
        return Err(Error::Validation(
            "Meal type parameter required".to_string(),
        ));
    }

    let limit = clamp_limit(params.limit, &state.settings);
    let recipe_names = state.search.search_by_meal_type(&params.meal_type, limit);

    Ok(Json(SemanticSearchResponse {
        query: params.meal_type,
        count: recipe_names.len(),
        recipe_names,
        available: state.search.is_available(),
    }))
}

/// GET /api/stats - System statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    debug!("Get stats request");

    let shopping_list_count = state.shopping_list.read().await.len();

    Ok(Json(Stats {
        total_recipes: state.catalog.len(),
        total_ingredients: state.catalog.all_ingredients().len(),
        total_diet_types: state.catalog.all_diet_types().len(),
        total_meal_types: state.catalog.all_meal_types().len(),
        shopping_list_count,
        semantic_search_available: state.search.is_available(),
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}
