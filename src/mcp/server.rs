//! MCP tool server over stdio.
//!
//! One JSON-RPC message per line on stdin, one response per line on
//! stdout. Logs go to stderr so stdout stays protocol-clean.

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::api::handlers::AppState;
use crate::catalog::RecipeFilter;
use crate::error::{Error, Result};
use crate::mcp::schema::{
    initialize_result, tool_declarations, JsonRpcRequest, JsonRpcResponse, ToolResponse,
    ERROR_INTERNAL, ERROR_INVALID_PARAMS, ERROR_METHOD_NOT_FOUND, ERROR_PARSE,
};

pub struct McpServer {
    state: AppState,
}

impl McpServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Read newline-delimited JSON-RPC requests from stdin until EOF.
    pub async fn run_stdio(&self) -> Result<()> {
        use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

        info!("MCP stdio transport ready - listening on stdin/stdout");

        let stdin = tokio::io::stdin();
        let mut lines = BufReader::new(stdin).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(line) {
                Ok(request) => self.dispatch(request).await,
                Err(e) => {
                    warn!("Malformed JSON-RPC message: {}", e);
                    Some(JsonRpcResponse::error(None, ERROR_PARSE, "Parse error"))
                }
            };

            if let Some(response) = response {
                let raw = serde_json::to_string(&response)
                    .map_err(|e| Error::Internal(format!("Failed to encode response: {e}")))?;
                stdout.write_all(raw.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        info!("MCP stdin closed, shutting down");
        Ok(())
    }

    /// Handle one request. Notifications (no id) get no response.
    pub async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("MCP request: {}", request.method);

        let id = request.id.clone();
        if id.is_none() {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => {
                JsonRpcResponse::success(id, json!({ "tools": tool_declarations() }))
            }
            "tools/call" => self.handle_tool_call(id, request.params).await,
            "prompts/list" => JsonRpcResponse::success(id, json!({ "prompts": [] })),
            "resources/list" => JsonRpcResponse::success(id, json!({ "resources": [] })),
            method => JsonRpcResponse::error(
                id,
                ERROR_METHOD_NOT_FOUND,
                format!("Unknown method: {method}"),
            ),
        };

        Some(response)
    }

    async fn handle_tool_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params = match params {
            Some(params) => params,
            None => {
                return JsonRpcResponse::error(id, ERROR_INVALID_PARAMS, "Missing parameters")
            }
        };

        let name = match params.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => {
                return JsonRpcResponse::error(id, ERROR_INVALID_PARAMS, "Missing tool name")
            }
        };

        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        debug!("Tool call: {}", name);

        match self.call_tool(&name, &arguments).await {
            Ok(result) => match serde_json::to_value(ToolResponse::text(&result)) {
                Ok(wrapped) => JsonRpcResponse::success(id, wrapped),
                Err(_) => JsonRpcResponse::error(id, ERROR_INTERNAL, "Internal error"),
            },
            Err(Error::Validation(msg)) => {
                JsonRpcResponse::error(id, ERROR_INVALID_PARAMS, msg)
            }
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                JsonRpcResponse::error(id, ERROR_INTERNAL, "Internal error")
            }
        }
    }

    async fn call_tool(&self, name: &str, args: &Value) -> Result<Value> {
        match name {
            "search_recipes" => self.search_recipes(args),
            "get_recipe_details" => self.get_recipe_details(args),
            "get_all_ingredients" => Ok(self.get_all_ingredients()),
            "get_all_diet_types" => Ok(self.get_all_diet_types()),
            "get_all_meal_types" => Ok(self.get_all_meal_types()),
            "get_shopping_list" => Ok(self.get_shopping_list().await),
            "add_ingredients_to_shopping_list" => self.add_to_shopping_list(args).await,
            "remove_ingredients_from_shopping_list" => self.remove_from_shopping_list(args).await,
            "clear_shopping_list" => Ok(self.clear_shopping_list().await),
            _ => Err(Error::Validation(format!("Unknown tool: {name}"))),
        }
    }

    fn search_recipes(&self, args: &Value) -> Result<Value> {
        fn arg(args: &Value, key: &str) -> Option<String> {
            args.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .filter(|s| !s.trim().is_empty())
        }

        let filter = RecipeFilter {
            diet: arg(args, "diet"),
            meal_type: arg(args, "meal_type"),
            name_contains: arg(args, "name"),
            includes_ingredients: arg(args, "includes_ingredients"),
            excludes_ingredients: arg(args, "excludes_ingredients"),
        };

        let search = &self.state.settings.search;
        let limit = args
            .get("limit")
            .and_then(Value::as_u64)
            .map_or(search.default_limit, |l| l as usize)
            .clamp(1, search.max_limit);

        // Limit-truncated rather than paginated: this front end caps
        // results and reports the full match count alongside.
        let matched = self.state.catalog.matching(&filter);
        let total_found = matched.len();
        let recipes: Vec<_> = matched.into_iter().take(limit).collect();
        let returned = recipes.len();

        Ok(json!({
            "recipes": recipes,
            "total_found": total_found,
            "returned": returned,
            "filters_applied": {
                "diet": filter.diet,
                "meal_type": filter.meal_type,
                "name": filter.name_contains,
                "includes_ingredients": filter.includes_ingredients,
                "excludes_ingredients": filter.excludes_ingredients,
                "limit": limit,
            }
        }))
    }

    fn get_recipe_details(&self, args: &Value) -> Result<Value> {
        let recipe_name = args
            .get("recipe_name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Validation("Recipe name is required".to_string()))?;

        // A miss is a successful tool result, not a protocol error.
        let result = match self.state.catalog.find_by_name(recipe_name) {
            Some(recipe) => json!({
                "found": true,
                "recipe": recipe,
            }),
            None => json!({
                "found": false,
                "message": format!("Recipe '{recipe_name}' not found"),
                "suggestion": "Use search_recipes to find similar recipes",
            }),
        };

        Ok(result)
    }

    fn get_all_ingredients(&self) -> Value {
        let ingredients = self.state.catalog.all_ingredients();
        json!({
            "count": ingredients.len(),
            "ingredients": ingredients,
        })
    }

    fn get_all_diet_types(&self) -> Value {
        let diet_types = self.state.catalog.all_diet_types();
        json!({
            "count": diet_types.len(),
            "diet_types": diet_types,
        })
    }

    fn get_all_meal_types(&self) -> Value {
        let meal_types = self.state.catalog.all_meal_types();
        json!({
            "count": meal_types.len(),
            "meal_types": meal_types,
        })
    }

    async fn get_shopping_list(&self) -> Value {
        let list = self.state.shopping_list.read().await;
        json!({
            "shopping_list": list.items(),
            "count": list.len(),
        })
    }

    async fn add_to_shopping_list(&self, args: &Value) -> Result<Value> {
        let ingredients = required_ingredients(args)?;

        let mut list = self.state.shopping_list.write().await;
        for ingredient in &ingredients {
            list.add(ingredient);
        }

        Ok(json!({
            "message": format!("{} ingredients processed", ingredients.len()),
            "shopping_list": list.items(),
            "count": list.len(),
        }))
    }

    async fn remove_from_shopping_list(&self, args: &Value) -> Result<Value> {
        let ingredients = required_ingredients(args)?;

        let mut list = self.state.shopping_list.write().await;
        list.remove_all(&ingredients);

        Ok(json!({
            "message": format!("Removal of {} ingredients attempted", ingredients.len()),
            "shopping_list": list.items(),
            "count": list.len(),
        }))
    }

    async fn clear_shopping_list(&self) -> Value {
        let mut list = self.state.shopping_list.write().await;
        list.clear();
        json!({
            "message": "Shopping list cleared",
            "shopping_list": [],
            "count": 0,
        })
    }
}

/// Extract the `ingredients` argument: must be a non-empty array.
/// Non-string elements are dropped, matching the silent-reject
/// contract of the shopping list itself.
fn required_ingredients(args: &Value) -> Result<Vec<String>> {
    let array = args
        .get("ingredients")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Validation("Ingredients must be an array".to_string()))?;

    if array.is_empty() {
        return Err(Error::Validation("Ingredients array is empty".to_string()));
    }

    Ok(array
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect())
}
