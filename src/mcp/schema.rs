//! MCP protocol message types and tool declarations.
//!
//! Type-safe JSON-RPC 2.0 structures plus the tool schemas this server
//! advertises over `tools/list`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// JSON-RPC 2.0 version string
pub const JSONRPC_VERSION: &str = "2.0";

pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "receptar-recipe-shopping-server";

// Standard JSON-RPC error codes
pub const ERROR_PARSE: i32 = -32700;
pub const ERROR_METHOD_NOT_FOUND: i32 = -32601;
pub const ERROR_INVALID_PARAMS: i32 = -32602;
pub const ERROR_INTERNAL: i32 = -32603;

/// JSON-RPC 2.0 Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Absent for notifications, which receive no response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 Response; exactly one of `result` or `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }
}

/// Tool declaration as advertised by `tools/list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Tool execution result: content items plus an error flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: Vec<Content>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResponse {
    /// Wrap a JSON tool result as a single text content item.
    pub fn text(value: &Value) -> Self {
        let text =
            serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
        Self {
            content: vec![Content::Text { text }],
            is_error: false,
        }
    }
}

/// `initialize` result payload
pub fn initialize_result() -> Value {
    json!({
        "protocolVersion": MCP_PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        }
    })
}

fn tool(name: &str, description: &str, input_schema: Value) -> Tool {
    Tool {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

fn empty_schema() -> Value {
    json!({ "type": "object", "properties": {} })
}

fn ingredients_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "ingredients": {
                "type": "array",
                "items": { "type": "string" },
                "description": description,
            }
        },
        "required": ["ingredients"]
    })
}

/// Declarations for every tool the server exposes
pub fn tool_declarations() -> Vec<Tool> {
    vec![
        tool(
            "search_recipes",
            "Search for recipes based on various criteria including diet, meal type, \
             ingredients, and name",
            json!({
                "type": "object",
                "properties": {
                    "diet": {
                        "type": "string",
                        "description": "Filter by diet type (e.g., 'vegetarian', 'vegan', 'high-protein')"
                    },
                    "meal_type": {
                        "type": "string",
                        "description": "Filter by meal type (e.g., 'polévka', 'hlavní chod', 'desert')"
                    },
                    "name": {
                        "type": "string",
                        "description": "Search recipes by name (partial match)"
                    },
                    "includes_ingredients": {
                        "type": "string",
                        "description": "Comma-separated list of ingredients that must be present"
                    },
                    "excludes_ingredients": {
                        "type": "string",
                        "description": "Comma-separated list of ingredients that must NOT be present"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of recipes to return (default: 10, max: 50)",
                        "minimum": 1,
                        "maximum": 50,
                        "default": 10
                    }
                }
            }),
        ),
        tool(
            "get_recipe_details",
            "Get detailed information about a specific recipe by name",
            json!({
                "type": "object",
                "properties": {
                    "recipe_name": {
                        "type": "string",
                        "description": "Exact name of the recipe to get details for"
                    }
                },
                "required": ["recipe_name"]
            }),
        ),
        tool(
            "get_all_ingredients",
            "Get all available ingredients from the recipe database",
            empty_schema(),
        ),
        tool(
            "get_all_diet_types",
            "Get all available diet types from the recipe database",
            empty_schema(),
        ),
        tool(
            "get_all_meal_types",
            "Get all available meal types from the recipe database",
            empty_schema(),
        ),
        tool(
            "get_shopping_list",
            "Get the current shopping list",
            empty_schema(),
        ),
        tool(
            "add_ingredients_to_shopping_list",
            "Add ingredients to the shopping list",
            ingredients_schema("List of ingredients to add to shopping list"),
        ),
        tool(
            "remove_ingredients_from_shopping_list",
            "Remove ingredients from the shopping list",
            ingredients_schema("List of ingredients to remove from shopping list"),
        ),
        tool(
            "clear_shopping_list",
            "Clear all ingredients from the shopping list",
            empty_schema(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_roundtrip() {
        let response = JsonRpcResponse::success(Some(json!(1)), json!({"ok": true}));
        let raw = serde_json::to_string(&response).unwrap();
        assert!(raw.contains("\"jsonrpc\":\"2.0\""));
        assert!(!raw.contains("error"));

        let parsed: JsonRpcResponse = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.id, Some(json!(1)));
    }

    #[test]
    fn test_error_response_carries_code() {
        let response = JsonRpcResponse::error(None, ERROR_METHOD_NOT_FOUND, "nope");
        assert_eq!(response.error.unwrap().code, -32601);
        assert!(response.result.is_none());
    }

    #[test]
    fn test_tool_declarations_complete() {
        let tools = tool_declarations();
        assert_eq!(tools.len(), 9);

        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"search_recipes"));
        assert!(names.contains(&"get_recipe_details"));
        assert!(names.contains(&"clear_shopping_list"));

        // Mutating tools require the ingredients array.
        let add = tools
            .iter()
            .find(|t| t.name == "add_ingredients_to_shopping_list")
            .unwrap();
        assert_eq!(add.input_schema["required"][0], "ingredients");
    }

    #[test]
    fn test_tool_response_text_content() {
        let response = ToolResponse::text(&json!({"count": 2}));
        assert!(!response.is_error);
        let Content::Text { text } = &response.content[0];
        assert!(text.contains("\"count\": 2"));
    }
}
