use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

use receptar::{
    api::handlers::AppState,
    catalog::{RecipeCatalog, RecipeRecord},
    config::{DataConfig, PaginationConfig, SearchConfig, Settings, ServerConfig},
    mcp::{schema::JsonRpcRequest, McpServer},
    search::NoopSearch,
    shopping::ShoppingList,
};

fn record(
    id: &str,
    name: &str,
    ingredients: &[&str],
    diet: &[&str],
    meal_type: &[&str],
) -> RecipeRecord {
    RecipeRecord {
        id: id.to_string(),
        name: name.to_string(),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        diet: diet.iter().map(|s| s.to_string()).collect(),
        meal_type: meal_type.iter().map(|s| s.to_string()).collect(),
        steps: "Postup přípravy.".to_string(),
    }
}

fn test_server() -> McpServer {
    let records = vec![
        record(
            "1",
            "Bramborová polévka",
            &["Brambory", "Cibule"],
            &["vegetarian"],
            &["polévka"],
        ),
        record("2", "Guláš", &["Hovězí", "Cibule"], &[], &["hlavní chod"]),
    ];

    let settings = Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8001,
            external_url: None,
        },
        data: DataConfig {
            csv_path: "data/recipes.csv".into(),
        },
        search: SearchConfig {
            enabled: false,
            default_limit: 10,
            max_limit: 50,
        },
        pagination: PaginationConfig {
            page_size: 10,
            max_request_body_size: 1048576,
        },
    };

    McpServer::new(AppState {
        catalog: Arc::new(RecipeCatalog::new(records)),
        shopping_list: Arc::new(RwLock::new(ShoppingList::new())),
        search: Arc::new(NoopSearch),
        settings,
    })
}

fn request(method: &str, params: Value) -> JsonRpcRequest {
    serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": 1,
    }))
    .unwrap()
}

fn tool_call(name: &str, arguments: Value) -> JsonRpcRequest {
    request("tools/call", json!({"name": name, "arguments": arguments}))
}

/// Unwrap the JSON payload out of a tool response's text content.
fn tool_result(response: &receptar::mcp::schema::JsonRpcResponse) -> Value {
    let result = response.result.as_ref().expect("tool call succeeded");
    assert_eq!(result["isError"], false);
    let text = result["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn test_initialize() {
    let server = test_server();
    let response = server
        .dispatch(request("initialize", json!({})))
        .await
        .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "receptar-recipe-shopping-server");
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let server = test_server();
    let notification: JsonRpcRequest = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "method": "notifications/initialized",
    }))
    .unwrap();

    assert!(server.dispatch(notification).await.is_none());
}

#[tokio::test]
async fn test_tools_list() {
    let server = test_server();
    let response = server
        .dispatch(request("tools/list", json!({})))
        .await
        .unwrap();

    let tools = response.result.unwrap()["tools"].as_array().unwrap().len();
    assert_eq!(tools, 9);
}

#[tokio::test]
async fn test_unknown_method() {
    let server = test_server();
    let response = server
        .dispatch(request("recipes/teleport", json!({})))
        .await
        .unwrap();

    assert_eq!(response.error.unwrap().code, -32601);
}

#[tokio::test]
async fn test_search_recipes_tool() {
    let server = test_server();
    let response = server
        .dispatch(tool_call("search_recipes", json!({"diet": "vegetarian"})))
        .await
        .unwrap();

    let result = tool_result(&response);
    assert_eq!(result["total_found"], 1);
    assert_eq!(result["returned"], 1);
    assert_eq!(result["recipes"][0]["name"], "Bramborová polévka");
    assert_eq!(result["filters_applied"]["diet"], "vegetarian");
}

#[tokio::test]
async fn test_search_recipes_tool_clamps_limit() {
    let server = test_server();
    let response = server
        .dispatch(tool_call("search_recipes", json!({"name": "a", "limit": 500})))
        .await
        .unwrap();

    let result = tool_result(&response);
    assert_eq!(result["filters_applied"]["limit"], 50);
}

#[tokio::test]
async fn test_search_recipes_tool_without_filters_matches_all() {
    let server = test_server();
    let response = server
        .dispatch(tool_call("search_recipes", json!({})))
        .await
        .unwrap();

    let result = tool_result(&response);
    assert_eq!(result["total_found"], 2);
}

#[tokio::test]
async fn test_get_recipe_details() {
    let server = test_server();

    let response = server
        .dispatch(tool_call("get_recipe_details", json!({"recipe_name": "Guláš"})))
        .await
        .unwrap();
    let result = tool_result(&response);
    assert_eq!(result["found"], true);
    assert_eq!(result["recipe"]["id"], "2");

    // A lookup miss is a successful tool result.
    let response = server
        .dispatch(tool_call(
            "get_recipe_details",
            json!({"recipe_name": "Neexistuje"}),
        ))
        .await
        .unwrap();
    let result = tool_result(&response);
    assert_eq!(result["found"], false);
    assert!(result["suggestion"].as_str().unwrap().contains("search_recipes"));

    // A missing name is invalid params.
    let response = server
        .dispatch(tool_call("get_recipe_details", json!({})))
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32602);
}

#[tokio::test]
async fn test_catalog_set_tools() {
    let server = test_server();

    let response = server
        .dispatch(tool_call("get_all_ingredients", json!({})))
        .await
        .unwrap();
    let result = tool_result(&response);
    assert_eq!(result["count"], 3);
    assert_eq!(result["ingredients"], json!(["Brambory", "Cibule", "Hovězí"]));

    let response = server
        .dispatch(tool_call("get_all_diet_types", json!({})))
        .await
        .unwrap();
    assert_eq!(tool_result(&response)["diet_types"], json!(["vegetarian"]));

    let response = server
        .dispatch(tool_call("get_all_meal_types", json!({})))
        .await
        .unwrap();
    assert_eq!(
        tool_result(&response)["meal_types"],
        json!(["hlavní chod", "polévka"])
    );
}

#[tokio::test]
async fn test_shopping_list_tools_flow() {
    let server = test_server();

    let response = server
        .dispatch(tool_call(
            "add_ingredients_to_shopping_list",
            json!({"ingredients": ["Mléko", "Cibule", "Chléb", "Máslo"]}),
        ))
        .await
        .unwrap();
    let result = tool_result(&response);
    assert_eq!(result["count"], 4);

    let response = server
        .dispatch(tool_call(
            "remove_ingredients_from_shopping_list",
            json!({"ingredients": ["Cibule", "Máslo", "Neexistuje"]}),
        ))
        .await
        .unwrap();
    let result = tool_result(&response);
    assert_eq!(result["shopping_list"], json!(["Chléb", "Mléko"]));

    let response = server
        .dispatch(tool_call("clear_shopping_list", json!({})))
        .await
        .unwrap();
    assert_eq!(tool_result(&response)["count"], 0);

    let response = server
        .dispatch(tool_call("get_shopping_list", json!({})))
        .await
        .unwrap();
    assert_eq!(tool_result(&response)["shopping_list"], json!([]));
}

#[tokio::test]
async fn test_shopping_list_tools_validation() {
    let server = test_server();

    // Not an array.
    let response = server
        .dispatch(tool_call(
            "add_ingredients_to_shopping_list",
            json!({"ingredients": "Mléko"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32602);

    // Empty array.
    let response = server
        .dispatch(tool_call(
            "remove_ingredients_from_shopping_list",
            json!({"ingredients": []}),
        ))
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32602);

    // Neither attempt mutated the list.
    let response = server
        .dispatch(tool_call("get_shopping_list", json!({})))
        .await
        .unwrap();
    assert_eq!(tool_result(&response)["count"], 0);
}

#[tokio::test]
async fn test_unknown_tool() {
    let server = test_server();
    let response = server
        .dispatch(tool_call("order_groceries", json!({})))
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32602);
}
