//! End-to-end tests for tool dispatch against a mock paperless API.
//!
//! Registry tests drive `ToolRegistry::call_tool` directly; transport tests
//! stand up the HTTP JSON-RPC endpoint and go through it with a real client.

mod common;

use std::sync::Arc;

use serde_json::json;

use paperless_mcp_server::core::Config;
use paperless_mcp_server::domains::tools::{ToolError, ToolRegistry};
use paperless_mcp_server::paperless::PaperlessClient;

use common::{FIXTURE_TOKEN, PaperlessFixture, spawn_fixture};

async fn registry_for(fixture: &PaperlessFixture) -> ToolRegistry {
    let client = Arc::new(PaperlessClient::new(
        fixture.base_url.clone(),
        FIXTURE_TOKEN,
    ));
    ToolRegistry::new(client, Arc::new(Config::default()))
}

#[tokio::test]
async fn list_tags_uses_default_pagination() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    let value = registry.call_tool("list_tags", json!({})).await.unwrap();

    let query = fixture.last_query().unwrap();
    assert_eq!(query.get("page").map(String::as_str), Some("1"));
    assert_eq!(query.get("page_size").map(String::as_str), Some("25"));

    assert_eq!(value["count"], 60);
    assert_eq!(value["page"], 1);
    assert_eq!(value["page_size"], 25);
    assert_eq!(value["has_next"], true);
    assert_eq!(value["has_prev"], false);
    assert_eq!(value["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn oversized_page_size_is_clamped() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    let value = registry
        .call_tool("list_tags", json!({ "page": 2, "page_size": 500 }))
        .await
        .unwrap();

    let query = fixture.last_query().unwrap();
    assert_eq!(query.get("page").map(String::as_str), Some("2"));
    assert_eq!(query.get("page_size").map(String::as_str), Some("100"));
    assert_eq!(value["page"], 2);
    assert_eq!(value["page_size"], 100);
}

#[tokio::test]
async fn backend_not_found_surfaces_api_message() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    let err = registry
        .call_tool("get_tag", json!({ "tag_id": 404 }))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::ExecutionFailed(_)));
    assert!(err.to_string().contains("No Tag matches the given query."));
}

#[tokio::test]
async fn validation_failures_never_touch_the_network() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    let cases = [
        ("get_tag", json!({})),
        ("get_tag", json!({ "tag_id": -3 })),
        ("create_tag", json!({ "name": "" })),
        ("update_document", json!({ "document_id": 7 })),
        ("search_documents", json!({ "query": "  " })),
        ("bulk_edit_documents", json!({ "document_ids": [] })),
    ];
    for (tool, args) in cases {
        let err = registry.call_tool(tool, args).await.unwrap_err();
        assert!(err.is_validation(), "{tool} should fail validation");
    }

    assert_eq!(fixture.hits(), 0);
}

#[tokio::test]
async fn unknown_tool_is_reported_without_network() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    let err = registry
        .call_tool("export_documents", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::NotFound(_)));
    assert_eq!(fixture.hits(), 0);
}

#[tokio::test]
async fn create_tag_returns_created_record() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    let value = registry
        .call_tool("create_tag", json!({ "name": "urgent", "color": "#00ff00" }))
        .await
        .unwrap();

    assert_eq!(value["id"], 42);
    assert_eq!(value["name"], "urgent");
    assert_eq!(value["color"], "#00ff00");

    let body = fixture.last_body().unwrap();
    assert_eq!(body, json!({ "name": "urgent", "color": "#00ff00" }));
}

#[tokio::test]
async fn update_forwards_exact_field_set() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    registry
        .call_tool(
            "update_correspondent",
            json!({
                "correspondent_id": 5,
                "name": "ACME Corp",
                "custom_flag": true
            }),
        )
        .await
        .unwrap();

    // The ID routes the request; everything else goes through verbatim.
    let body = fixture.last_body().unwrap();
    assert_eq!(body, json!({ "name": "ACME Corp", "custom_flag": true }));
}

#[tokio::test]
async fn bulk_edit_makes_a_single_backing_call() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    let value = registry
        .call_tool(
            "bulk_edit_documents",
            json!({ "document_ids": [3, 5], "add_tags": [1] }),
        )
        .await
        .unwrap();

    assert_eq!(fixture.hits(), 1);
    assert_eq!(value["success"], true);
    assert_eq!(value["affected_documents"], 2);

    let body = fixture.last_body().unwrap();
    assert_eq!(body, json!({ "documents": [3, 5], "add_tags": [1] }));
}

#[tokio::test]
async fn search_passes_query_and_pagination() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    let value = registry
        .call_tool("search_documents", json!({ "query": "invoice" }))
        .await
        .unwrap();

    let query = fixture.last_query().unwrap();
    assert_eq!(query.get("query").map(String::as_str), Some("invoice"));
    assert_eq!(query.get("page").map(String::as_str), Some("1"));
    assert_eq!(query.get("page_size").map(String::as_str), Some("25"));
    assert_eq!(value["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn find_similar_hits_the_similar_endpoint() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    let value = registry
        .call_tool("find_similar_documents", json!({ "document_id": 7 }))
        .await
        .unwrap();

    assert_eq!(value["count"], 1);
    assert_eq!(value["items"][0]["title"], "Invoice 2024-02");
}

#[tokio::test]
async fn document_content_is_returned_with_id() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    let value = registry
        .call_tool("get_document_content", json!({ "document_id": 7 }))
        .await
        .unwrap();

    assert_eq!(value["id"], 7);
    assert_eq!(value["content"], "Total amount due: 42.00 EUR");
}

#[tokio::test]
async fn repeated_get_returns_identical_content() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    let first = registry
        .call_tool("get_tag", json!({ "tag_id": 1 }))
        .await
        .unwrap();
    let second = registry
        .call_tool("get_tag", json!({ "tag_id": 1 }))
        .await
        .unwrap();

    // Reads hold no state: two calls, two fetches, one answer.
    assert_eq!(first, second);
    assert_eq!(fixture.hits(), 2);
}

#[tokio::test]
async fn delete_returns_success_envelope() {
    let fixture = spawn_fixture().await;
    let registry = registry_for(&fixture).await;

    let value = registry
        .call_tool("delete_tag", json!({ "tag_id": 2 }))
        .await
        .unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["id"], 2);
    assert_eq!(value["message"], "Tag deleted successfully");
}

#[tokio::test]
async fn invalid_paperless_token_surfaces_as_execution_failure() {
    let fixture = spawn_fixture().await;
    let client = Arc::new(PaperlessClient::new(fixture.base_url.clone(), "wrong-token"));
    let registry = ToolRegistry::new(client, Arc::new(Config::default()));

    let err = registry
        .call_tool("list_tags", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::ExecutionFailed(_)));
    assert!(err.to_string().contains("Invalid token."));
}

// ============================================================================
// HTTP transport
// ============================================================================

#[cfg(feature = "http")]
mod http_transport {
    use super::*;
    use paperless_mcp_server::core::McpServer;
    use paperless_mcp_server::core::transport::HttpConfig;
    use paperless_mcp_server::core::transport::http::HttpTransport;

    const GATEWAY_TOKEN: &str = "gateway-secret";

    /// Spawn the MCP HTTP endpoint backed by the paperless fixture.
    async fn spawn_http_server(fixture: &PaperlessFixture) -> String {
        let mut config = Config::default();
        config.paperless.url = fixture.base_url.clone();
        config.paperless.token = FIXTURE_TOKEN.to_string();
        config.auth_token = Some(GATEWAY_TOKEN.to_string());

        let server = McpServer::new(config);
        let transport = HttpTransport::new(HttpConfig::default());
        let app = transport.build_router(server);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mcp listener");
        let addr = listener.local_addr().expect("mcp local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mcp serve");
        });

        format!("http://{addr}")
    }

    async fn rpc(
        base: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> (u16, serde_json::Value) {
        let client = reqwest::Client::new();
        let mut request = client.post(format!("{base}/mcp")).json(&body);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        let response = request.send().await.expect("rpc request");
        let status = response.status().as_u16();
        let value = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_is_open_without_credentials() {
        let fixture = spawn_fixture().await;
        let base = spawn_http_server(&fixture).await;

        let response = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["server"], "paperless-mcp-server");
    }

    #[tokio::test]
    async fn rpc_requires_bearer_token() {
        let fixture = spawn_fixture().await;
        let base = spawn_http_server(&fixture).await;

        let body = json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" });
        let (status, _) = rpc(&base, None, body.clone()).await;
        assert_eq!(status, 401);

        let (status, _) = rpc(&base, Some("wrong"), body.clone()).await;
        assert_eq!(status, 401);

        let (status, value) = rpc(&base, Some(GATEWAY_TOKEN), body).await;
        assert_eq!(status, 200);
        assert_eq!(value["result"]["tools"].as_array().unwrap().len(), 36);
    }

    #[tokio::test]
    async fn initialize_reports_server_identity() {
        let fixture = spawn_fixture().await;
        let base = spawn_http_server(&fixture).await;

        let body = json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" });
        let (_, value) = rpc(&base, Some(GATEWAY_TOKEN), body).await;
        assert_eq!(value["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(value["result"]["serverInfo"]["name"], "paperless-mcp-server");
    }

    #[tokio::test]
    async fn tool_call_round_trips_through_rpc() {
        let fixture = spawn_fixture().await;
        let base = spawn_http_server(&fixture).await;

        let body = json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": { "name": "list_tags", "arguments": {} }
        });
        let (status, value) = rpc(&base, Some(GATEWAY_TOKEN), body).await;
        assert_eq!(status, 200);
        assert_eq!(value["result"]["isError"], false);
        assert_eq!(value["result"]["structuredContent"]["count"], 60);
    }

    #[tokio::test]
    async fn notifications_are_acknowledged_statelessly() {
        let fixture = spawn_fixture().await;
        let base = spawn_http_server(&fixture).await;

        let body = json!({ "jsonrpc": "2.0", "id": 1, "method": "notifications/initialized" });
        let (status, value) = rpc(&base, Some(GATEWAY_TOKEN), body).await;
        assert_eq!(status, 200);
        assert!(value.as_object().unwrap().contains_key("result"));
        assert!(value["result"].is_null());
        assert!(value.get("error").is_none());

        // No initialize handshake happened; dispatch still works.
        let body = json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": { "name": "ping", "arguments": {} }
        });
        let (_, value) = rpc(&base, Some(GATEWAY_TOKEN), body).await;
        assert_eq!(value["result"]["isError"], false);
        assert_eq!(value["result"]["structuredContent"]["status"], "ok");
    }

    #[tokio::test]
    async fn rpc_error_codes_match_failure_kind() {
        let fixture = spawn_fixture().await;
        let base = spawn_http_server(&fixture).await;

        // Unknown tool
        let body = json!({
            "jsonrpc": "2.0", "id": 1, "method": "tools/call",
            "params": { "name": "no_such_tool", "arguments": {} }
        });
        let (_, value) = rpc(&base, Some(GATEWAY_TOKEN), body).await;
        assert_eq!(value["error"]["code"], -32601);

        // Invalid arguments
        let body = json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": { "name": "get_tag", "arguments": {} }
        });
        let (_, value) = rpc(&base, Some(GATEWAY_TOKEN), body).await;
        assert_eq!(value["error"]["code"], -32602);

        // Unknown method
        let body = json!({ "jsonrpc": "2.0", "id": 3, "method": "prompts/list" });
        let (_, value) = rpc(&base, Some(GATEWAY_TOKEN), body).await;
        assert_eq!(value["error"]["code"], -32601);
    }
}
