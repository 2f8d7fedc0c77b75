// JSON-RPC 2.0 endpoint speaking the Model Context Protocol tool methods.
//
// Purpose
// - Let MCP clients discover and call the meter tools over streamable HTTP.
//
// Responsibilities
// - `initialize`, `ping`, `tools/list`, `tools/call`.
// - Notifications (no id member) are acknowledged with 202 and no body.
// - Unknown tools and bad arguments are invalid params. Storage faults are internal errors,
//   never a successful result carrying a sentinel.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::modules::smart_meters::use_cases::query_meter::tools::{
    Tool, ToolError, call_tool, descriptors,
};
use crate::shell::state::AppState;

pub const PROTOCOL_VERSION: &str = "2025-03-26";
pub const SERVER_NAME: &str = "smart_meters";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return Json(JsonRpcResponse::failure(Value::Null, PARSE_ERROR, "parse error"))
            .into_response();
    };
    // `"id": null` is a request; only an absent id makes a notification.
    let is_notification = body.get("id").is_none();
    let request: JsonRpcRequest = match serde_json::from_value(body) {
        Ok(r) => r,
        Err(e) => {
            return Json(JsonRpcResponse::failure(Value::Null, INVALID_REQUEST, e.to_string()))
                .into_response();
        }
    };
    if request.jsonrpc != "2.0" {
        let id = request.id.unwrap_or(Value::Null);
        return Json(JsonRpcResponse::failure(id, INVALID_REQUEST, "jsonrpc must be \"2.0\""))
            .into_response();
    }

    if is_notification {
        debug!(method = %request.method, "notification acknowledged");
        return StatusCode::ACCEPTED.into_response();
    }
    let id = request.id.unwrap_or(Value::Null);

    let response = match dispatch(&state, &request.method, request.params).await {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err((code, message)) => JsonRpcResponse::failure(id, code, message),
    };
    Json(response).into_response()
}

async fn dispatch(state: &AppState, method: &str, params: Value) -> Result<Value, (i64, String)> {
    match method {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") }
        })),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": descriptors() })),
        "tools/call" => {
            let params: CallToolParams =
                serde_json::from_value(params).map_err(|e| (INVALID_PARAMS, e.to_string()))?;
            let tool = Tool::from_name(&params.name).map_err(|e| (INVALID_PARAMS, e.to_string()))?;
            match call_tool(state.queries.as_ref(), tool, params.arguments).await {
                Ok(result) => Ok(json!({
                    "content": [{ "type": "text", "text": result.to_string() }],
                    "structuredContent": { "result": result },
                    "isError": false
                })),
                Err(e @ (ToolError::UnknownTool(_) | ToolError::InvalidArguments(_))) => {
                    Err((INVALID_PARAMS, e.to_string()))
                }
                Err(e @ ToolError::Query(_)) => {
                    warn!(tool = tool.name(), error = %e, "tool call failed");
                    Err((INTERNAL_ERROR, e.to_string()))
                }
            }
        }
        other => Err((METHOD_NOT_FOUND, format!("method not found: {other}"))),
    }
}
