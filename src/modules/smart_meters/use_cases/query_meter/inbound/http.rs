// REST transport for the meter tools.
//
// Responsibilities
// - `GET /tools` lists descriptors, `POST /tools/{name}` calls one tool with JSON arguments.
// - Unknown tool is 404, bad arguments or body are 422, storage faults are 503.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};
use tracing::warn;

use crate::modules::smart_meters::use_cases::query_meter::tools::{
    Tool, ToolError, call_tool, descriptors,
};
use crate::shell::state::AppState;

pub async fn list_tools() -> impl IntoResponse {
    Json(descriptors())
}

pub async fn call(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let tool = match Tool::from_name(&name) {
        Ok(tool) => tool,
        Err(e) => return error_response(StatusCode::NOT_FOUND, &e),
    };
    let Json(arguments) = match body {
        Ok(b) => b,
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": e.body_text() })),
            )
                .into_response();
        }
    };

    match call_tool(state.queries.as_ref(), tool, arguments).await {
        Ok(result) => Json(result).into_response(),
        Err(e @ ToolError::UnknownTool(_)) => error_response(StatusCode::NOT_FOUND, &e),
        Err(e @ ToolError::InvalidArguments(_)) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, &e)
        }
        Err(e @ ToolError::Query(_)) => {
            warn!(tool = tool.name(), error = %e, "tool call failed");
            error_response(StatusCode::SERVICE_UNAVAILABLE, &e)
        }
    }
}

fn error_response(status: StatusCode, err: &ToolError) -> axum::response::Response {
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
