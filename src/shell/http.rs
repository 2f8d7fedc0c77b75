use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Extension, Json, Router,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::modules::smart_meters::use_cases::query_meter::inbound::http as tools_http;
use crate::modules::smart_meters::use_cases::query_meter::inbound::mcp;
use crate::shell::graphql::{AppSchema, schema};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema = schema(state.clone());

    Router::new()
        .route("/health", get(health))
        .route("/mcp", post(mcp::handle))
        .route("/tools", get(tools_http::list_tools))
        .route("/tools/{name}", post(tools_http::call))
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "smart_meters"
    }))
}

async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}
