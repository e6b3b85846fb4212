//! The GraphQL route: POST executes, GET executes queries or serves GraphiQL.

use super::GRAPHQL_PATH;
use crate::handlers::graphql::{execute, execute_get};
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn graphql_routes(state: AppState) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, post(execute).get(execute_get))
        .with_state(state)
}
