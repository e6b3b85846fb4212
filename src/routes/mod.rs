//! Router assembly: GraphQL and common routes, 404 fallback, and the shared layers.

mod common;
mod graphql;

pub use common::common_routes;
pub use graphql::graphql_routes;

use crate::handlers::not_found;
use crate::response::panic_response;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub const GRAPHQL_PATH: &str = "/graphql";

/// Request bodies above this size are rejected with 413.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// The full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(graphql_routes(state.clone()))
        .merge(common_routes(state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}
