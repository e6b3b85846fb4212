//! GraphQL execution over POST and GET, and the GraphiQL explorer page.

use crate::error::AppError;
use crate::state::AppState;
use async_graphql::http::{parse_query_string, GraphiQLSource};
use async_graphql::parser::{
    parse_query,
    types::{DocumentOperations, OperationType},
};
use async_graphql::{BatchRequest, BatchResponse, Request};
use axum::{
    extract::{rejection::JsonRejection, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

/// Executes a single or batched GraphQL request posted as JSON.
pub async fn execute(
    State(state): State<AppState>,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, AppError> {
    let Json(request) = body.map_err(rejection_error)?;
    Ok(Json(state.schema.execute_batch(request).await))
}

/// Executes `?query=...` (queries only). Without a query, serves GraphiQL when enabled.
pub async fn execute_get(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Response, AppError> {
    let request = match raw.as_deref().filter(|q| !q.is_empty()) {
        Some(q) => Some(parse_query_string(q).map_err(|e| AppError::BadRequest(e.to_string()))?),
        None => None,
    };
    let request = request.filter(|r| !r.query.trim().is_empty());
    match request {
        Some(request) => {
            if selects_mutation(&request) {
                return Err(AppError::MethodNotAllowed(
                    "mutations can only be performed from a POST request".into(),
                ));
            }
            Ok(Json(state.schema.execute(request).await).into_response())
        }
        None if state.graphiql => Ok(graphiql().await.into_response()),
        None => Err(AppError::BadRequest("must provide a query string".into())),
    }
}

pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(crate::routes::GRAPHQL_PATH).finish())
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(rejection.body_text())
    } else {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Whether the operation the request would run is a mutation. Unparsable
/// documents are left for execution to report.
fn selects_mutation(request: &Request) -> bool {
    let Ok(document) = parse_query(&request.query) else {
        return false;
    };
    let operation = match &document.operations {
        DocumentOperations::Single(op) => Some(op),
        DocumentOperations::Multiple(ops) => request
            .operation_name
            .as_deref()
            .and_then(|name| ops.iter().find(|(n, _)| n.as_str() == name))
            .map(|(_, op)| op),
    };
    operation.is_some_and(|op| op.node.ty == OperationType::Mutation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: &str) -> Request {
        Request::new(query)
    }

    #[test]
    fn mutation_detection() {
        assert!(selects_mutation(&request("mutation { deleteBook(id: \"x\") { id } }")));
        assert!(!selects_mutation(&request("{ books { id } }")));
        assert!(!selects_mutation(&request("query Q { books { id } }")));
        assert!(!selects_mutation(&request("{ broken")));

        let doc = "query Q { books { id } } mutation M { addAuthor(name: \"x\") { id } }";
        assert!(selects_mutation(&request(doc).operation_name("M")));
        assert!(!selects_mutation(&request(doc).operation_name("Q")));
    }
}
