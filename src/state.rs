//! Shared application state for all routes.

use crate::graphql::{build_schema, BookshelfSchema};
use crate::repository::RepositoryArc;

#[derive(Clone)]
pub struct AppState {
    pub repo: RepositoryArc,
    /// Built once; its data holds the repository and the relationship loaders.
    pub schema: BookshelfSchema,
    /// Serve GraphiQL on `GET /graphql` requests without a query.
    pub graphiql: bool,
}

impl AppState {
    pub fn new(repo: RepositoryArc) -> Self {
        let schema = build_schema(repo.clone());
        AppState {
            repo,
            schema,
            graphiql: true,
        }
    }

    pub fn with_graphiql(mut self, enabled: bool) -> Self {
        self.graphiql = enabled;
        self
    }
}
