//! GraphQL schema: `Author`/`Book` types, the query and mutation roots, and
//! the batched loaders behind relationship fields.
//!
//! Resolver failures are GraphQL errors whose extensions carry `code`
//! (`NOT_FOUND`, `BAD_REQUEST`, `VALIDATION`, `CONFLICT`, `DATABASE_ERROR`)
//! and the matching HTTP `status`.

mod loader;
mod mutation;
mod query;
mod types;

pub use loader::{AuthorLoader, BooksByAuthorLoader};
pub use mutation::MutationRoot;
pub use query::QueryRoot;

use crate::error::AppError;
use crate::model::{Author, Book};
use crate::repository::RepositoryArc;
use async_graphql::extensions::Tracing;
use async_graphql::{Context, EmptySubscription, ErrorExtensions, Result, Schema, ID};
use uuid::Uuid;

pub type BookshelfSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(repo: RepositoryArc) -> BookshelfSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .extension(Tracing)
        .data(AuthorLoader::new(repo.clone()).into_data_loader())
        .data(BooksByAuthorLoader::new(repo.clone()).into_data_loader())
        .data(repo)
        .finish()
}

fn repository<'a>(ctx: &Context<'a>) -> Result<&'a RepositoryArc> {
    ctx.data::<RepositoryArc>()
}

fn parse_id(id: &ID) -> Result<Uuid> {
    Uuid::parse_str(id.as_str())
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id.as_str())).extend())
}

async fn require_author(repo: &RepositoryArc, id: Uuid) -> Result<Author> {
    repo.find_author(id)
        .await
        .map_err(|e| e.extend())?
        .ok_or_else(|| AppError::NotFound(format!("author {}", id)).extend())
}

async fn require_book(repo: &RepositoryArc, id: Uuid) -> Result<Book> {
    repo.find_book(id)
        .await
        .map_err(|e| e.extend())?
        .ok_or_else(|| AppError::NotFound(format!("book {}", id)).extend())
}
