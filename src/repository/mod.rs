//! Data access for authors and books: one trait, a PostgreSQL and an in-memory backend.

use crate::error::AppResult;
use crate::model::{Author, AuthorUpdate, Book, BookUpdate, NewAuthor, NewBook};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Lookups return `Ok(None)` for a missing row; mutations on a missing row
/// return `AppError::NotFound`.
#[async_trait]
pub trait Repository: Debug + Send + Sync {
    async fn find_author(&self, id: Uuid) -> AppResult<Option<Author>>;
    /// Rows for the given ids, in no particular order; missing ids are skipped.
    async fn find_authors(&self, ids: &[Uuid]) -> AppResult<Vec<Author>>;
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn create_author(&self, input: NewAuthor) -> AppResult<Author>;
    async fn update_author(&self, id: Uuid, update: AuthorUpdate) -> AppResult<Author>;
    /// Fails with `Conflict` while the author still owns books.
    async fn delete_author(&self, id: Uuid) -> AppResult<Author>;

    async fn find_book(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn list_books(&self) -> AppResult<Vec<Book>>;
    /// Books owned by any of the given authors, in creation order.
    async fn books_by_authors(&self, author_ids: &[Uuid]) -> AppResult<Vec<Book>>;
    /// Fails with `Validation` when `author_id` references no author.
    async fn create_book(&self, input: NewBook) -> AppResult<Book>;
    async fn update_book(&self, id: Uuid, update: BookUpdate) -> AppResult<Book>;
    async fn delete_book(&self, id: Uuid) -> AppResult<Book>;

    /// Readiness probe.
    async fn ping(&self) -> AppResult<()>;
}

pub type RepositoryArc = Arc<dyn Repository>;
