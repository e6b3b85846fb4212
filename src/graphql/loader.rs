//! Batched loaders for relationship fields. Keys requested while one query
//! executes are collected and fetched with a single repository call.

use crate::error::AppError;
use crate::model::{Author, Book};
use crate::repository::RepositoryArc;
use async_graphql::dataloader::{DataLoader, Loader};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Authors by id, backing `Book.author`.
pub struct AuthorLoader {
    repo: RepositoryArc,
}

impl AuthorLoader {
    pub fn new(repo: RepositoryArc) -> Self {
        AuthorLoader { repo }
    }

    pub fn into_data_loader(self) -> DataLoader<Self> {
        DataLoader::new(self, tokio::spawn)
    }
}

impl Loader<Uuid> for AuthorLoader {
    type Value = Author;
    type Error = Arc<AppError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Author>, Self::Error> {
        tracing::debug!(count = keys.len(), "batch load authors");
        let authors = self.repo.find_authors(keys).await.map_err(Arc::new)?;
        Ok(authors.into_iter().map(|a| (a.id, a)).collect())
    }
}

/// Books grouped by owning author id, backing `Author.books`.
pub struct BooksByAuthorLoader {
    repo: RepositoryArc,
}

impl BooksByAuthorLoader {
    pub fn new(repo: RepositoryArc) -> Self {
        BooksByAuthorLoader { repo }
    }

    pub fn into_data_loader(self) -> DataLoader<Self> {
        DataLoader::new(self, tokio::spawn)
    }
}

impl Loader<Uuid> for BooksByAuthorLoader {
    type Value = Vec<Book>;
    type Error = Arc<AppError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Vec<Book>>, Self::Error> {
        tracing::debug!(count = keys.len(), "batch load books by author");
        let books = self.repo.books_by_authors(keys).await.map_err(Arc::new)?;
        // Authors without books still get an entry so they resolve to an empty list.
        let mut grouped: HashMap<Uuid, Vec<Book>> =
            keys.iter().map(|k| (*k, Vec::new())).collect();
        for book in books {
            grouped.entry(book.author_id).or_default().push(book);
        }
        Ok(grouped)
    }
}
