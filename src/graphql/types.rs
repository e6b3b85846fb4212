//! `Author` and `Book` object types.

use super::loader::{AuthorLoader, BooksByAuthorLoader};
use crate::error::AppError;
use crate::model::{Author, Book};
use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

#[Object]
impl Author {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn age(&self) -> Option<i32> {
        self.age
    }

    /// Books written by this author, oldest first.
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        let loader = ctx.data::<DataLoader<BooksByAuthorLoader>>()?;
        let books = loader
            .load_one(self.id)
            .await
            .map_err(|e| e.as_ref().extend())?;
        Ok(books.unwrap_or_default())
    }
}

#[Object]
impl Book {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn genre(&self) -> &str {
        &self.genre
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<Author> {
        let loader = ctx.data::<DataLoader<AuthorLoader>>()?;
        loader
            .load_one(self.author_id)
            .await
            .map_err(|e| e.as_ref().extend())?
            .ok_or_else(|| AppError::NotFound(format!("author {}", self.author_id)).extend())
    }
}
