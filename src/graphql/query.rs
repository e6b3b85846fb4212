use super::{parse_id, repository, require_author, require_book};
use crate::model::{Author, Book};
use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Book by id. Fails with `NOT_FOUND` when no such book exists.
    async fn book(&self, ctx: &Context<'_>, id: ID) -> Result<Book> {
        require_book(repository(ctx)?, parse_id(&id)?).await
    }

    /// Author by id. Fails with `NOT_FOUND` when no such author exists.
    async fn author(&self, ctx: &Context<'_>, id: ID) -> Result<Author> {
        require_author(repository(ctx)?, parse_id(&id)?).await
    }

    /// Every book, oldest first.
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        repository(ctx)?.list_books().await.map_err(|e| e.extend())
    }

    /// Every author, oldest first.
    async fn authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        repository(ctx)?.list_authors().await.map_err(|e| e.extend())
    }
}
