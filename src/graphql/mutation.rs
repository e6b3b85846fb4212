use super::{parse_id, repository, require_author, require_book};
use crate::model::{Author, AuthorUpdate, Book, BookUpdate, NewAuthor, NewBook};
use async_graphql::{Context, ErrorExtensions, MaybeUndefined, Object, Result, ID};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_author(&self, ctx: &Context<'_>, name: String, age: Option<i32>) -> Result<Author> {
        let author = repository(ctx)?
            .create_author(NewAuthor { name, age })
            .await
            .map_err(|e| e.extend())?;
        tracing::info!(id = %author.id, "author created");
        Ok(author)
    }

    /// Fails with `VALIDATION` when `authorId` references no author.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        name: String,
        genre: String,
        author_id: ID,
    ) -> Result<Book> {
        let author_id = parse_id(&author_id)?;
        let book = repository(ctx)?
            .create_book(NewBook {
                name,
                genre,
                author_id,
            })
            .await
            .map_err(|e| e.extend())?;
        tracing::info!(id = %book.id, author_id = %book.author_id, "book created");
        Ok(book)
    }

    /// Omitted arguments leave the stored value unchanged; `age: null` clears the age.
    async fn update_author(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        age: MaybeUndefined<i32>,
    ) -> Result<Author> {
        let id = parse_id(&id)?;
        let repo = repository(ctx)?;
        let age = match age {
            MaybeUndefined::Undefined => None,
            MaybeUndefined::Null => Some(None),
            MaybeUndefined::Value(age) => Some(Some(age)),
        };
        let update = AuthorUpdate { name, age };
        if update.is_empty() {
            return require_author(repo, id).await;
        }
        repo.update_author(id, update).await.map_err(|e| e.extend())
    }

    /// Omitted arguments leave the stored value unchanged.
    async fn update_book(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        genre: Option<String>,
    ) -> Result<Book> {
        let id = parse_id(&id)?;
        let repo = repository(ctx)?;
        let update = BookUpdate { name, genre };
        if update.is_empty() {
            return require_book(repo, id).await;
        }
        repo.update_book(id, update).await.map_err(|e| e.extend())
    }

    /// Fails with `CONFLICT` while the author still owns books.
    async fn delete_author(&self, ctx: &Context<'_>, id: ID) -> Result<Author> {
        let id = parse_id(&id)?;
        let author = repository(ctx)?
            .delete_author(id)
            .await
            .map_err(|e| e.extend())?;
        tracing::info!(%id, "author deleted");
        Ok(author)
    }

    async fn delete_book(&self, ctx: &Context<'_>, id: ID) -> Result<Book> {
        let id = parse_id(&id)?;
        let book = repository(ctx)?
            .delete_book(id)
            .await
            .map_err(|e| e.extend())?;
        tracing::info!(%id, "book deleted");
        Ok(book)
    }
}
