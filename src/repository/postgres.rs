//! PostgreSQL repository. Plain runtime queries; rows decode through `FromRow`.

use super::Repository;
use crate::error::{AppError, AppResult};
use crate::model::{Author, AuthorUpdate, Book, BookUpdate, NewAuthor, NewBook};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const AUTHOR_COLUMNS: &str = "id, name, age, created_at";
const BOOK_COLUMNS: &str = "id, name, genre, author_id, created_at";

#[derive(Clone, Debug)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        PgRepository { pool }
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[async_trait]
impl Repository for PgRepository {
    async fn find_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        let sql = format!("SELECT {} FROM author WHERE id = $1", AUTHOR_COLUMNS);
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query_as::<_, Author>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_authors(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {} FROM author WHERE id = ANY($1)", AUTHOR_COLUMNS);
        tracing::debug!(sql = %sql, ids = ?ids, "query");
        let rows = sqlx::query_as::<_, Author>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let sql = format!("SELECT {} FROM author ORDER BY created_at, id", AUTHOR_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Author>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn create_author(&self, input: NewAuthor) -> AppResult<Author> {
        let sql = format!(
            "INSERT INTO author (id, name, age) VALUES ($1, $2, $3) RETURNING {}",
            AUTHOR_COLUMNS
        );
        tracing::debug!(sql = %sql, name = %input.name, "query");
        let row = sqlx::query_as::<_, Author>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(input.age)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_author(&self, id: Uuid, update: AuthorUpdate) -> AppResult<Author> {
        let sql = format!(
            "UPDATE author SET name = COALESCE($2, name), age = CASE WHEN $3 THEN $4 ELSE age END WHERE id = $1 RETURNING {}",
            AUTHOR_COLUMNS
        );
        tracing::debug!(sql = %sql, %id, "query");
        sqlx::query_as::<_, Author>(&sql)
            .bind(id)
            .bind(update.name)
            .bind(update.age.is_some())
            .bind(update.age.flatten())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("author {}", id)))
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<Author> {
        let sql = format!("DELETE FROM author WHERE id = $1 RETURNING {}", AUTHOR_COLUMNS);
        tracing::debug!(sql = %sql, %id, "query");
        sqlx::query_as::<_, Author>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict(format!("author {} still has books", id))
                } else {
                    AppError::Db(e)
                }
            })?
            .ok_or_else(|| AppError::NotFound(format!("author {}", id)))
    }

    async fn find_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        let sql = format!("SELECT {} FROM book WHERE id = $1", BOOK_COLUMNS);
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let sql = format!("SELECT {} FROM book ORDER BY created_at, id", BOOK_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn books_by_authors(&self, author_ids: &[Uuid]) -> AppResult<Vec<Book>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {} FROM book WHERE author_id = ANY($1) ORDER BY created_at, id",
            BOOK_COLUMNS
        );
        tracing::debug!(sql = %sql, author_ids = ?author_ids, "query");
        let rows = sqlx::query_as::<_, Book>(&sql)
            .bind(author_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_book(&self, input: NewBook) -> AppResult<Book> {
        let sql = format!(
            "INSERT INTO book (id, name, genre, author_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            BOOK_COLUMNS
        );
        tracing::debug!(sql = %sql, name = %input.name, author_id = %input.author_id, "query");
        sqlx::query_as::<_, Book>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.genre)
            .bind(input.author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Validation(format!("author {} does not exist", input.author_id))
                } else {
                    AppError::Db(e)
                }
            })
    }

    async fn update_book(&self, id: Uuid, update: BookUpdate) -> AppResult<Book> {
        let sql = format!(
            "UPDATE book SET name = COALESCE($2, name), genre = COALESCE($3, genre) WHERE id = $1 RETURNING {}",
            BOOK_COLUMNS
        );
        tracing::debug!(sql = %sql, %id, "query");
        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .bind(update.name)
            .bind(update.genre)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("book {}", id)))
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<Book> {
        let sql = format!("DELETE FROM book WHERE id = $1 RETURNING {}", BOOK_COLUMNS);
        tracing::debug!(sql = %sql, %id, "query");
        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("book {}", id)))
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
