//! In-memory repository with the same referential rules as the PostgreSQL schema.

use super::Repository;
use crate::error::{AppError, AppResult};
use crate::model::{Author, AuthorUpdate, Book, BookUpdate, NewAuthor, NewBook};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    // Vecs keep insertion order, which is the list order.
    authors: Vec<Author>,
    books: Vec<Book>,
}

#[derive(Debug, Default, Clone)]
pub struct MemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store; books must reference authors in `authors`.
    pub fn with_data(authors: Vec<Author>, books: Vec<Book>) -> AppResult<Self> {
        if let Some(orphan) = books
            .iter()
            .find(|b| !authors.iter().any(|a| a.id == b.author_id))
        {
            return Err(AppError::Validation(format!(
                "author {} does not exist",
                orphan.author_id
            )));
        }
        Ok(MemoryRepository {
            tables: Arc::new(RwLock::new(Tables { authors, books })),
        })
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn find_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        let tables = self.tables.read().await;
        Ok(tables.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn find_authors(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        let tables = self.tables.read().await;
        Ok(tables
            .authors
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        Ok(self.tables.read().await.authors.clone())
    }

    async fn create_author(&self, input: NewAuthor) -> AppResult<Author> {
        let author = Author {
            id: Uuid::new_v4(),
            name: input.name,
            age: input.age,
            created_at: Utc::now(),
        };
        self.tables.write().await.authors.push(author.clone());
        Ok(author)
    }

    async fn update_author(&self, id: Uuid, update: AuthorUpdate) -> AppResult<Author> {
        let mut tables = self.tables.write().await;
        let author = tables
            .authors
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("author {}", id)))?;
        if let Some(name) = update.name {
            author.name = name;
        }
        if let Some(age) = update.age {
            author.age = age;
        }
        Ok(author.clone())
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<Author> {
        let mut tables = self.tables.write().await;
        let pos = tables
            .authors
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("author {}", id)))?;
        if tables.books.iter().any(|b| b.author_id == id) {
            return Err(AppError::Conflict(format!("author {} still has books", id)));
        }
        Ok(tables.authors.remove(pos))
    }

    async fn find_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        let tables = self.tables.read().await;
        Ok(tables.books.iter().find(|b| b.id == id).cloned())
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.tables.read().await.books.clone())
    }

    async fn books_by_authors(&self, author_ids: &[Uuid]) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(tables
            .books
            .iter()
            .filter(|b| author_ids.contains(&b.author_id))
            .cloned()
            .collect())
    }

    async fn create_book(&self, input: NewBook) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        if !tables.authors.iter().any(|a| a.id == input.author_id) {
            return Err(AppError::Validation(format!(
                "author {} does not exist",
                input.author_id
            )));
        }
        let book = Book {
            id: Uuid::new_v4(),
            name: input.name,
            genre: input.genre,
            author_id: input.author_id,
            created_at: Utc::now(),
        };
        tables.books.push(book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: Uuid, update: BookUpdate) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        let book = tables
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("book {}", id)))?;
        if let Some(name) = update.name {
            book.name = name;
        }
        if let Some(genre) = update.genre {
            book.genre = genre;
        }
        Ok(book.clone())
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        let pos = tables
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("book {}", id)))?;
        Ok(tables.books.remove(pos))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn author(repo: &MemoryRepository, name: &str) -> Author {
        repo.create_author(NewAuthor {
            name: name.into(),
            age: Some(40),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn create_book_requires_existing_author() {
        let repo = MemoryRepository::new();
        let err = repo
            .create_book(NewBook {
                name: "Dune".into(),
                genre: "sci-fi".into(),
                author_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(repo.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_author_with_books_is_refused() {
        let repo = MemoryRepository::new();
        let herbert = author(&repo, "Frank Herbert").await;
        repo.create_book(NewBook {
            name: "Dune".into(),
            genre: "sci-fi".into(),
            author_id: herbert.id,
        })
        .await
        .unwrap();

        let err = repo.delete_author(herbert.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.list_authors().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let repo = MemoryRepository::new();
        let a = author(&repo, "Ursula").await;
        let updated = repo
            .update_author(
                a.id,
                AuthorUpdate {
                    name: Some("Ursula K. Le Guin".into()),
                    age: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Ursula K. Le Guin");
        assert_eq!(updated.age, Some(40));

        let cleared = repo
            .update_author(
                a.id,
                AuthorUpdate {
                    name: None,
                    age: Some(None),
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.age, None);
        assert_eq!(cleared.name, "Ursula K. Le Guin");
    }

    #[tokio::test]
    async fn missing_rows() {
        let repo = MemoryRepository::new();
        let id = Uuid::new_v4();
        assert!(repo.find_book(id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete_book(id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            repo.update_book(id, BookUpdate::default()).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn seeding_rejects_orphan_books() {
        let book = Book {
            id: Uuid::new_v4(),
            name: "Orphan".into(),
            genre: "none".into(),
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        assert!(MemoryRepository::with_data(Vec::new(), vec![book]).is_err());
    }
}
