//! Author and Book records as stored and returned by the repository.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    pub genre: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewAuthor {
    pub name: String,
    pub age: Option<i32>,
}

#[derive(Clone, Debug)]
pub struct NewBook {
    pub name: String,
    pub genre: String,
    pub author_id: Uuid,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Clone, Debug, Default)]
pub struct AuthorUpdate {
    pub name: Option<String>,
    /// `Some(None)` clears the age.
    pub age: Option<Option<i32>>,
}

impl AuthorUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }
}

#[derive(Clone, Debug, Default)]
pub struct BookUpdate {
    pub name: Option<String>,
    pub genre: Option<String>,
}

impl BookUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.genre.is_none()
    }
}
