//! Bookshelf: a GraphQL CRUD API over authors and their books.

pub mod config;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{AppConfig, StoreConfig};
pub use error::{AppError, AppResult, ConfigError};
pub use graphql::{build_schema, BookshelfSchema};
pub use repository::{MemoryRepository, PgRepository, Repository, RepositoryArc};
pub use routes::app;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
