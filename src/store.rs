//! Database bootstrap: create the database if missing, open the pool, create tables.

use crate::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const TABLES_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS author (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        age INTEGER,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS book (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        genre TEXT NOT NULL,
        author_id UUID NOT NULL REFERENCES author(id) ON DELETE RESTRICT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS book_author_id_idx ON book (author_id)",
];

/// Create the `author` and `book` tables if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLES_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!("tables ensured");
    Ok(())
}

/// Create the database if needed, connect a pool, and ensure tables.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, AppError> {
    ensure_database_exists(database_url).await?;
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    ensure_tables(&pool).await?;
    Ok(pool)
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, q)) => (name.trim(), Some(q)),
        None => (path_and_query.trim(), None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_targets_postgres_database() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/bookshelf").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "bookshelf");
    }

    #[test]
    fn query_string_is_kept_on_admin_url() {
        let (admin, name) =
            parse_db_name_from_url("postgres://localhost/bookshelf?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(name, "bookshelf");
    }

    #[test]
    fn url_without_path_is_rejected() {
        assert!(parse_db_name_from_url("postgres://localhost").is_err());
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident(r#"odd"name"#), r#""odd""name""#);
    }
}
