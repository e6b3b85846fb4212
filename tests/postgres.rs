//! Runs against a live PostgreSQL. Set `DATABASE_URL` and run with `--ignored`.

use bookshelf_graphql::model::{AuthorUpdate, NewAuthor, NewBook};
use bookshelf_graphql::{store, AppError, PgRepository, Repository};
use uuid::Uuid;

async fn repository() -> PgRepository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for postgres tests");
    let pool = store::connect(&url, 2).await.expect("connect");
    PgRepository::new(pool)
}

#[tokio::test]
#[ignore = "needs a running PostgreSQL"]
async fn author_with_books_cannot_be_deleted() {
    let repo = repository().await;
    let author = repo
        .create_author(NewAuthor {
            name: "Iain M. Banks".into(),
            age: None,
        })
        .await
        .unwrap();
    let book = repo
        .create_book(NewBook {
            name: "Excession".into(),
            genre: "sci-fi".into(),
            author_id: author.id,
        })
        .await
        .unwrap();

    let err = repo.delete_author(author.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "{:?}", err);
    assert!(repo.find_author(author.id).await.unwrap().is_some());

    repo.delete_book(book.id).await.unwrap();
    let deleted = repo.delete_author(author.id).await.unwrap();
    assert_eq!(deleted.id, author.id);
}

#[tokio::test]
#[ignore = "needs a running PostgreSQL"]
async fn book_for_unknown_author_is_a_validation_error() {
    let repo = repository().await;
    let err = repo
        .create_book(NewBook {
            name: "Nowhere".into(),
            genre: "none".into(),
            author_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "{:?}", err);
}

#[tokio::test]
#[ignore = "needs a running PostgreSQL"]
async fn partial_update_and_batched_lookups() {
    let repo = repository().await;
    let author = repo
        .create_author(NewAuthor {
            name: "Ann Leckie".into(),
            age: Some(58),
        })
        .await
        .unwrap();
    let updated = repo
        .update_author(
            author.id,
            AuthorUpdate {
                name: Some("Ann Leckie".into()),
                age: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.age, Some(58));
    let cleared = repo
        .update_author(
            author.id,
            AuthorUpdate {
                name: None,
                age: Some(None),
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.age, None);

    let found = repo.find_authors(&[author.id, Uuid::new_v4()]).await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(repo.books_by_authors(&[author.id]).await.unwrap().is_empty());
    assert!(matches!(
        repo.update_author(Uuid::new_v4(), AuthorUpdate::default()).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}
