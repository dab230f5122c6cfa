mod common;

use bookmark_api::AppError;
use bookmark_api::domain::entities::{BookmarkUpdate, NewBookmark};
use bookmark_api::domain::repositories::BookmarkRepository;
use bookmark_api::infrastructure::persistence::PgBookmarkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_bookmark(user_id: i64, url: &str, short_url: &str) -> NewBookmark {
    NewBookmark {
        url: url.to_string(),
        short_url: short_url.to_string(),
        body: Some("notes".to_string()),
        user_id,
    }
}

#[sqlx::test]
async fn test_create_bookmark(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = PgBookmarkRepository::new(Arc::new(pool));

    let bookmark = repo
        .create(new_bookmark(user_id, "https://example.com", "abc"))
        .await
        .unwrap();

    assert_eq!(bookmark.url, "https://example.com");
    assert_eq!(bookmark.short_url, "abc");
    assert_eq!(bookmark.body.as_deref(), Some("notes"));
    assert_eq!(bookmark.visit, 0);
    assert_eq!(bookmark.user_id, user_id);

    assert!(repo.url_exists("https://example.com").await.unwrap());
    assert!(!repo.url_exists("https://other.com").await.unwrap());
    assert!(repo.short_url_exists("abc").await.unwrap());
    assert!(!repo.short_url_exists("abd").await.unwrap());
}

#[sqlx::test]
async fn test_unique_constraints(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = PgBookmarkRepository::new(Arc::new(pool));

    repo.create(new_bookmark(user_id, "https://example.com", "abc"))
        .await
        .unwrap();

    let err = repo
        .create(new_bookmark(user_id, "https://other.com", "abc"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(err.violated_constraint(), Some("bookmarks_short_url_key"));

    let err = repo
        .create(new_bookmark(user_id, "https://example.com", "xyz"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(err.to_string(), "URL already exist");
}

#[sqlx::test]
async fn test_find_owned_is_scoped(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    let bob = common::create_test_user(&pool, "bob").await;
    let id = common::create_test_bookmark(&pool, alice, "https://example.com", "abc").await;

    let repo = PgBookmarkRepository::new(Arc::new(pool));

    assert!(repo.find_owned(id, alice).await.unwrap().is_some());
    assert!(repo.find_owned(id, bob).await.unwrap().is_none());
    assert!(repo.update(id, bob, BookmarkUpdate {
        url: "https://evil.com".to_string(),
        body: None,
    })
    .await
    .unwrap()
    .is_none());
    assert!(!repo.delete(id, bob).await.unwrap());
    assert!(repo.find_owned(id, alice).await.unwrap().is_some());
}

#[sqlx::test]
async fn test_list_and_count_by_user(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    let bob = common::create_test_user(&pool, "bob").await;

    let codes = ["aaa", "bbb", "ccc", "ddd", "eee", "fff", "ggg"];
    for (i, code) in codes.iter().enumerate() {
        common::create_test_bookmark(&pool, alice, &format!("https://example.com/{i}"), code).await;
    }
    common::create_test_bookmark(&pool, bob, "https://bob.example.com", "zzz").await;

    let repo = PgBookmarkRepository::new(Arc::new(pool));

    assert_eq!(repo.count_by_user(alice).await.unwrap(), 7);
    assert_eq!(repo.count_by_user(bob).await.unwrap(), 1);

    let first = repo.list_by_user(alice, 5, 0).await.unwrap();
    let rest = repo.list_by_user(alice, 5, 5).await.unwrap();
    assert_eq!(first.len(), 5);
    assert_eq!(rest.len(), 2);
    assert!(first.windows(2).all(|w| w[0].id < w[1].id));
    assert!(first.last().unwrap().id < rest[0].id);
    assert!(first.iter().chain(&rest).all(|b| b.user_id == alice));

    assert!(repo.list_by_user(alice, 5, 10).await.unwrap().is_empty());
    assert_eq!(repo.list_all_by_user(alice).await.unwrap().len(), 7);
}

#[sqlx::test]
async fn test_update_preserves_short_url_and_visit(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    let id = common::create_test_bookmark(&pool, alice, "https://old.com", "abc").await;

    let repo = PgBookmarkRepository::new(Arc::new(pool));
    repo.record_visit("abc").await.unwrap();

    let before = repo.find_owned(id, alice).await.unwrap().unwrap();
    let updated = repo
        .update(id, alice, BookmarkUpdate {
            url: "https://new.com".to_string(),
            body: Some("changed".to_string()),
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.url, "https://new.com");
    assert_eq!(updated.body.as_deref(), Some("changed"));
    assert_eq!(updated.short_url, "abc");
    assert_eq!(updated.visit, 1);
    assert!(updated.updated_at >= before.updated_at);
}

#[sqlx::test]
async fn test_delete(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    let id = common::create_test_bookmark(&pool, alice, "https://example.com", "abc").await;

    let repo = PgBookmarkRepository::new(Arc::new(pool));

    assert!(repo.delete(id, alice).await.unwrap());
    assert!(!repo.delete(id, alice).await.unwrap());
    assert!(repo.find_owned(id, alice).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_record_visit(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    common::create_test_bookmark(&pool, alice, "https://example.com", "abc").await;

    let repo = PgBookmarkRepository::new(Arc::new(pool.clone()));

    assert_eq!(
        repo.record_visit("abc").await.unwrap().as_deref(),
        Some("https://example.com")
    );
    assert!(repo.record_visit("nop").await.unwrap().is_none());
    assert_eq!(common::visit_count(&pool, "abc").await, 1);
}

#[sqlx::test]
async fn test_concurrent_visits_are_not_lost(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    common::create_test_bookmark(&pool, alice, "https://example.com", "abc").await;

    let repo = Arc::new(PgBookmarkRepository::new(Arc::new(pool.clone())));

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.record_visit("abc").await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_some());
    }

    assert_eq!(common::visit_count(&pool, "abc").await, 20);
}

#[sqlx::test]
async fn test_top_visited(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    common::create_test_bookmark(&pool, alice, "https://a.com", "aaa").await;
    common::create_test_bookmark(&pool, alice, "https://b.com", "bbb").await;
    common::create_test_bookmark(&pool, alice, "https://c.com", "ccc").await;

    let repo = PgBookmarkRepository::new(Arc::new(pool));
    for _ in 0..3 {
        repo.record_visit("bbb").await.unwrap();
    }
    repo.record_visit("ccc").await.unwrap();

    let top = repo.top_visited(2).await.unwrap();

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].short_url, "bbb");
    assert_eq!(top[0].visit, 3);
    assert_eq!(top[1].short_url, "ccc");
}
