//! User directory behavior tests.
//!
//! These run the directory against the in-memory store, so no database
//! connection is required.

use std::sync::Arc;

use tokio_test::{assert_err, assert_ok};

use common::AppError;
use domain::{CreateUser, ObjectId, UpdateUser, UserType};
use user_service_lib::repository::InMemoryUserStore;
use user_service_lib::service::{UserDirectory, UserService};

const SALT: &str = "directory-salt";

fn create_dto(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        name: "Keks".to_string(),
        password: "secret1".to_string(),
        avatar_path: Some("avatars/keks.png".to_string()),
        user_type: UserType::Regular,
    }
}

fn directory() -> (Arc<InMemoryUserStore>, UserDirectory) {
    let store = Arc::new(InMemoryUserStore::new());
    let directory = UserDirectory::new(store.clone());
    (store, directory)
}

#[tokio::test]
async fn test_created_user_found_by_email() {
    let (_, directory) = directory();

    let created = assert_ok!(directory.create(create_dto("keks@example.com"), SALT).await);
    let found = assert_ok!(directory.find_by_email("keks@example.com").await);

    let found = found.expect("user should exist");
    assert_eq!(found.email, "keks@example.com");
    assert_eq!(found.id, created.id);
    assert!(found.verify_password("secret1"));
}

#[tokio::test]
async fn test_find_by_email_is_exact_match() {
    let (_, directory) = directory();
    assert_ok!(directory.create(create_dto("keks@example.com"), SALT).await);

    let found = assert_ok!(directory.find_by_email("KEKS@example.com").await);
    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_or_create_returns_same_record() {
    let (store, directory) = directory();

    let first = assert_ok!(directory.find_or_create(create_dto("keks@example.com"), SALT).await);
    let second = assert_ok!(directory.find_or_create(create_dto("keks@example.com"), SALT).await);

    assert_eq!(first.id, second.id);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_concurrent_find_or_create_converges_on_one_record() {
    let (store, directory) = directory();

    let (first, second) = tokio::join!(
        directory.find_or_create(create_dto("keks@example.com"), SALT),
        directory.find_or_create(create_dto("keks@example.com"), SALT),
    );

    let first = assert_ok!(first);
    let second = assert_ok!(second);
    assert_eq!(first.id, second.id);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let (store, directory) = directory();
    assert_ok!(directory.create(create_dto("keks@example.com"), SALT).await);

    let result = directory.create(create_dto("keks@example.com"), SALT).await;

    assert!(matches!(assert_err!(result), AppError::Conflict(_)));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_invalid_user_never_reaches_store() {
    let (store, directory) = directory();
    let dto = CreateUser {
        password: "123".to_string(),
        ..create_dto("keks@example.com")
    };

    let result = directory.create(dto, SALT).await;

    assert!(matches!(assert_err!(result), AppError::Validation(_)));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_add_favorite_twice_keeps_single_entry() {
    let (_, directory) = directory();
    let user = assert_ok!(directory.create(create_dto("keks@example.com"), SALT).await);
    let offer_id = ObjectId::new();

    assert_ok!(directory.add_to_favorites(user.id, offer_id).await);
    assert_ok!(directory.add_to_favorites(user.id, offer_id).await);

    let favorites = assert_ok!(directory.get_favorites(user.id).await);
    assert_eq!(favorites, vec![offer_id]);
}

#[tokio::test]
async fn test_favorites_keep_insertion_order() {
    let (_, directory) = directory();
    let user = assert_ok!(directory.create(create_dto("keks@example.com"), SALT).await);
    let first = ObjectId::new();
    let second = ObjectId::new();

    assert_ok!(directory.add_to_favorites(user.id, first).await);
    assert_ok!(directory.add_to_favorites(user.id, second).await);

    let favorites = assert_ok!(directory.get_favorites(user.id).await);
    assert_eq!(favorites, vec![first, second]);
}

#[tokio::test]
async fn test_remove_favorite_after_add() {
    let (_, directory) = directory();
    let user = assert_ok!(directory.create(create_dto("keks@example.com"), SALT).await);
    let kept = ObjectId::new();
    let removed = ObjectId::new();

    assert_ok!(directory.add_to_favorites(user.id, kept).await);
    assert_ok!(directory.add_to_favorites(user.id, removed).await);
    assert_ok!(directory.remove_from_favorites(user.id, removed).await);

    let favorites = assert_ok!(directory.get_favorites(user.id).await);
    assert!(!favorites.contains(&removed));
    assert_eq!(favorites, vec![kept]);
}

#[tokio::test]
async fn test_remove_missing_favorite_is_noop() {
    let (_, directory) = directory();
    let user = assert_ok!(directory.create(create_dto("keks@example.com"), SALT).await);

    assert_ok!(directory.remove_from_favorites(user.id, ObjectId::new()).await);

    let favorites = assert_ok!(directory.get_favorites(user.id).await);
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn test_favorites_of_unknown_user_are_empty() {
    let (store, directory) = directory();
    let unknown = ObjectId::new();

    assert_ok!(directory.add_to_favorites(unknown, ObjectId::new()).await);
    let favorites = assert_ok!(directory.get_favorites(unknown).await);

    assert!(favorites.is_empty());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let (_, directory) = directory();
    let user = assert_ok!(directory.create(create_dto("keks@example.com"), SALT).await);

    let update = UpdateUser {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };
    let updated = assert_ok!(directory.update_by_id(user.id, update).await);
    assert_eq!(updated.expect("user should exist").name, "Renamed");

    let found = assert_ok!(directory.find_by_id(user.id).await).expect("user should exist");
    assert_eq!(found.name, "Renamed");
    assert_eq!(found.email, user.email);
    assert_eq!(found.avatar_path, user.avatar_path);
    assert_eq!(found.user_type, user.user_type);
    assert_eq!(found.password_hash, user.password_hash);
    assert_eq!(found.created_at, user.created_at);
}

#[tokio::test]
async fn test_update_unknown_user_is_none() {
    let (_, directory) = directory();

    let update = UpdateUser {
        user_type: Some(UserType::Pro),
        ..Default::default()
    };
    let result = assert_ok!(directory.update_by_id(ObjectId::new(), update).await);

    assert!(result.is_none());
}

#[tokio::test]
async fn test_find_by_unknown_id_is_none() {
    let (_, directory) = directory();

    let result = assert_ok!(directory.find_by_id(ObjectId::new()).await);
    assert!(result.is_none());
}
