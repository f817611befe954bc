/// End-to-end authentication and authorization flow
///
/// Drives the whole core against the in-memory directory, without HTTP:
/// sign up → sign in → token authentication → book creation → ownership
/// checks for a second user.

use bookvault_shared::auth::authorization::require_ownership;
use bookvault_shared::auth::bootstrap::ensure_root_admin;
use bookvault_shared::auth::jwt::Claims;
use bookvault_shared::auth::password::hash_password;
use bookvault_shared::auth::service::{
    authenticate_token, issue_token, validate_credentials, AuthError,
};
use bookvault_shared::directory::memory::{InMemoryDirectory, InMemoryShelf};
use bookvault_shared::directory::{ResourceStore, UserDirectory};
use bookvault_shared::models::user::Role;

const SECRET: &str = "integration-test-secret-32-bytes!";

/// Sign-up path: hash the password, create through the directory
async fn sign_up(directory: &InMemoryDirectory, username: &str, password: &str) -> i64 {
    let hash = hash_password(password).unwrap();
    directory
        .create_user(username, &hash, Role::User)
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_full_flow() {
    let directory = InMemoryDirectory::new();
    let shelf = InMemoryShelf::new();

    // Sign up alice and bob
    let alice_id = sign_up(&directory, "alice", "pw1234").await;
    let bob_id = sign_up(&directory, "bob", "hunter2").await;
    assert_ne!(alice_id, bob_id);

    // Sign in as alice and obtain a token
    let alice = validate_credentials(&directory, "alice", "pw1234")
        .await
        .unwrap();
    let token = issue_token(&alice, SECRET, Claims::default_lifetime()).unwrap();

    // The token authenticates back to the same identity, with the expected
    // username and role and no secret material
    let identity = authenticate_token(&directory, &token, SECRET)
        .await
        .unwrap();
    assert_eq!(identity.id, alice_id);
    assert_eq!(identity.username, "alice");
    assert_eq!(identity.role, Role::User);

    // Alice creates a book; ownership is recorded as hers
    let book_id = shelf.add(identity.id);
    let owner = shelf.owner_of(book_id).await.unwrap().unwrap();
    assert_eq!(owner, alice_id);

    // Bob signs in and tries to mutate alice's book: Forbidden
    let bob = validate_credentials(&directory, "bob", "hunter2")
        .await
        .unwrap();
    let bob_token = issue_token(&bob, SECRET, Claims::default_lifetime()).unwrap();
    let bob_identity = authenticate_token(&directory, &bob_token, SECRET)
        .await
        .unwrap();
    assert!(require_ownership(&bob_identity, owner).is_err());

    // Alice succeeds
    assert!(require_ownership(&identity, owner).is_ok());
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let directory = InMemoryDirectory::new();

    sign_up(&directory, "alice", "pw1234").await;

    let hash = hash_password("other").unwrap();
    let result = directory.create_user("alice", &hash, Role::User).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_bootstrap_then_sign_in_as_admin() {
    let directory = InMemoryDirectory::new();

    ensure_root_admin(&directory, "admin", "admin123")
        .await
        .unwrap();

    // The seeded admin can sign in through the normal credential path
    let admin = validate_credentials(&directory, "admin", "admin123")
        .await
        .unwrap();
    assert_eq!(admin.role, Role::Admin);

    // But still cannot mutate someone else's resource
    let shelf = InMemoryShelf::new();
    let alice_id = {
        let hash = hash_password("pw1234").unwrap();
        directory
            .create_user("alice", &hash, Role::User)
            .await
            .unwrap()
            .id
    };
    let book_id = shelf.add(alice_id);
    let owner = shelf.owner_of(book_id).await.unwrap().unwrap();
    assert!(require_ownership(&admin, owner).is_err());
}

#[tokio::test]
async fn test_sign_in_failures_look_alike_end_to_end() {
    let directory = InMemoryDirectory::new();
    sign_up(&directory, "alice", "pw1234").await;

    let a = validate_credentials(&directory, "alice", "wrong-password")
        .await
        .unwrap_err();
    let b = validate_credentials(&directory, "no-such-user", "pw1234")
        .await
        .unwrap_err();

    assert!(matches!(a, AuthError::InvalidCredentials));
    assert!(matches!(b, AuthError::InvalidCredentials));
    assert_eq!(a.to_string(), b.to_string());
}
