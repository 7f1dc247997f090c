//! Integration tests for the administrator repository.

use sqlx::PgPool;

use sevadesk_core::roles::ROLE_ADMIN;
use sevadesk_db::models::admin::{CreateAdmin, UpdateAdminProfile};
use sevadesk_db::repositories::AdminRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_admin(email: &str) -> CreateAdmin {
    CreateAdmin {
        name: "Admin User".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$fake-hash".to_string(),
        phone: "+91 00000 00000".to_string(),
        profile_image: String::new(),
        role: ROLE_ADMIN.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find_by_email(pool: PgPool) {
    let created = AdminRepo::create(&pool, &new_admin("ops@agency.test"))
        .await
        .unwrap();
    assert_eq!(created.role, "admin");

    let found = AdminRepo::find_by_email(&pool, "ops@agency.test")
        .await
        .unwrap()
        .expect("admin must be found by email");
    assert_eq!(found.id, created.id);

    let missing = AdminRepo::find_by_email(&pool, "nobody@agency.test")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_violates_unique_constraint(pool: PgPool) {
    AdminRepo::create(&pool, &new_admin("ops@agency.test"))
        .await
        .unwrap();

    let result = AdminRepo::create(&pool, &new_admin("ops@agency.test")).await;
    match result {
        Err(sqlx::Error::Database(db_err)) => {
            assert_eq!(db_err.constraint(), Some("uq_admins_email"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_first_by_role_picks_oldest(pool: PgPool) {
    let first = AdminRepo::create(&pool, &new_admin("first@agency.test"))
        .await
        .unwrap();
    AdminRepo::create(&pool, &new_admin("second@agency.test"))
        .await
        .unwrap();

    let adopted = AdminRepo::find_first_by_role(&pool, ROLE_ADMIN)
        .await
        .unwrap()
        .expect("an admin exists");
    assert_eq!(adopted.id, first.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_profile_patches_only_present_fields(pool: PgPool) {
    let created = AdminRepo::create(&pool, &new_admin("ops@agency.test"))
        .await
        .unwrap();

    let patch = UpdateAdminProfile {
        phone: Some("+91 11111 11111".to_string()),
        ..Default::default()
    };
    let updated = AdminRepo::update_profile(&pool, created.id, &patch)
        .await
        .unwrap()
        .expect("row must exist");

    assert_eq!(updated.phone, "+91 11111 11111");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.password_hash, created.password_hash);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_credentials_overwrites_email_and_hash(pool: PgPool) {
    let created = AdminRepo::create(&pool, &new_admin("old@agency.test"))
        .await
        .unwrap();

    AdminRepo::update_credentials(&pool, created.id, "new@agency.test", "$argon2id$new-hash")
        .await
        .unwrap();

    let reloaded = AdminRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.email, "new@agency.test");
    assert_eq!(reloaded.password_hash, "$argon2id$new-hash");
}
