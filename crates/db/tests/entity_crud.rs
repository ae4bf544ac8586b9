//! Integration tests for repository CRUD operations.
//!
//! Exercises the repository layer against a real database:
//! - Category deletion guard
//! - Product/category join
//! - Last-administrator protection
//! - Unique constraint violations
//! - Statistics snapshot

use rust_decimal::Decimal;
use sqlx::PgPool;
use techflow_db::bootstrap::ensure_schema;
use techflow_db::models::category::{CategoryDeletion, SaveCategory};
use techflow_db::models::main_content::SaveMainContent;
use techflow_db::models::product::SaveProduct;
use techflow_db::models::user::{AdminGuarded, CreateUser, UpdateUser};
use techflow_db::repositories::{CategoryRepo, MainContentRepo, ProductRepo, StatsRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_product(name: &str, cents: i64, category_id: Option<i64>) -> SaveProduct {
    SaveProduct {
        name: name.to_string(),
        description: None,
        price: Decimal::new(cents, 2),
        image: None,
        category_id,
    }
}

fn new_user(username: &str, role: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password_hash: "hash".to_string(),
        role: role.to_string(),
    }
}

async fn new_category(pool: &PgPool, name: &str) -> i64 {
    CategoryRepo::create(
        pool,
        &SaveCategory {
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Categories and products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_category_delete_blocked_while_referenced(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let category_id = new_category(&pool, "Laptops").await;
    let product = ProductRepo::create(&pool, &new_product("X1", 150_000, Some(category_id)))
        .await
        .unwrap();

    let outcome = CategoryRepo::delete_if_unused(&pool, category_id).await.unwrap();
    assert_eq!(outcome, CategoryDeletion::InUse { product_count: 1 });
    assert!(CategoryRepo::exists(&pool, category_id).await.unwrap());

    assert!(ProductRepo::delete(&pool, product.id).await.unwrap());

    let outcome = CategoryRepo::delete_if_unused(&pool, category_id).await.unwrap();
    assert_eq!(outcome, CategoryDeletion::Deleted);
    assert!(!CategoryRepo::exists(&pool, category_id).await.unwrap());
}

#[sqlx::test(migrations = false)]
async fn test_category_delete_missing(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let outcome = CategoryRepo::delete_if_unused(&pool, 999).await.unwrap();
    assert_eq!(outcome, CategoryDeletion::NotFound);
}

#[sqlx::test(migrations = false)]
async fn test_category_foreign_key_restricts_raw_delete(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let category_id = new_category(&pool, "Phones").await;
    ProductRepo::create(&pool, &new_product("P1", 1000, Some(category_id)))
        .await
        .unwrap();

    let err = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(category_id)
        .execute(&pool)
        .await
        .unwrap_err();
    let code = err.as_database_error().and_then(|e| e.code()).unwrap();
    assert_eq!(code, "23503");
}

#[sqlx::test(migrations = false)]
async fn test_duplicate_category_name_rejected(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    new_category(&pool, "Audio").await;

    let err = CategoryRepo::create(
        &pool,
        &SaveCategory {
            name: "Audio".to_string(),
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_categories_name"));
}

#[sqlx::test(migrations = false)]
async fn test_product_carries_category_name(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let category_id = new_category(&pool, "Monitors").await;

    let with_category = ProductRepo::create(&pool, &new_product("M27", 30_000, Some(category_id)))
        .await
        .unwrap();
    assert_eq!(with_category.category_name.as_deref(), Some("Monitors"));
    assert_eq!(with_category.price, Decimal::new(30_000, 2));

    let without = ProductRepo::create(&pool, &new_product("Cable", 500, None))
        .await
        .unwrap();
    assert_eq!(without.category_id, None);
    assert_eq!(without.category_name, None);

    let listed = ProductRepo::list(&pool).await.unwrap();
    assert_eq!(listed.len(), 2);

    let categories = CategoryRepo::list(&pool).await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].product_count, 1);
}

#[sqlx::test(migrations = false)]
async fn test_product_update_replaces_all_fields(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let category_id = new_category(&pool, "Storage").await;
    let mut input = new_product("SSD", 9_999, Some(category_id));
    input.description = Some("1TB".to_string());
    let product = ProductRepo::create(&pool, &input).await.unwrap();

    let updated = ProductRepo::update(&pool, product.id, &new_product("SSD 2TB", 15_999, None))
        .await
        .unwrap()
        .expect("product should exist");

    assert_eq!(updated.name, "SSD 2TB");
    assert_eq!(updated.description, None);
    assert_eq!(updated.category_id, None);
    assert!(updated.updated_at >= product.updated_at);

    assert!(ProductRepo::update(&pool, 999, &new_product("x", 1, None))
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Main content
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_main_content_crud(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let created = MainContentRepo::create(
        &pool,
        &SaveMainContent {
            title: "Hero".to_string(),
            description: None,
            kind: "imagen".to_string(),
            payload: Some("AAAA".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.payload.as_deref(), Some("AAAA"));

    let invalid_kind = MainContentRepo::create(
        &pool,
        &SaveMainContent {
            title: "Bad".to_string(),
            description: None,
            kind: "audio".to_string(),
            payload: None,
        },
    )
    .await;
    assert!(invalid_kind.is_err(), "kind check constraint must reject 'audio'");

    assert!(MainContentRepo::delete(&pool, created.id).await.unwrap());
    assert!(MainContentRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_last_admin_cannot_be_deleted_or_demoted(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let admin = UserRepo::create(&pool, &new_user("root", "admin")).await.unwrap();

    assert_eq!(
        UserRepo::delete(&pool, admin.id).await.unwrap(),
        AdminGuarded::LastAdmin
    );

    let demote = UpdateUser {
        username: "root".to_string(),
        role: "editor".to_string(),
        password_hash: None,
    };
    assert_eq!(
        UserRepo::update(&pool, admin.id, &demote).await.unwrap(),
        AdminGuarded::LastAdmin
    );

    UserRepo::create(&pool, &new_user("second", "admin")).await.unwrap();
    assert_eq!(
        UserRepo::delete(&pool, admin.id).await.unwrap(),
        AdminGuarded::Applied(())
    );
}

#[sqlx::test(migrations = false)]
async fn test_user_update_keeps_password_when_absent(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let user = UserRepo::create(&pool, &new_user("ana", "user")).await.unwrap();

    let update = UpdateUser {
        username: "ana.maria".to_string(),
        role: "editor".to_string(),
        password_hash: None,
    };
    let AdminGuarded::Applied(updated) = UserRepo::update(&pool, user.id, &update).await.unwrap()
    else {
        panic!("update should apply");
    };

    assert_eq!(updated.username, "ana.maria");
    assert_eq!(updated.role, "editor");
    assert_eq!(updated.password_hash, "hash");

    assert_eq!(
        UserRepo::update(&pool, 999, &update).await.unwrap(),
        AdminGuarded::NotFound
    );
}

#[sqlx::test(migrations = false)]
async fn test_role_check_constraint(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    assert!(UserRepo::create(&pool, &new_user("x", "superuser")).await.is_err());
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_stats_snapshot_counts(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    UserRepo::create(&pool, &new_user("u1", "user")).await.unwrap();
    UserRepo::create(&pool, &new_user("u2", "editor")).await.unwrap();
    let category_id = new_category(&pool, "Cameras").await;
    new_category(&pool, "Empty").await;
    for i in 0..3 {
        ProductRepo::create(&pool, &new_product(&format!("C{i}"), 100 * (i + 1), Some(category_id)))
            .await
            .unwrap();
    }

    let snapshot = StatsRepo::snapshot(&pool).await.unwrap();

    assert_eq!(snapshot.user_count, 2);
    assert_eq!(snapshot.content_count, 0);
    assert_eq!(snapshot.categories.len(), 2);
    assert_eq!(snapshot.products.len(), 3);
}
