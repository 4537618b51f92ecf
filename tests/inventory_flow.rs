use std::time::Duration;

use axum::http::StatusCode;
use inventory_api::{
    config::JwtConfig,
    db::{create_pool, run_migrations},
    dto::auth::RegisterRequest,
    error::{AppError, StoreError},
    models::{InventoryItem, ItemStatus},
    seed::{ADMIN_EMAIL, ADMIN_PASSWORD, seed_all},
    services::{
        auth_service,
        category_service::{self, CategoryPatch, NewCategory},
        inventory_service::{self, InventoryItemPatch, NewInventoryItem},
    },
    state::AppState,
};
use rust_decimal::Decimal;

// Integration flow against a real Postgres: seed -> stats/search -> item and category lifecycles -> auth.
#[tokio::test]
async fn inventory_category_and_auth_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let admin_id = seed_all(&state.pool).await?;

    stats_over_seed_set(&state).await?;
    search_matches_name_sku_and_description(&state).await?;
    status_is_derived_on_create(&state, admin_id).await?;
    status_follows_quantity_updates(&state, admin_id).await?;
    duplicate_sku_conflicts(&state, admin_id).await?;
    partial_updates(&state, admin_id).await?;
    category_lifecycle(&state, admin_id).await?;
    missing_rows_are_sentinels(&state).await?;
    owner_scoping(&state, admin_id).await?;
    register_and_authorize(&state).await?;

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url, 5).await?;
    run_migrations(&pool).await?;

    // Clean tables between runs
    sqlx::query("TRUNCATE TABLE inventory_items, categories, users RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await?;

    Ok(AppState::new(pool, JwtConfig::new("flow-test-secret", 1)))
}

fn new_item(sku: &str, category: &str, quantity: i32, owner: i32) -> NewInventoryItem {
    NewInventoryItem {
        name: format!("Item {sku}"),
        sku: sku.to_string(),
        category: category.to_string(),
        quantity,
        price: Decimal::new(1050, 2),
        description: String::new(),
        user_id: Some(owner),
    }
}

async fn create(state: &AppState, item: NewInventoryItem) -> anyhow::Result<InventoryItem> {
    Ok(inventory_service::create_inventory_item(&state.orm, item).await?)
}

async fn stats_over_seed_set(state: &AppState) -> anyhow::Result<()> {
    let stats = inventory_service::get_inventory_stats(&state.pool, None).await?;
    assert_eq!(stats.total_items, 5);
    assert_eq!(stats.low_stock_items, 1);
    assert_eq!(stats.categories, 3);
    // 25*999.99 + 15*299.99 + 50*29.99 + 8*79.99 + 100*4.99
    assert_eq!(stats.total_value, Decimal::new(3213802, 2));
    Ok(())
}

async fn search_matches_name_sku_and_description(state: &AppState) -> anyhow::Result<()> {
    let found = inventory_service::search_inventory_items(&state.orm, "lap", None, None).await?;
    assert!(found.iter().any(|i| i.sku == "LAP-001"));
    assert!(found.iter().all(|i| i.sku != "CHR-001"));
    for item in &found {
        let haystack = format!(
            "{} {} {}",
            item.name,
            item.sku,
            item.description.clone().unwrap_or_default()
        )
        .to_lowercase();
        assert!(haystack.contains("lap"), "unexpected match {}", item.sku);
    }

    let by_sku = inventory_service::search_inventory_items(&state.orm, "mse-0", None, None).await?;
    assert_eq!(by_sku.len(), 1);
    assert_eq!(by_sku[0].name, "Wireless Mouse");

    let narrowed =
        inventory_service::search_inventory_items(&state.orm, "e", Some("Furniture"), None)
            .await?;
    assert!(!narrowed.is_empty());
    assert!(narrowed.iter().all(|i| i.category == "Furniture"));

    // Wildcard characters in the term are matched literally.
    for term in ["%", "_", "\\"] {
        let found = inventory_service::search_inventory_items(&state.orm, term, None, None).await?;
        assert!(found.is_empty(), "{term:?} matched {} items", found.len());
    }

    let furniture =
        inventory_service::get_all_inventory_items(&state.orm, Some("Furniture"), None).await?;
    assert_eq!(furniture.len(), 2);
    assert!(furniture.iter().all(|i| i.category == "Furniture"));
    Ok(())
}

async fn status_is_derived_on_create(state: &AppState, owner: i32) -> anyhow::Result<()> {
    let cases = [
        (0, ItemStatus::OutOfStock),
        (1, ItemStatus::LowStock),
        (9, ItemStatus::LowStock),
        (10, ItemStatus::InStock),
        (1000, ItemStatus::InStock),
    ];
    for (quantity, expected) in cases {
        let item = create(state, new_item(&format!("QTY-{quantity}"), "Electronics", quantity, owner)).await?;
        assert_eq!(item.status, expected, "quantity {quantity}");
        assert_eq!(item.description.as_deref(), Some(""));
    }
    Ok(())
}

async fn status_follows_quantity_updates(state: &AppState, owner: i32) -> anyhow::Result<()> {
    let item = create(state, new_item("TRN-001", "Electronics", 50, owner)).await?;
    assert_eq!(item.status, ItemStatus::InStock);

    for (quantity, expected) in [
        (5, ItemStatus::LowStock),
        (0, ItemStatus::OutOfStock),
        (9, ItemStatus::LowStock),
        (20, ItemStatus::InStock),
    ] {
        let patch = InventoryItemPatch {
            quantity: Some(quantity),
            ..Default::default()
        };
        let updated = inventory_service::update_inventory_item(&state.orm, item.id, patch)
            .await?
            .expect("item exists");
        assert_eq!(updated.quantity, quantity);
        assert_eq!(updated.status, expected, "quantity {quantity}");
    }
    Ok(())
}

async fn duplicate_sku_conflicts(state: &AppState, owner: i32) -> anyhow::Result<()> {
    let first = inventory_service::create_inventory_item(&state.orm, new_item("DUP-001", "Toys", 3, owner)).await;
    let second = inventory_service::create_inventory_item(&state.orm, new_item("DUP-001", "Toys", 4, owner)).await;

    assert!(first.is_ok());
    let err = second.expect_err("duplicate sku must fail");
    assert!(matches!(err, StoreError::UniqueViolation(_)));
    assert_eq!(AppError::from(err).status(), StatusCode::CONFLICT);

    // Renaming another item onto the taken SKU conflicts as well.
    let other = create(state, new_item("DUP-002", "Toys", 3, owner)).await?;
    let err = inventory_service::update_inventory_item(
        &state.orm,
        other.id,
        InventoryItemPatch {
            sku: Some("DUP-001".into()),
            ..Default::default()
        },
    )
    .await
    .expect_err("sku collision on update");
    assert!(matches!(err, StoreError::UniqueViolation(_)));
    Ok(())
}

async fn partial_updates(state: &AppState, owner: i32) -> anyhow::Result<()> {
    let before = create(state, new_item("PRT-001", "Books", 12, owner)).await?;

    let err = inventory_service::update_inventory_item(
        &state.orm,
        before.id,
        InventoryItemPatch::default(),
    )
    .await
    .expect_err("empty patch");
    assert!(matches!(err, StoreError::NoUpdatesProvided));

    tokio::time::sleep(Duration::from_millis(20)).await;
    let after = inventory_service::update_inventory_item(
        &state.orm,
        before.id,
        InventoryItemPatch {
            description: Some("x".into()),
            ..Default::default()
        },
    )
    .await?
    .expect("item exists");

    assert_eq!(after.description.as_deref(), Some("x"));
    assert_eq!(after.name, before.name);
    assert_eq!(after.sku, before.sku);
    assert_eq!(after.category, before.category);
    assert_eq!(after.quantity, before.quantity);
    assert_eq!(after.price, before.price);
    assert_eq!(after.status, before.status);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
    Ok(())
}

async fn category_lifecycle(state: &AppState, owner: i32) -> anyhow::Result<()> {
    let gadgets = category_service::create_category(
        &state.orm,
        NewCategory {
            name: "Gadgets".into(),
            description: String::new(),
        },
    )
    .await?;
    let err = category_service::create_category(
        &state.orm,
        NewCategory {
            name: "Gadgets".into(),
            description: "again".into(),
        },
    )
    .await
    .expect_err("duplicate category name");
    assert!(matches!(err, StoreError::UniqueViolation(_)));

    create(state, new_item("GDG-001", "Gadgets", 2, owner)).await?;
    let err = category_service::delete_category(&state.orm, gadgets.id)
        .await
        .expect_err("category in use");
    assert!(matches!(err, StoreError::CategoryInUse { items: 1, .. }));
    assert_eq!(AppError::from(err).status(), StatusCode::CONFLICT);
    assert!(category_service::get_category_by_id(&state.orm, gadgets.id).await?.is_some());

    let unused = category_service::create_category(
        &state.orm,
        NewCategory {
            name: "Unused".into(),
            description: "nothing here".into(),
        },
    )
    .await?;
    let renamed = category_service::update_category(
        &state.orm,
        unused.id,
        CategoryPatch {
            name: Some("Still Unused".into()),
            description: None,
        },
    )
    .await?
    .expect("category exists");
    assert_eq!(renamed.name, "Still Unused");
    assert_eq!(renamed.description.as_deref(), Some("nothing here"));

    let err = category_service::update_category(
        &state.orm,
        unused.id,
        CategoryPatch {
            name: Some("Electronics".into()),
            description: None,
        },
    )
    .await
    .expect_err("rename onto existing name");
    assert!(matches!(err, StoreError::UniqueViolation(_)));

    assert!(category_service::delete_category(&state.orm, unused.id).await?);
    assert!(!category_service::delete_category(&state.orm, unused.id).await?);

    let all = category_service::get_all_categories(&state.orm).await?;
    assert_eq!(all.len(), 13);
    Ok(())
}

async fn missing_rows_are_sentinels(state: &AppState) -> anyhow::Result<()> {
    let missing = 999_999;
    assert!(inventory_service::get_inventory_item_by_id(&state.orm, missing).await?.is_none());
    assert!(category_service::get_category_by_id(&state.orm, missing).await?.is_none());
    assert!(
        inventory_service::update_inventory_item(
            &state.orm,
            missing,
            InventoryItemPatch {
                quantity: Some(1),
                ..Default::default()
            },
        )
        .await?
        .is_none()
    );
    assert!(!inventory_service::delete_inventory_item(&state.orm, missing).await?);
    Ok(())
}

async fn owner_scoping(state: &AppState, admin_id: i32) -> anyhow::Result<()> {
    let user = auth_service::register(
        &state.orm,
        RegisterRequest {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            password: "hopper1".into(),
        },
    )
    .await?;

    create(state, new_item("OWN-001", "Sports", 40, user.id)).await?;
    let mine = inventory_service::get_all_inventory_items(&state.orm, None, Some(user.id)).await?;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].sku, "OWN-001");

    let stats = inventory_service::get_inventory_stats(&state.pool, Some(user.id)).await?;
    assert_eq!(stats.total_items, 1);
    assert_eq!(stats.total_value, Decimal::new(42000, 2));
    assert_eq!(stats.low_stock_items, 0);

    let all = inventory_service::get_all_inventory_items(&state.orm, None, None).await?;
    assert!(all.len() > mine.len());
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert!(all.iter().any(|i| i.user_id == Some(admin_id)));
    Ok(())
}

async fn register_and_authorize(state: &AppState) -> anyhow::Result<()> {
    let session = auth_service::authorize(&state.orm, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await?
        .expect("seeded admin can sign in");
    assert_eq!(session.role, "admin");
    assert_eq!(session.email, ADMIN_EMAIL);

    assert!(auth_service::authorize(&state.orm, ADMIN_EMAIL, "wrong").await?.is_none());
    assert!(
        auth_service::authorize(&state.orm, "ghost@example.com", ADMIN_PASSWORD)
            .await?
            .is_none()
    );

    let err = auth_service::register(
        &state.orm,
        RegisterRequest {
            name: "Admin Again".into(),
            email: ADMIN_EMAIL.into(),
            password: "another1".into(),
        },
    )
    .await
    .expect_err("duplicate email");
    assert!(matches!(err, AppError::Conflict(_)));
    Ok(())
}
