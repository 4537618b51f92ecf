//! Sample data for local development and the database-backed tests.

use rust_decimal::Decimal;

use crate::{db::DbPool, models::ItemStatus, services::auth_service::hash_password};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "password";

pub const SAMPLE_CATEGORIES: [(&str, &str); 12] = [
    ("Electronics", "Electronic devices and gadgets"),
    ("Furniture", "Office and home furniture"),
    ("Stationery", "Office supplies and stationery items"),
    ("Clothing", "Apparel and accessories"),
    ("Books", "Books and educational materials"),
    ("Home & Garden", "Home improvement and gardening supplies"),
    ("Sports", "Sports equipment and accessories"),
    ("Toys", "Toys and games"),
    ("Food & Beverages", "Food items and beverages"),
    ("Health & Beauty", "Health and beauty products"),
    ("Automotive", "Automotive parts and accessories"),
    ("Office Supplies", "General office supplies"),
];

pub struct SampleItem {
    pub name: &'static str,
    pub sku: &'static str,
    pub category: &'static str,
    pub quantity: i32,
    /// Price in cents.
    pub price_cents: i64,
    pub description: &'static str,
}

impl SampleItem {
    pub fn price(&self) -> Decimal {
        Decimal::new(self.price_cents, 2)
    }
}

pub const SAMPLE_ITEMS: [SampleItem; 5] = [
    SampleItem {
        name: "Laptop Computer",
        sku: "LAP-001",
        category: "Electronics",
        quantity: 25,
        price_cents: 99999,
        description: "High-performance laptop for business use",
    },
    SampleItem {
        name: "Office Chair",
        sku: "CHR-001",
        category: "Furniture",
        quantity: 15,
        price_cents: 29999,
        description: "Ergonomic office chair with lumbar support",
    },
    SampleItem {
        name: "Wireless Mouse",
        sku: "MSE-001",
        category: "Electronics",
        quantity: 50,
        price_cents: 2999,
        description: "Wireless optical mouse with USB receiver",
    },
    SampleItem {
        name: "Desk Lamp",
        sku: "LMP-001",
        category: "Furniture",
        quantity: 8,
        price_cents: 7999,
        description: "LED desk lamp with adjustable brightness",
    },
    SampleItem {
        name: "Notebook",
        sku: "NTB-001",
        category: "Stationery",
        quantity: 100,
        price_cents: 499,
        description: "Spiral-bound notebook, 200 pages",
    },
];

/// Insert or promote a user, returning its id.
pub async fn ensure_user_with_role(
    pool: &DbPool,
    email: &str,
    name: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<i32> {
    let password_hash = hash_password(password)?;

    let id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO users (email, password_hash, name, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role, updated_at = CURRENT_TIMESTAMP
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(role)
    .fetch_one(pool)
    .await?;

    tracing::info!(email, role, user_id = id, "ensured user");
    Ok(id)
}

pub async fn seed_categories(pool: &DbPool) -> anyhow::Result<()> {
    for (name, description) in SAMPLE_CATEGORIES {
        sqlx::query(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;
    }

    tracing::info!(count = SAMPLE_CATEGORIES.len(), "seeded categories");
    Ok(())
}

pub async fn seed_inventory(pool: &DbPool, owner_id: i32) -> anyhow::Result<()> {
    for item in &SAMPLE_ITEMS {
        sqlx::query(
            r#"
            INSERT INTO inventory_items
                (name, sku, category, quantity, price, description, status, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (sku) DO NOTHING
            "#,
        )
        .bind(item.name)
        .bind(item.sku)
        .bind(item.category)
        .bind(item.quantity)
        .bind(item.price())
        .bind(item.description)
        .bind(ItemStatus::from_quantity(item.quantity).as_str())
        .bind(owner_id)
        .execute(pool)
        .await?;
    }

    tracing::info!(count = SAMPLE_ITEMS.len(), "seeded inventory items");
    Ok(())
}

/// Admin account, sample categories and sample items. Returns the admin id.
pub async fn seed_all(pool: &DbPool) -> anyhow::Result<i32> {
    let admin_id =
        ensure_user_with_role(pool, ADMIN_EMAIL, "Admin User", ADMIN_PASSWORD, "admin").await?;
    seed_categories(pool).await?;
    seed_inventory(pool, admin_id).await?;
    Ok(admin_id)
}
