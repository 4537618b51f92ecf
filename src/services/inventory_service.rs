use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
    ActiveValue::NotSet,
    sea_query::{Expr, LikeExpr, SimpleExpr, extension::postgres::PgExpr},
};

use crate::{
    db::DbPool,
    entity::inventory_items::{ActiveModel, Column, Entity as InventoryItems},
    error::{StoreError, StoreResult},
    models::{InventoryItem, InventoryStats, ItemStatus, LOW_STOCK_THRESHOLD},
};

const DUPLICATE_SKU: &str = "SKU already exists";

#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub quantity: i32,
    pub price: Decimal,
    pub description: String,
    pub user_id: Option<i32>,
}

/// Field-level changes to an item. Only these columns can be updated;
/// `status` is never set directly and follows `quantity`.
#[derive(Debug, Clone, Default)]
pub struct InventoryItemPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

impl InventoryItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.description.is_none()
    }

    pub(crate) fn assignments(self) -> Vec<(Column, SimpleExpr)> {
        let mut set = Vec::new();
        if let Some(name) = self.name {
            set.push((Column::Name, Expr::value(name)));
        }
        if let Some(sku) = self.sku {
            set.push((Column::Sku, Expr::value(sku)));
        }
        if let Some(category) = self.category {
            set.push((Column::Category, Expr::value(category)));
        }
        if let Some(quantity) = self.quantity {
            set.push((Column::Quantity, Expr::value(quantity)));
            let status = ItemStatus::from_quantity(quantity);
            set.push((Column::Status, Expr::value(status.as_str())));
        }
        if let Some(price) = self.price {
            set.push((Column::Price, Expr::value(price)));
        }
        if let Some(description) = self.description {
            set.push((Column::Description, Expr::value(description)));
        }
        set
    }
}

pub async fn get_all_inventory_items(
    db: &DatabaseConnection,
    category: Option<&str>,
    user_id: Option<i32>,
) -> StoreResult<Vec<InventoryItem>> {
    let mut finder = InventoryItems::find();
    if let Some(category) = category {
        finder = finder.filter(Column::Category.eq(category));
    }
    if let Some(user_id) = user_id {
        finder = finder.filter(Column::UserId.eq(user_id));
    }
    let items = finder
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(InventoryItem::from)
        .collect();
    Ok(items)
}

pub async fn get_inventory_item_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> StoreResult<Option<InventoryItem>> {
    let item = InventoryItems::find_by_id(id).one(db).await?;
    Ok(item.map(InventoryItem::from))
}

pub async fn create_inventory_item(
    db: &DatabaseConnection,
    new: NewInventoryItem,
) -> StoreResult<InventoryItem> {
    let status = ItemStatus::from_quantity(new.quantity);
    let active = ActiveModel {
        id: NotSet,
        name: Set(new.name),
        sku: Set(new.sku),
        category: Set(new.category),
        quantity: Set(new.quantity),
        price: Set(new.price),
        description: Set(Some(new.description)),
        status: Set(status.as_str().to_string()),
        created_at: NotSet,
        updated_at: NotSet,
        user_id: Set(new.user_id),
    };
    let item = active
        .insert(db)
        .await
        .map_err(|e| StoreError::on_write(e, DUPLICATE_SKU))?;

    tracing::debug!(item_id = item.id, sku = %item.sku, status = %item.status, "inventory item created");
    Ok(item.into())
}

pub async fn update_inventory_item(
    db: &DatabaseConnection,
    id: i32,
    patch: InventoryItemPatch,
) -> StoreResult<Option<InventoryItem>> {
    let assignments = patch.assignments();
    if assignments.is_empty() {
        return Err(StoreError::NoUpdatesProvided);
    }

    let mut update = InventoryItems::update_many().filter(Column::Id.eq(id));
    for (column, value) in assignments {
        update = update.col_expr(column, value);
    }
    let updated = update
        .col_expr(Column::UpdatedAt, Expr::current_timestamp().into())
        .exec_with_returning(db)
        .await
        .map_err(|e| StoreError::on_write(e, DUPLICATE_SKU))?;

    let item = updated.into_iter().next().map(InventoryItem::from);
    if let Some(item) = &item {
        tracing::debug!(item_id = id, status = item.status.as_str(), "inventory item updated");
    }
    Ok(item)
}

pub async fn delete_inventory_item(db: &DatabaseConnection, id: i32) -> StoreResult<bool> {
    let result = InventoryItems::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Backslash-escaped `LIKE` pattern matching `term` literally anywhere in the value.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring search over name, SKU and description.
pub async fn search_inventory_items(
    db: &DatabaseConnection,
    term: &str,
    category: Option<&str>,
    user_id: Option<i32>,
) -> StoreResult<Vec<InventoryItem>> {
    let pattern = LikeExpr::new(contains_pattern(term)).escape('\\');
    let mut condition = Condition::all().add(
        Condition::any()
            .add(Expr::col(Column::Name).ilike(pattern.clone()))
            .add(Expr::col(Column::Sku).ilike(pattern.clone()))
            .add(Expr::col(Column::Description).ilike(pattern)),
    );

    if let Some(category) = category {
        condition = condition.add(Column::Category.eq(category));
    }
    if let Some(user_id) = user_id {
        condition = condition.add(Column::UserId.eq(user_id));
    }

    let items = InventoryItems::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(InventoryItem::from)
        .collect();
    Ok(items)
}

/// Dashboard aggregates. The four queries run independently and are not
/// read from a single snapshot.
pub async fn get_inventory_stats(pool: &DbPool, user_id: Option<i32>) -> StoreResult<InventoryStats> {
    let total_items = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM inventory_items WHERE ($1::int IS NULL OR user_id = $1)",
    )
    .bind(user_id)
    .fetch_one(pool);

    let total_value = sqlx::query_scalar::<_, Decimal>(
        r#"
        SELECT COALESCE(SUM(quantity * price), 0)
        FROM inventory_items
        WHERE ($1::int IS NULL OR user_id = $1)
        "#,
    )
    .bind(user_id)
    .fetch_one(pool);

    let low_stock_items = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM inventory_items
        WHERE ($1::int IS NULL OR user_id = $1) AND quantity < $2
        "#,
    )
    .bind(user_id)
    .bind(LOW_STOCK_THRESHOLD)
    .fetch_one(pool);

    let categories = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT category) FROM inventory_items WHERE ($1::int IS NULL OR user_id = $1)",
    )
    .bind(user_id)
    .fetch_one(pool);

    let (total_items, total_value, low_stock_items, categories) =
        tokio::try_join!(total_items, total_value, low_stock_items, categories)?;

    Ok(InventoryStats {
        total_items,
        total_value,
        low_stock_items,
        categories,
    })
}

#[cfg(test)]
mod tests {
    use sea_orm::IdenStatic;

    use super::*;

    fn columns(patch: InventoryItemPatch) -> Vec<String> {
        patch
            .assignments()
            .iter()
            .map(|(column, _)| column.as_str().to_string())
            .collect()
    }

    #[test]
    fn search_pattern_treats_wildcards_literally() {
        assert_eq!(contains_pattern(r"50%_off\x"), r"%50\%\_off\\x%");
        assert_eq!(contains_pattern("lap"), "%lap%");
    }

    #[test]
    fn empty_patch_produces_no_assignments() {
        let patch = InventoryItemPatch::default();
        assert!(patch.is_empty());
        assert!(columns(patch).is_empty());
    }

    #[test]
    fn quantity_change_also_sets_status() {
        let patch = InventoryItemPatch {
            quantity: Some(3),
            ..Default::default()
        };
        assert_eq!(columns(patch), vec!["quantity", "status"]);
    }

    #[test]
    fn description_only_patch_touches_one_column() {
        let patch = InventoryItemPatch {
            description: Some("x".into()),
            ..Default::default()
        };
        assert_eq!(columns(patch), vec!["description"]);
    }

    #[test]
    fn full_patch_stays_within_updatable_columns() {
        let patch = InventoryItemPatch {
            name: Some("Desk Lamp".into()),
            sku: Some("LMP-002".into()),
            category: Some("Furniture".into()),
            quantity: Some(12),
            price: Some(Decimal::new(7999, 2)),
            description: Some("LED".into()),
        };
        assert_eq!(
            columns(patch),
            vec![
                "name",
                "sku",
                "category",
                "quantity",
                "status",
                "price",
                "description"
            ]
        );
    }
}
