use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
    ActiveValue::NotSet,
    sea_query::{Expr, SimpleExpr},
};

use crate::{
    entity::{
        categories::{ActiveModel, Column, Entity as Categories},
        inventory_items::{Column as ItemColumn, Entity as InventoryItems},
    },
    error::{StoreError, StoreResult},
    models::Category,
};

const DUPLICATE_NAME: &str = "Category name already exists";

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

/// Field-level changes to a category. Only these columns can be updated.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    pub(crate) fn assignments(self) -> Vec<(Column, SimpleExpr)> {
        let mut set = Vec::new();
        if let Some(name) = self.name {
            set.push((Column::Name, Expr::value(name)));
        }
        if let Some(description) = self.description {
            set.push((Column::Description, Expr::value(description)));
        }
        set
    }
}

pub async fn get_all_categories(db: &DatabaseConnection) -> StoreResult<Vec<Category>> {
    let categories = Categories::find()
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();
    Ok(categories)
}

pub async fn get_category_by_id(db: &DatabaseConnection, id: i32) -> StoreResult<Option<Category>> {
    let category = Categories::find_by_id(id).one(db).await?;
    Ok(category.map(Category::from))
}

pub async fn create_category(db: &DatabaseConnection, new: NewCategory) -> StoreResult<Category> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(new.name),
        description: Set(Some(new.description)),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let category = active
        .insert(db)
        .await
        .map_err(|e| StoreError::on_write(e, DUPLICATE_NAME))?;

    tracing::debug!(category_id = category.id, name = %category.name, "category created");
    Ok(category.into())
}

pub async fn update_category(
    db: &DatabaseConnection,
    id: i32,
    patch: CategoryPatch,
) -> StoreResult<Option<Category>> {
    let assignments = patch.assignments();
    if assignments.is_empty() {
        return Err(StoreError::NoUpdatesProvided);
    }

    let mut update = Categories::update_many().filter(Column::Id.eq(id));
    for (column, value) in assignments {
        update = update.col_expr(column, value);
    }
    let updated = update
        .col_expr(Column::UpdatedAt, Expr::current_timestamp().into())
        .exec_with_returning(db)
        .await
        .map_err(|e| StoreError::on_write(e, DUPLICATE_NAME))?;

    let category = updated.into_iter().next().map(Category::from);
    if category.is_some() {
        tracing::debug!(category_id = id, "category updated");
    }
    Ok(category)
}

/// Delete a category unless an inventory item still carries its name.
///
/// The usage check and the delete are separate statements; an item assigned
/// the category in between is not detected.
pub async fn delete_category(db: &DatabaseConnection, id: i32) -> StoreResult<bool> {
    let Some(category) = Categories::find_by_id(id).one(db).await? else {
        return Ok(false);
    };

    let items = InventoryItems::find()
        .filter(ItemColumn::Category.eq(category.name.as_str()))
        .count(db)
        .await?;
    if items > 0 {
        tracing::warn!(category_id = id, name = %category.name, items, "category still in use");
        return Err(StoreError::CategoryInUse {
            name: category.name,
            items,
        });
    }

    let result = Categories::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
