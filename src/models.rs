use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{categories, inventory_items, users};

/// Items below this quantity count as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// Stock level of an item, always derived from its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ItemStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl ItemStatus {
    pub fn from_quantity(quantity: i32) -> Self {
        if quantity <= 0 {
            ItemStatus::OutOfStock
        } else if quantity < LOW_STOCK_THRESHOLD {
            ItemStatus::LowStock
        } else {
            ItemStatus::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::InStock => "In Stock",
            ItemStatus::LowStock => "Low Stock",
            ItemStatus::OutOfStock => "Out of Stock",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "In Stock" => Some(ItemStatus::InStock),
            "Low Stock" => Some(ItemStatus::LowStock),
            "Out of Stock" => Some(ItemStatus::OutOfStock),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InventoryItem {
    pub id: i32,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub quantity: i32,
    #[schema(value_type = String, example = "999.99")]
    pub price: Decimal,
    pub description: Option<String>,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Option<i32>,
}

impl From<inventory_items::Model> for InventoryItem {
    fn from(model: inventory_items::Model) -> Self {
        // Rows written outside this service may carry a stale label.
        let status = ItemStatus::parse(&model.status)
            .unwrap_or_else(|| ItemStatus::from_quantity(model.quantity));
        Self {
            id: model.id,
            name: model.name,
            sku: model.sku,
            category: model.category,
            quantity: model.quantity,
            price: model.price,
            description: model.description,
            status,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            user_id: model.user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_items: i64,
    #[schema(value_type = String, example = "32138.02")]
    pub total_value: Decimal,
    pub low_stock_items: i64,
    pub categories: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_quantity_thresholds() {
        assert_eq!(ItemStatus::from_quantity(0), ItemStatus::OutOfStock);
        assert_eq!(ItemStatus::from_quantity(1), ItemStatus::LowStock);
        assert_eq!(ItemStatus::from_quantity(9), ItemStatus::LowStock);
        assert_eq!(ItemStatus::from_quantity(10), ItemStatus::InStock);
        assert_eq!(ItemStatus::from_quantity(1000), ItemStatus::InStock);
    }

    #[test]
    fn status_labels_match_stored_values() {
        for status in [
            ItemStatus::InStock,
            ItemStatus::LowStock,
            ItemStatus::OutOfStock,
        ] {
            assert_eq!(ItemStatus::parse(status.as_str()), Some(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(ItemStatus::parse("Discontinued"), None);
    }

    #[test]
    fn stats_serialize_with_camel_case_keys() {
        let stats = InventoryStats {
            total_items: 5,
            total_value: Decimal::new(3213802, 2),
            low_stock_items: 1,
            categories: 3,
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalItems"], 5);
        assert_eq!(value["totalValue"], "32138.02");
        assert_eq!(value["lowStockItems"], 1);
        assert_eq!(value["categories"], 3);
    }
}
