use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};
use utoipa::ToSchema;

use crate::{
    dto::{CODE_MAX_CHARS, NAME_MAX_CHARS, check_length},
    error::AppError,
    services::inventory_service::{InventoryItemPatch, NewInventoryItem},
};

/// `NUMERIC(10,2)` holds values below this.
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateInventoryItemRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    #[schema(value_type = Option<i32>, example = 25)]
    pub quantity: Option<i32>,
    #[schema(value_type = Option<String>, example = "29.99")]
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

/// Partial update. `status` is not accepted; it follows `quantity`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateInventoryItemRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    #[schema(value_type = Option<i32>, example = 25)]
    pub quantity: Option<i32>,
    #[schema(value_type = Option<String>, example = "29.99")]
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Number(i64),
    Text(String),
}

/// Quantities arrive as JSON numbers or as numeric strings from form inputs.
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<RawQuantity>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawQuantity::Number(n)) => i32::try_from(n).ok(),
        Some(RawQuantity::Text(text)) => text.trim().parse::<i32>().ok(),
    };
    parsed
        .map(Some)
        .ok_or_else(|| de::Error::custom("quantity must be a whole number"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn check_text_fields(
    name: Option<&str>,
    sku: Option<&str>,
    category: Option<&str>,
) -> Result<(), AppError> {
    if let Some(name) = name {
        check_length("Name", name, NAME_MAX_CHARS)?;
    }
    if let Some(sku) = sku {
        check_length("SKU", sku, CODE_MAX_CHARS)?;
    }
    if let Some(category) = category {
        check_length("Category", category, CODE_MAX_CHARS)?;
    }
    Ok(())
}

fn check_quantity(quantity: i32) -> Result<i32, AppError> {
    if quantity < 0 {
        return Err(AppError::BadRequest(
            "Quantity must be zero or greater".into(),
        ));
    }
    Ok(quantity)
}

fn check_price(price: Decimal) -> Result<Decimal, AppError> {
    let price = price.round_dp(2);
    if price < Decimal::ZERO {
        return Err(AppError::BadRequest("Price must be zero or greater".into()));
    }
    if price >= PRICE_LIMIT {
        return Err(AppError::BadRequest(format!(
            "Price must be less than {PRICE_LIMIT}"
        )));
    }
    Ok(price)
}

impl CreateInventoryItemRequest {
    pub fn validate(self, owner_id: i32) -> Result<NewInventoryItem, AppError> {
        let missing = || AppError::BadRequest("Missing required fields".into());

        let name = non_empty(self.name).ok_or_else(missing)?;
        let sku = non_empty(self.sku).ok_or_else(missing)?;
        let category = non_empty(self.category).ok_or_else(missing)?;
        let quantity = self.quantity.ok_or_else(missing)?;
        let price = self.price.ok_or_else(missing)?;
        check_text_fields(Some(name.as_str()), Some(sku.as_str()), Some(category.as_str()))?;

        Ok(NewInventoryItem {
            name,
            sku,
            category,
            quantity: check_quantity(quantity)?,
            price: check_price(price)?,
            description: self.description.unwrap_or_default(),
            user_id: Some(owner_id),
        })
    }
}

impl UpdateInventoryItemRequest {
    pub fn validate(self) -> Result<InventoryItemPatch, AppError> {
        let required = |field: &str, value: Option<String>| match value {
            Some(v) => non_empty(Some(v))
                .map(Some)
                .ok_or_else(|| AppError::BadRequest(format!("{field} must not be empty"))),
            None => Ok(None),
        };

        let name = required("name", self.name)?;
        let sku = required("sku", self.sku)?;
        let category = required("category", self.category)?;
        check_text_fields(name.as_deref(), sku.as_deref(), category.as_deref())?;

        Ok(InventoryItemPatch {
            name,
            sku,
            category,
            quantity: self.quantity.map(check_quantity).transpose()?,
            price: self.price.map(check_price).transpose()?,
            description: self.description,
        })
    }
}
