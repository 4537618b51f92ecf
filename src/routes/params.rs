use axum::{Json, extract::rejection::JsonRejection};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppError;

/// Parse a path id. A malformed id is a bad request, not a missing row.
pub fn parse_id(raw: &str, resource: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("Invalid {resource} ID")))
}

/// Unwrap a JSON body, turning axum's rejection into our error shape.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn flag(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v.eq_ignore_ascii_case("true") || v == "1")
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    /// `true` returns aggregate stats instead of items.
    pub stats: Option<String>,
    /// Search term matched against name, SKU and description.
    pub q: Option<String>,
    /// Exact category name filter.
    pub category: Option<String>,
    /// `true` restricts results to items owned by the caller.
    pub mine: Option<String>,
}

impl InventoryQuery {
    pub fn wants_stats(&self) -> bool {
        flag(self.stats.as_deref())
    }

    pub fn only_mine(&self) -> bool {
        flag(self.mine.as_deref())
    }

    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("42", "item").unwrap(), 42);
        let err = parse_id("abc", "item").unwrap_err();
        assert_eq!(err.to_string(), "Invalid item ID");
        assert!(parse_id("1.5", "category").is_err());
        assert!(parse_id("", "category").is_err());
    }

    #[test]
    fn query_flags_and_terms() {
        let query = InventoryQuery {
            stats: Some("true".into()),
            q: Some("  ".into()),
            category: Some(" Electronics ".into()),
            mine: Some("false".into()),
        };
        assert!(query.wants_stats());
        assert!(!query.only_mine());
        assert_eq!(query.search_term(), None);
        assert_eq!(query.category(), Some("Electronics"));
        assert!(!InventoryQuery::default().wants_stats());
    }
}
