use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::{CODE_MAX_CHARS, check_length},
    error::AppError,
    services::category_service::{CategoryPatch, NewCategory},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CreateCategoryRequest {
    pub fn validate(self) -> Result<NewCategory, AppError> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::BadRequest("Category name is required".into()))?;
        check_length("Category name", &name, CODE_MAX_CHARS)?;

        Ok(NewCategory {
            name,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
        })
    }
}

impl UpdateCategoryRequest {
    pub fn validate(self) -> Result<CategoryPatch, AppError> {
        let name = match self.name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(AppError::BadRequest(
                        "Category name must be a non-empty string".into(),
                    ));
                }
                check_length("Category name", &name, CODE_MAX_CHARS)?;
                Some(name)
            }
            None => None,
        };

        let patch = CategoryPatch {
            name,
            description: self.description.map(|d| d.trim().to_string()),
        };

        if patch.is_empty() {
            return Err(AppError::BadRequest("No valid updates provided".into()));
        }
        Ok(patch)
    }
}
