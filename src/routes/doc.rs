use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    auth::SessionUser,
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        categories::{CreateCategoryRequest, UpdateCategoryRequest},
        inventory::{CreateInventoryItemRequest, UpdateInventoryItemRequest},
    },
    models::{Category, InventoryItem, InventoryStats, ItemStatus, User},
    response::{ErrorBody, MessageBody},
    routes::{auth, categories, health, inventory},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        categories::list_categories,
        categories::create_category,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        inventory::list_inventory,
        inventory::create_item,
        inventory::get_item,
        inventory::update_item,
        inventory::delete_item
    ),
    components(
        schemas(
            User,
            SessionUser,
            Category,
            InventoryItem,
            ItemStatus,
            InventoryStats,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CreateInventoryItemRequest,
            UpdateInventoryItemRequest,
            ErrorBody,
            MessageBody,
            health::HealthData
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration and session tokens"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Inventory", description = "Inventory item endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_path_is_documented() {
        let spec = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/auth/register",
            "/api/auth/login",
            "/api/categories",
            "/api/categories/{id}",
            "/api/inventory",
            "/api/inventory/{id}",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
