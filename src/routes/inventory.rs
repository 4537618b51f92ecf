use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    dto::inventory::{CreateInventoryItemRequest, UpdateInventoryItemRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::InventoryItem,
    response::{ErrorBody, MessageBody},
    routes::params::{InventoryQuery, json_body, parse_id},
    services::inventory_service,
    state::AppState,
};

const RESOURCE: &str = "item";

fn not_found() -> AppError {
    AppError::NotFound("Item not found".into())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory).post(create_item))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
}

#[utoipa::path(
    get,
    path = "/api/inventory",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Items newest first; an `InventoryStats` object when `stats=true`", body = Vec<InventoryItem>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<InventoryQuery>,
) -> AppResult<Response> {
    let owner = query.only_mine().then(|| user.id());

    if query.wants_stats() {
        let stats = inventory_service::get_inventory_stats(&state.pool, owner).await?;
        return Ok(Json(stats).into_response());
    }

    let items = match query.search_term() {
        Some(term) => {
            inventory_service::search_inventory_items(&state.orm, term, query.category(), owner)
                .await?
        }
        None => {
            inventory_service::get_all_inventory_items(&state.orm, query.category(), owner).await?
        }
    };
    Ok(Json(items).into_response())
}

#[utoipa::path(
    post,
    path = "/api/inventory",
    request_body = CreateInventoryItemRequest,
    responses(
        (status = 201, description = "Item created", body = InventoryItem),
        (status = 400, description = "Missing required fields", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 409, description = "SKU already exists", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateInventoryItemRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<InventoryItem>)> {
    let new = json_body(payload)?.validate(user.id())?;
    let item = inventory_service::create_inventory_item(&state.orm, new).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Inventory item", body = InventoryItem),
        (status = 400, description = "Invalid item ID", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Item not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn get_item(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<InventoryItem>> {
    let id = parse_id(&id, RESOURCE)?;
    let item = inventory_service::get_inventory_item_by_id(&state.orm, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(item))
}

#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    request_body = UpdateInventoryItemRequest,
    responses(
        (status = 200, description = "Updated item", body = InventoryItem),
        (status = 400, description = "Invalid ID or no updates", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Item not found", body = ErrorBody),
        (status = 409, description = "SKU already exists", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn update_item(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateInventoryItemRequest>, JsonRejection>,
) -> AppResult<Json<InventoryItem>> {
    let id = parse_id(&id, RESOURCE)?;
    let patch = json_body(payload)?.validate()?;
    let item = inventory_service::update_inventory_item(&state.orm, id, patch)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = MessageBody),
        (status = 400, description = "Invalid item ID", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Item not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageBody>> {
    let id = parse_id(&id, RESOURCE)?;
    if !inventory_service::delete_inventory_item(&state.orm, id).await? {
        return Err(not_found());
    }

    tracing::info!(item_id = id, user_id = user.id(), "inventory item deleted");
    Ok(Json(MessageBody::new("Item deleted successfully")))
}
