use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    dto::{
        items::{ItemList, ItemPayload},
        sales::ItemSales,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Item,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::{item_service, sale_service},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/items",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List items", body = ApiResponse<ItemList>),
        (status = 401, description = "Not logged in")
    ),
    tag = "Items"
)]
pub async fn list_items(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ItemList>>> {
    let (items, meta) = item_service::list_items_page(&state, &pagination).await?;
    Ok(Json(ApiResponse::success(
        "Items",
        ItemList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Get item", body = ApiResponse<Item>),
        (status = 404, description = "Item not found"),
    ),
    tag = "Items"
)]
pub async fn get_item(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Item>>> {
    let item = item_service::get_item(&state, id).await?;
    Ok(Json(ApiResponse::success("Item", item, None)))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}/sales",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Sales of one item, oldest first", body = ApiResponse<ItemSales>),
        (status = 404, description = "Item not found"),
    ),
    tag = "Items"
)]
pub async fn item_sales(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ItemSales>>> {
    let item = item_service::get_item(&state, id).await?;
    let sales = sale_service::sales_for_item(&state, item.id).await?;
    Ok(Json(ApiResponse::success(
        "Item sales",
        ItemSales { sales },
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/items",
    request_body = ItemPayload,
    responses(
        (status = 201, description = "Create item and its QR code", body = ApiResponse<Item>),
        (status = 422, description = "Invalid item fields")
    ),
    tag = "Items"
)]
pub async fn create_item(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ItemPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Item>>)> {
    let input = payload.validate()?;
    let created = item_service::create_item(&state, input).await?;
    tracing::debug!(user = %user.username, item_id = created.item.id, "item created via api");

    let message = if created.code_image_written {
        "Item created"
    } else {
        "Item created; QR code generation failed"
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(message, created.item, Some(Meta::empty()))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    request_body = ItemPayload,
    responses(
        (status = 200, description = "Replace every item field", body = ApiResponse<Item>),
        (status = 404, description = "Item not found"),
        (status = 422, description = "Invalid item fields")
    ),
    tag = "Items"
)]
pub async fn update_item(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ItemPayload>,
) -> AppResult<Json<ApiResponse<Item>>> {
    let input = payload.validate()?;
    let item = item_service::update_item(&state, id, input).await?;
    Ok(Json(ApiResponse::success("Updated", item, Some(Meta::empty()))))
}

#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Deleted item"),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Item has recorded sales")
    ),
    tag = "Items"
)]
pub async fn delete_item(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    item_service::delete_item(&state, id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
