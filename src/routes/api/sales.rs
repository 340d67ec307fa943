use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    dto::sales::{SaleList, SellPayload},
    error::AppResult,
    middleware::auth::AuthUser,
    models::SaleReceipt,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::sale_service,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/sales",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Sales per page, default 20"),
    ),
    responses(
        (status = 200, description = "Sales, newest first", body = ApiResponse<SaleList>),
        (status = 401, description = "Not logged in")
    ),
    tag = "Sales"
)]
pub async fn list_sales(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<SaleList>>> {
    let (items, meta) = sale_service::list_sales_page(&state, &pagination).await?;
    Ok(Json(ApiResponse::success(
        "Sales",
        SaleList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    post,
    path = "/api/sales",
    request_body = SellPayload,
    responses(
        (status = 201, description = "Sale recorded", body = ApiResponse<SaleReceipt>),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Insufficient stock"),
        (status = 422, description = "Quantity must be positive")
    ),
    tag = "Sales"
)]
pub async fn sell_item(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<SellPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<SaleReceipt>>)> {
    let input = payload.validate()?;
    let receipt = sale_service::sell_item(&state, input).await?;
    tracing::debug!(user = %user.username, sale_id = receipt.sale.id, "sale recorded via api");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Sale recorded",
            receipt,
            Some(Meta::empty()),
        )),
    ))
}
