use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

pub mod items;
pub mod sales;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/items/{id}/sales", get(items::item_sales))
        .route("/sales", get(sales::list_sales).post(sales::sell_item))
}
