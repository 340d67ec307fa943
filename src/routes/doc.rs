use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        items::{ItemList, ItemPayload},
        sales::{ItemSales, SaleList, SellPayload},
    },
    middleware::session::SESSION_COOKIE_NAME,
    models::{Item, Sale, SaleReceipt, SaleRecord, User},
    response::{ApiResponse, ErrorData, Meta},
    routes::{api, health, params},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        api::items::list_items,
        api::items::get_item,
        api::items::create_item,
        api::items::update_item,
        api::items::delete_item,
        api::items::item_sales,
        api::sales::list_sales,
        api::sales::sell_item
    ),
    components(
        schemas(
            User,
            Item,
            Sale,
            SaleRecord,
            SaleReceipt,
            ItemList,
            ItemPayload,
            SaleList,
            ItemSales,
            SellPayload,
            params::Pagination,
            Meta,
            ErrorData,
            ApiResponse<Item>,
            ApiResponse<ItemList>,
            ApiResponse<SaleList>,
            ApiResponse<ItemSales>,
            ApiResponse<SaleReceipt>,
            ApiResponse<ErrorData>
        )
    ),
    security(
        ("session_cookie" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Items", description = "Stock item endpoints"),
        (name = "Sales", description = "Sale endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
