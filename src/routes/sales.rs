//! Sales pages: history plus the sell form.

use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{Html, Redirect},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    dto::sales::SellForm,
    middleware::{
        auth::AuthUser,
        session::{Flash, FlashLevel, push_flash, take_flashes},
    },
    models::{Item, SaleRecord},
    routes::pages::{PageResult, recover, render},
    services::{item_service, sale_service},
    state::AppState,
};

#[derive(Template)]
#[template(path = "sales.html")]
pub struct SalesTemplate {
    pub current_user: Option<AuthUser>,
    pub flashes: Vec<Flash>,
    pub sales: Vec<SaleRecord>,
    pub items: Vec<Item>,
}

#[instrument(skip_all, fields(user = %user.username))]
pub async fn index(
    user: AuthUser,
    session: Session,
    State(state): State<AppState>,
) -> PageResult<Html<String>> {
    let sales = sale_service::list_sales(&state).await?;
    let items = item_service::list_items(&state).await?;
    let template = SalesTemplate {
        current_user: Some(user),
        flashes: take_flashes(&session).await?,
        sales,
        items,
    };
    Ok(render(&template)?)
}

/// Record a sale. Success lands on the sales history; a rejected sale goes
/// back to the inventory with the reason flashed.
#[instrument(skip_all, fields(user = %user.username))]
pub async fn sell_item(
    user: AuthUser,
    session: Session,
    State(state): State<AppState>,
    Form(form): Form<SellForm>,
) -> PageResult<Redirect> {
    let sold = match form.validate() {
        Ok(input) => sale_service::sell_item(&state, input).await,
        Err(err) => Err(err),
    };

    match sold {
        Ok(_) => {
            push_flash(&session, FlashLevel::Success, "Sale recorded successfully!").await?;
            Ok(Redirect::to("/sales"))
        }
        Err(err) => {
            recover(&session, err).await?;
            Ok(Redirect::to("/inventory"))
        }
    }
}
