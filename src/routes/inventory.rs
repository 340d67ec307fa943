//! Inventory pages: list, add, edit and delete items.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    code_image::CodeImageGenerator,
    dto::items::ItemForm,
    error::AppError,
    middleware::{
        auth::AuthUser,
        session::{Flash, FlashLevel, push_flash, take_flashes},
    },
    models::Item,
    routes::pages::{PageResult, recover, render},
    services::item_service,
    state::AppState,
};

/// Item row for the inventory table.
#[derive(Debug, Clone)]
pub struct ItemRow {
    pub item: Item,
    pub code_url: String,
}

impl From<Item> for ItemRow {
    fn from(item: Item) -> Self {
        let code_url = CodeImageGenerator::url_for(item.id);
        Self { item, code_url }
    }
}

#[derive(Template)]
#[template(path = "inventory.html")]
pub struct InventoryTemplate {
    pub current_user: Option<AuthUser>,
    pub flashes: Vec<Flash>,
    pub items: Vec<ItemRow>,
}

#[derive(Template)]
#[template(path = "edit_item.html")]
pub struct EditItemTemplate {
    pub current_user: Option<AuthUser>,
    pub flashes: Vec<Flash>,
    pub item: Item,
}

#[instrument(skip_all, fields(user = %user.username))]
pub async fn index(
    user: AuthUser,
    session: Session,
    State(state): State<AppState>,
) -> PageResult<Html<String>> {
    let items = item_service::list_items(&state).await?;
    let template = InventoryTemplate {
        current_user: Some(user),
        flashes: take_flashes(&session).await?,
        items: items.into_iter().map(ItemRow::from).collect(),
    };
    Ok(render(&template)?)
}

#[instrument(skip_all, fields(user = %user.username))]
pub async fn add_item(
    user: AuthUser,
    session: Session,
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> PageResult<Redirect> {
    let created = match form.validate() {
        Ok(input) => item_service::create_item(&state, input).await,
        Err(err) => Err(err),
    };

    match created {
        Ok(created) => {
            push_flash(
                &session,
                FlashLevel::Success,
                format!("Item '{}' added.", created.item.name),
            )
            .await?;
            if !created.code_image_written {
                push_flash(
                    &session,
                    FlashLevel::Warning,
                    "The item was saved, but its QR code could not be generated.",
                )
                .await?;
            }
        }
        Err(err) => recover(&session, err).await?,
    }

    Ok(Redirect::to("/inventory"))
}

#[instrument(skip_all, fields(user = %user.username, item_id = id))]
pub async fn delete_item(
    user: AuthUser,
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> PageResult<Redirect> {
    match item_service::delete_item(&state, id).await {
        Ok(()) => push_flash(&session, FlashLevel::Success, "Item successfully deleted.").await?,
        Err(AppError::DependencyExists { .. }) => {
            push_flash(
                &session,
                FlashLevel::Error,
                "Cannot delete item because there are completed sales orders against it.",
            )
            .await?
        }
        Err(err) => recover(&session, err).await?,
    }

    Ok(Redirect::to("/inventory"))
}

#[instrument(skip_all, fields(user = %user.username, item_id = id))]
pub async fn edit_form(
    user: AuthUser,
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> PageResult<Html<String>> {
    let item = item_service::get_item(&state, id).await?;
    let template = EditItemTemplate {
        current_user: Some(user),
        flashes: take_flashes(&session).await?,
        item,
    };
    Ok(render(&template)?)
}

#[instrument(skip_all, fields(user = %user.username, item_id = id))]
pub async fn edit_item(
    user: AuthUser,
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<ItemForm>,
) -> PageResult<Redirect> {
    let updated = match form.validate() {
        Ok(input) => item_service::update_item(&state, id, input).await,
        Err(err) => Err(err),
    };

    match updated {
        Ok(item) => {
            push_flash(
                &session,
                FlashLevel::Success,
                format!("Item '{}' updated.", item.name),
            )
            .await?;
            Ok(Redirect::to("/inventory"))
        }
        Err(err @ AppError::NotFound(_)) => {
            recover(&session, err).await?;
            Ok(Redirect::to("/inventory"))
        }
        Err(err) => {
            recover(&session, err).await?;
            Ok(Redirect::to(&format!("/edit/{id}")))
        }
    }
}
