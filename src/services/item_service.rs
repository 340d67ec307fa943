use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::{
    dto::items::ItemInput,
    entity::{
        items::{ActiveModel, Column, Entity as Items},
        sales::{Column as SaleCol, Entity as Sales},
    },
    error::{AppError, AppResult},
    models::Item,
    response::Meta,
    routes::params::Pagination,
    state::AppState,
};

/// Result of creating an item. The item row is committed even when the
/// code image could not be written.
#[derive(Debug)]
pub struct CreatedItem {
    pub item: Item,
    pub code_image_written: bool,
}

pub async fn list_items(state: &AppState) -> AppResult<Vec<Item>> {
    let items = Items::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Item::from)
        .collect();
    Ok(items)
}

pub async fn list_items_page(
    state: &AppState,
    pagination: &Pagination,
) -> AppResult<(Vec<Item>, Meta)> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Items::find().order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Item::from)
        .collect();

    Ok((items, Meta::new(page, limit, total)))
}

pub async fn get_item(state: &AppState, id: i32) -> AppResult<Item> {
    let item = Items::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Item::from);
    match item {
        Some(i) => Ok(i),
        None => Err(AppError::NotFound("Item")),
    }
}

/// Insert an item, then write its code image. A failed image write is
/// logged and reported through [`CreatedItem::code_image_written`].
pub async fn create_item(state: &AppState, input: ItemInput) -> AppResult<CreatedItem> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(input.name),
        description: Set(input.description),
        quantity: Set(input.quantity),
        price: Set(input.price),
    };
    let item = {
        let _write = state.write_guard().await;
        Item::from(active.insert(&state.orm).await?)
    };
    tracing::info!(item_id = item.id, name = %item.name, quantity = item.quantity, "item created");

    let code_image_written = match state.codes.generate(&item).await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(item_id = item.id, error = %err, "code image generation failed");
            false
        }
    };

    Ok(CreatedItem {
        item,
        code_image_written,
    })
}

/// Overwrite every field of an existing item.
pub async fn update_item(state: &AppState, id: i32, input: ItemInput) -> AppResult<Item> {
    let _write = state.write_guard().await;
    let existing = Items::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(i) => i,
        None => return Err(AppError::NotFound("Item")),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(input.name);
    active.description = Set(input.description);
    active.quantity = Set(input.quantity);
    active.price = Set(input.price);

    let item = Item::from(active.update(&state.orm).await?);
    tracing::info!(item_id = item.id, quantity = item.quantity, "item updated");
    Ok(item)
}

/// Delete an item unless a sale references it. The check and the delete
/// share one transaction.
pub async fn delete_item(state: &AppState, id: i32) -> AppResult<()> {
    let write = state.write_guard().await;
    let txn = state.orm.begin().await?;

    if Items::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound("Item"));
    }

    let sales = Sales::find()
        .filter(SaleCol::ItemId.eq(id))
        .count(&txn)
        .await?;
    if sales > 0 {
        tracing::info!(item_id = id, sales, "item deletion blocked by existing sales");
        return Err(AppError::DependencyExists { sales });
    }

    Items::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    drop(write);
    tracing::info!(item_id = id, "item deleted");

    if let Err(err) = state.codes.remove(id).await {
        tracing::warn!(item_id = id, error = %err, "code image cleanup failed");
    }

    Ok(())
}
