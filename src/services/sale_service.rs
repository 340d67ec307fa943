use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::{
    dto::sales::SaleInput,
    entity::{
        items::{Column as ItemCol, Entity as Items, Model as ItemModel},
        sales::{ActiveModel as SaleActive, Column as SaleCol, Entity as Sales, Model as SaleModel},
    },
    error::{AppError, AppResult},
    models::{Sale, SaleReceipt, SaleRecord},
    response::Meta,
    routes::params::Pagination,
    state::AppState,
};

/// Decrement stock and record the sale in one transaction.
///
/// The decrement only matches while `quantity >= requested`, so the stored
/// quantity cannot go negative even if the row moved after it was read.
/// Any early return drops `txn`, which rolls it back.
pub async fn sell_item(state: &AppState, input: SaleInput) -> AppResult<SaleReceipt> {
    let SaleInput { item_id, quantity } = input;
    let _write = state.write_guard().await;
    let txn = state.orm.begin().await?;

    let item = Items::find_by_id(item_id).one(&txn).await?;
    let item = match item {
        Some(i) => i,
        None => return Err(AppError::NotFound("Item")),
    };

    if item.quantity < quantity {
        return Err(AppError::InsufficientStock {
            requested: quantity,
            available: item.quantity,
        });
    }

    let updated = Items::update_many()
        .col_expr(ItemCol::Quantity, Expr::col(ItemCol::Quantity).sub(quantity))
        .filter(ItemCol::Id.eq(item_id))
        .filter(ItemCol::Quantity.gte(quantity))
        .exec(&txn)
        .await?;
    if updated.rows_affected == 0 {
        return Err(AppError::InsufficientStock {
            requested: quantity,
            available: item.quantity,
        });
    }

    let sale = SaleActive {
        id: NotSet,
        item_id: Set(item_id),
        quantity_sold: Set(quantity),
        sale_date: Set(Utc::now()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    let remaining = item.quantity - quantity;
    tracing::info!(
        item_id,
        sale_id = sale.id,
        quantity_sold = quantity,
        remaining,
        "sale recorded"
    );

    Ok(SaleReceipt {
        sale: Sale::from(sale),
        remaining,
    })
}

/// All sales, newest first, with their item names.
pub async fn list_sales(state: &AppState) -> AppResult<Vec<SaleRecord>> {
    let rows = Sales::find()
        .find_also_related(Items)
        .order_by_desc(SaleCol::SaleDate)
        .order_by_desc(SaleCol::Id)
        .all(&state.orm)
        .await?;
    Ok(rows.into_iter().map(record_from_entity).collect())
}

pub async fn list_sales_page(
    state: &AppState,
    pagination: &Pagination,
) -> AppResult<(Vec<SaleRecord>, Meta)> {
    let (page, limit, offset) = pagination.normalize();

    let total = Sales::find().count(&state.orm).await? as i64;

    let rows = Sales::find()
        .find_also_related(Items)
        .order_by_desc(SaleCol::SaleDate)
        .order_by_desc(SaleCol::Id)
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let records = rows.into_iter().map(record_from_entity).collect();
    Ok((records, Meta::new(page, limit, total)))
}

pub async fn sales_for_item(state: &AppState, item_id: i32) -> AppResult<Vec<Sale>> {
    let sales = Sales::find()
        .filter(SaleCol::ItemId.eq(item_id))
        .order_by_asc(SaleCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Sale::from)
        .collect();
    Ok(sales)
}

fn record_from_entity((sale, item): (SaleModel, Option<ItemModel>)) -> SaleRecord {
    SaleRecord {
        item_name: item.map(|i| i.name).unwrap_or_default(),
        sale: Sale::from(sale),
    }
}
