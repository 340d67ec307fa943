use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Sale, SaleRecord},
};

/// Raw `/sell` form.
#[derive(Debug, Deserialize)]
pub struct SellForm {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub quantity: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SellPayload {
    pub item_id: i32,
    pub quantity: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SaleList {
    #[schema(value_type = Vec<SaleRecord>)]
    pub items: Vec<SaleRecord>,
}

/// Sales of a single item, oldest first.
#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ItemSales {
    #[schema(value_type = Vec<Sale>)]
    pub sales: Vec<Sale>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleInput {
    pub item_id: i32,
    pub quantity: i32,
}

impl SellForm {
    pub fn validate(self) -> AppResult<SaleInput> {
        let item_id = self
            .item_id
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::Validation("Choose an item to sell".into()))?;
        let quantity = self
            .quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::Validation("Quantity must be a whole number".into()))?;
        SaleInput::new(item_id, quantity)
    }
}

impl SellPayload {
    pub fn validate(self) -> AppResult<SaleInput> {
        SaleInput::new(self.item_id, self.quantity)
    }
}

impl SaleInput {
    pub fn new(item_id: i32, quantity: i64) -> AppResult<Self> {
        let quantity = i32::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| AppError::Validation("Quantity sold must be at least 1".into()))?;
        Ok(Self { item_id, quantity })
    }
}
