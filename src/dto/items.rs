use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Item,
};

pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 100;

/// Raw `/add` and `/edit/{id}` form. Every field arrives as text and is
/// parsed by [`ItemForm::validate`].
#[derive(Debug, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub price: String,
}

/// JSON body for creating or replacing an item.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ItemPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: i64,
    pub price: f64,
}

/// Validated item fields, ready for the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInput {
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub price: f64,
}

impl ItemForm {
    pub fn validate(self) -> AppResult<ItemInput> {
        let quantity = self
            .quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::Validation("Quantity must be a whole number".into()))?;
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::Validation("Price must be a number".into()))?;
        ItemInput::new(self.name, self.desc, quantity, price)
    }
}

impl ItemPayload {
    pub fn validate(self) -> AppResult<ItemInput> {
        ItemInput::new(self.name, self.description, self.quantity, self.price)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ItemList {
    #[schema(value_type = Vec<Item>)]
    pub items: Vec<Item>,
}

impl ItemInput {
    pub fn new(name: String, description: String, quantity: i64, price: f64) -> AppResult<Self> {
        let name = name.trim().to_string();
        let description = description.trim().to_string();

        if name.is_empty() {
            return Err(AppError::Validation("Name is required".into()));
        }
        if name.chars().count() > NAME_MAX_LEN {
            return Err(AppError::Validation(format!(
                "Name must be at most {NAME_MAX_LEN} characters"
            )));
        }
        if description.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(AppError::Validation(format!(
                "Description must be at most {DESCRIPTION_MAX_LEN} characters"
            )));
        }
        let quantity = i32::try_from(quantity)
            .ok()
            .filter(|q| *q >= 0)
            .ok_or_else(|| AppError::Validation("Quantity must be zero or more".into()))?;
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::Validation("Price must be zero or more".into()));
        }

        Ok(Self {
            name,
            description,
            quantity,
            price,
        })
    }
}
