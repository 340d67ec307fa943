use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{items, sales, users};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub price: f64,
}

impl Item {
    pub fn price_display(&self) -> String {
        format!("{:.2}", self.price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Sale {
    pub id: i32,
    pub item_id: i32,
    pub quantity_sold: i32,
    pub sale_date: DateTime<Utc>,
}

/// A sale joined with the name of the item it was recorded against.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SaleRecord {
    #[serde(flatten)]
    pub sale: Sale,
    pub item_name: String,
}

impl SaleRecord {
    pub fn date_display(&self) -> String {
        self.sale.sale_date.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Outcome of a successful sale: the new row and the stock left behind.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SaleReceipt {
    pub sale: Sale,
    pub remaining: i32,
}

impl From<items::Model> for Item {
    fn from(model: items::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            quantity: model.quantity,
            price: model.price,
        }
    }
}

impl From<sales::Model> for Sale {
    fn from(model: sales::Model) -> Self {
        Self {
            id: model.id,
            item_id: model.item_id,
            quantity_sold: model.quantity_sold,
            sale_date: model.sale_date,
        }
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
        }
    }
}
