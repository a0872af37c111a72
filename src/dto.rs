use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product entry in the cart.
///
/// This is also the persisted shape: the storage blob is a JSON array of
/// these records with `price` written as a JSON number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

/// A product as handed to `add_to_cart`: a [`LineItem`] without quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLineItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl NewLineItem {
    pub(crate) fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Add,
    Increment,
    Decrement,
}

/// A row of a cart script (`type,id,title,image_url,price`).
/// Only `add` rows carry the product fields.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CartOperation {
    #[serde(rename = "type")]
    pub op_type: OperationType,
    pub id: String,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<Decimal>,
}

/// Output row for the final cart listing.
#[derive(Debug, Serialize, PartialEq)]
pub struct CartRow {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl From<LineItem> for CartRow {
    fn from(item: LineItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
            quantity: item.quantity,
        }
    }
}
