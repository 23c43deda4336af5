use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{AppError, AppResult};

pub const PRODUCT_NOT_FOUND: &str = "Produto não encontrado!";
pub const PRODUCT_DELETED: &str = "Produto deletado com sucesso!";

/// Exclusive upper bound of a `NUMERIC(10,2)` price.
pub const MAX_PRICE: f64 = 100_000_000.0;

/// Stored product row. Price lives in the table as integer cents and goes out
/// on the wire as a fractional number under the `price` key.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "price", serialize_with = "cents_as_decimal")]
    pub price_cents: i64,
    pub sku: Option<String>,
    pub date_added: Option<NaiveDate>,
}

impl Product {
    pub fn price(&self) -> f64 {
        cents_to_price(self.price_cents)
    }
}

pub fn price_to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

pub fn cents_to_price(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn cents_as_decimal<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(cents_to_price(*cents))
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Incoming body for both create and update. Every key is optional at the
/// serde level so a missing required key becomes a 400 instead of a
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub sku: Option<String>,
    pub date_added: Option<NaiveDate>,
}

/// Fully validated product fields, written verbatim by insert and update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub sku: Option<String>,
    pub date_added: Option<NaiveDate>,
}

impl ProductPayload {
    pub fn validate(self) -> AppResult<NewProduct> {
        let name = self.name.ok_or_else(|| AppError::missing_field("name"))?;
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("O campo name não pode ser vazio".to_string()));
        }
        let price = self.price.ok_or_else(|| AppError::missing_field("price"))?;
        if !price.is_finite() {
            return Err(AppError::BadRequest("O campo price deve ser um número".to_string()));
        }
        if price < 0.0 {
            return Err(AppError::BadRequest("O campo price não pode ser negativo".to_string()));
        }
        // Rounding can push 99999999.995 up to 10^8, so the bound is checked in cents too.
        if price >= MAX_PRICE || price_to_cents(price) >= price_to_cents(MAX_PRICE) {
            return Err(AppError::BadRequest(format!(
                "O campo price deve ser menor que {}",
                MAX_PRICE
            )));
        }

        Ok(NewProduct {
            name,
            description: self.description,
            price_cents: price_to_cents(price),
            sku: self.sku,
            date_added: self.date_added,
        })
    }
}
