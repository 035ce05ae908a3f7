//! Product catalog records. `code_value` is the natural key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{json_bool, json_f64, json_i64, json_string};
use crate::config::ValidationRules;
use crate::entity::{FieldPatch, Id, Record, Store};
use crate::filter::Filter;
use crate::service::{EntityService, ServiceError};
use crate::validate::{self, Validate, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    pub quantity: i64,
    pub code_value: String,
    pub is_published: bool,
    /// Day/month/year, e.g. `15/12/2021`.
    pub expiration: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProductPatch {
    Name(String),
    Quantity(i64),
    CodeValue(String),
    IsPublished(bool),
    Expiration(String),
    Price(f64),
}

impl FieldPatch<Product> for ProductPatch {
    fn field(&self) -> &'static str {
        match self {
            ProductPatch::Name(_) => "name",
            ProductPatch::Quantity(_) => "quantity",
            ProductPatch::CodeValue(_) => "code_value",
            ProductPatch::IsPublished(_) => "is_published",
            ProductPatch::Expiration(_) => "expiration",
            ProductPatch::Price(_) => "price",
        }
    }

    fn apply(self, product: &mut Product) {
        match self {
            ProductPatch::Name(v) => product.name = v,
            ProductPatch::Quantity(v) => product.quantity = v,
            ProductPatch::CodeValue(v) => product.code_value = v,
            ProductPatch::IsPublished(v) => product.is_published = v,
            ProductPatch::Expiration(v) => product.expiration = v,
            ProductPatch::Price(v) => product.price = v,
        }
    }

    fn decode(field: &str, value: &Value) -> Result<Option<Self>, ValidationError> {
        let patch = match field {
            "name" => ProductPatch::Name(json_string(field, value)?),
            "quantity" => ProductPatch::Quantity(json_i64(field, value)?),
            "code_value" => ProductPatch::CodeValue(json_string(field, value)?),
            "is_published" => ProductPatch::IsPublished(json_bool(field, value)?),
            "expiration" => ProductPatch::Expiration(json_string(field, value)?),
            "price" => ProductPatch::Price(json_f64(field, value)?),
            _ => return Ok(None),
        };
        Ok(Some(patch))
    }
}

impl Record for Product {
    const COLLECTION: &'static str = "products";
    const NATURAL_KEY: Option<&'static str> = Some("code_value");
    type Patch = ProductPatch;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.code_value)
    }
}

impl Validate for Product {
    fn validate(&self, rules: &ValidationRules) -> Result<(), ValidationError> {
        validate::required("name", &self.name)?;
        validate::non_negative("quantity", self.quantity)?;
        validate::required("code_value", &self.code_value)?;
        validate::non_negative("price", self.price)?;
        validate::date("expiration", &self.expiration, rules)
    }
}

impl Validate for ProductPatch {
    fn validate(&self, rules: &ValidationRules) -> Result<(), ValidationError> {
        match self {
            ProductPatch::Name(v) => validate::required("name", v),
            ProductPatch::Quantity(v) => validate::non_negative("quantity", *v),
            ProductPatch::CodeValue(v) => validate::required("code_value", v),
            ProductPatch::IsPublished(_) => Ok(()),
            ProductPatch::Expiration(v) => validate::date("expiration", v, rules),
            ProductPatch::Price(v) => validate::non_negative("price", *v),
        }
    }
}

impl<S: Store<Product>> EntityService<Product, S> {
    /// Products priced strictly above `price_gt`.
    pub fn search_by_price(&self, price_gt: f64) -> Result<Vec<Product>, ServiceError> {
        validate::non_negative("price", price_gt)?;
        self.find(&Filter::gt(|p: &Product| p.price, price_gt))
    }
}
