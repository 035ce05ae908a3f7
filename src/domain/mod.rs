//! Domain records: product catalog, vehicle registry, ticket sales.
//!
//! Each record implements `Record` and `Validate`, ships a typed patch enum,
//! and adds its domain queries to `EntityService` for that record type.

mod product;
mod ticket;
mod vehicle;

pub use product::{Product, ProductPatch};
pub use ticket::{Ticket, TicketPatch};
pub use vehicle::{Vehicle, VehiclePatch};

use serde_json::Value;

use crate::validate::ValidationError;

fn expected(field: &str, what: &str, value: &Value) -> ValidationError {
    ValidationError::invalid(field, format!("expected {}, got {}", what, value))
}

pub(crate) fn json_string(field: &str, value: &Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| expected(field, "a string", value))
}

pub(crate) fn json_f64(field: &str, value: &Value) -> Result<f64, ValidationError> {
    value
        .as_f64()
        .ok_or_else(|| expected(field, "a number", value))
}

pub(crate) fn json_i64(field: &str, value: &Value) -> Result<i64, ValidationError> {
    value
        .as_i64()
        .ok_or_else(|| expected(field, "an integer", value))
}

pub(crate) fn json_i32(field: &str, value: &Value) -> Result<i32, ValidationError> {
    let n = json_i64(field, value)?;
    i32::try_from(n).map_err(|_| expected(field, "a 32-bit integer", value))
}

pub(crate) fn json_u32(field: &str, value: &Value) -> Result<u32, ValidationError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| expected(field, "a non-negative integer", value))
}

pub(crate) fn json_bool(field: &str, value: &Value) -> Result<bool, ValidationError> {
    value
        .as_bool()
        .ok_or_else(|| expected(field, "a boolean", value))
}
