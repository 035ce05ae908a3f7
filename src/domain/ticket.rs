//! Ticket sales records. Tickets have no natural key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{json_f64, json_string};
use crate::config::ValidationRules;
use crate::entity::{FieldPatch, Id, Record, Store};
use crate::filter::Filter;
use crate::service::{EntityService, ServiceError};
use crate::validate::{self, Validate, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    pub email: String,
    /// Destination country.
    pub country: String,
    pub hour: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum TicketPatch {
    Name(String),
    Email(String),
    Country(String),
    Hour(String),
    Price(f64),
}

impl FieldPatch<Ticket> for TicketPatch {
    fn field(&self) -> &'static str {
        match self {
            TicketPatch::Name(_) => "name",
            TicketPatch::Email(_) => "email",
            TicketPatch::Country(_) => "country",
            TicketPatch::Hour(_) => "hour",
            TicketPatch::Price(_) => "price",
        }
    }

    fn apply(self, ticket: &mut Ticket) {
        match self {
            TicketPatch::Name(v) => ticket.name = v,
            TicketPatch::Email(v) => ticket.email = v,
            TicketPatch::Country(v) => ticket.country = v,
            TicketPatch::Hour(v) => ticket.hour = v,
            TicketPatch::Price(v) => ticket.price = v,
        }
    }

    fn decode(field: &str, value: &Value) -> Result<Option<Self>, ValidationError> {
        let patch = match field {
            "name" => TicketPatch::Name(json_string(field, value)?),
            "email" => TicketPatch::Email(json_string(field, value)?),
            "country" => TicketPatch::Country(json_string(field, value)?),
            "hour" => TicketPatch::Hour(json_string(field, value)?),
            "price" => TicketPatch::Price(json_f64(field, value)?),
            _ => return Ok(None),
        };
        Ok(Some(patch))
    }
}

impl Record for Ticket {
    const COLLECTION: &'static str = "tickets";
    type Patch = TicketPatch;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}

impl Validate for Ticket {
    fn validate(&self, _rules: &ValidationRules) -> Result<(), ValidationError> {
        validate::required("name", &self.name)?;
        validate::required("email", &self.email)?;
        validate::required("country", &self.country)?;
        validate::required("hour", &self.hour)?;
        validate::non_negative("price", self.price)
    }
}

impl Validate for TicketPatch {
    fn validate(&self, _rules: &ValidationRules) -> Result<(), ValidationError> {
        match self {
            TicketPatch::Price(v) => validate::non_negative("price", *v),
            TicketPatch::Name(v)
            | TicketPatch::Email(v)
            | TicketPatch::Country(v)
            | TicketPatch::Hour(v) => validate::required(self.field(), v),
        }
    }
}

fn destination(country: &str) -> Filter<Ticket> {
    Filter::eq(|t: &Ticket| &t.country, country.to_owned())
}

impl<S: Store<Ticket>> EntityService<Ticket, S> {
    /// Number of tickets sold.
    pub fn total_tickets(&self) -> Result<usize, ServiceError> {
        Ok(self.store().len()?)
    }

    /// Number of tickets sold to `country`. Zero is a valid answer.
    pub fn count_by_destination(&self, country: &str) -> Result<usize, ServiceError> {
        validate::required("country", country)?;
        self.count(&destination(country))
    }

    /// Fraction of all tickets sold to `country`.
    pub fn share_by_destination(&self, country: &str) -> Result<f64, ServiceError> {
        validate::required("country", country)?;
        self.share(&destination(country))
    }
}
