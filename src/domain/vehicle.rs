//! Vehicle registry records. `registration` is the natural key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{json_f64, json_i32, json_string, json_u32};
use crate::config::ValidationRules;
use crate::entity::{FieldPatch, Id, Record, Store};
use crate::filter::Filter;
use crate::service::{EntityService, ServiceError};
use crate::validate::{self, Validate, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub id: Id,
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    pub year: i32,
    pub passengers: u32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    pub height: f64,
    pub length: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum VehiclePatch {
    Brand(String),
    Model(String),
    Registration(String),
    Color(String),
    Year(i32),
    Passengers(u32),
    MaxSpeed(f64),
    FuelType(String),
    Transmission(String),
    Weight(f64),
    Height(f64),
    Length(f64),
    Width(f64),
}

impl FieldPatch<Vehicle> for VehiclePatch {
    fn field(&self) -> &'static str {
        match self {
            VehiclePatch::Brand(_) => "brand",
            VehiclePatch::Model(_) => "model",
            VehiclePatch::Registration(_) => "registration",
            VehiclePatch::Color(_) => "color",
            VehiclePatch::Year(_) => "year",
            VehiclePatch::Passengers(_) => "passengers",
            VehiclePatch::MaxSpeed(_) => "max_speed",
            VehiclePatch::FuelType(_) => "fuel_type",
            VehiclePatch::Transmission(_) => "transmission",
            VehiclePatch::Weight(_) => "weight",
            VehiclePatch::Height(_) => "height",
            VehiclePatch::Length(_) => "length",
            VehiclePatch::Width(_) => "width",
        }
    }

    fn apply(self, vehicle: &mut Vehicle) {
        match self {
            VehiclePatch::Brand(v) => vehicle.brand = v,
            VehiclePatch::Model(v) => vehicle.model = v,
            VehiclePatch::Registration(v) => vehicle.registration = v,
            VehiclePatch::Color(v) => vehicle.color = v,
            VehiclePatch::Year(v) => vehicle.year = v,
            VehiclePatch::Passengers(v) => vehicle.passengers = v,
            VehiclePatch::MaxSpeed(v) => vehicle.max_speed = v,
            VehiclePatch::FuelType(v) => vehicle.fuel_type = v,
            VehiclePatch::Transmission(v) => vehicle.transmission = v,
            VehiclePatch::Weight(v) => vehicle.weight = v,
            VehiclePatch::Height(v) => vehicle.height = v,
            VehiclePatch::Length(v) => vehicle.length = v,
            VehiclePatch::Width(v) => vehicle.width = v,
        }
    }

    fn decode(field: &str, value: &Value) -> Result<Option<Self>, ValidationError> {
        let patch = match field {
            "brand" => VehiclePatch::Brand(json_string(field, value)?),
            "model" => VehiclePatch::Model(json_string(field, value)?),
            "registration" => VehiclePatch::Registration(json_string(field, value)?),
            "color" => VehiclePatch::Color(json_string(field, value)?),
            "year" => VehiclePatch::Year(json_i32(field, value)?),
            "passengers" => VehiclePatch::Passengers(json_u32(field, value)?),
            "max_speed" => VehiclePatch::MaxSpeed(json_f64(field, value)?),
            "fuel_type" => VehiclePatch::FuelType(json_string(field, value)?),
            "transmission" => VehiclePatch::Transmission(json_string(field, value)?),
            "weight" => VehiclePatch::Weight(json_f64(field, value)?),
            "height" => VehiclePatch::Height(json_f64(field, value)?),
            "length" => VehiclePatch::Length(json_f64(field, value)?),
            "width" => VehiclePatch::Width(json_f64(field, value)?),
            _ => return Ok(None),
        };
        Ok(Some(patch))
    }
}

impl Record for Vehicle {
    const COLLECTION: &'static str = "vehicles";
    const NATURAL_KEY: Option<&'static str> = Some("registration");
    type Patch = VehiclePatch;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.registration)
    }
}

impl Validate for Vehicle {
    fn validate(&self, rules: &ValidationRules) -> Result<(), ValidationError> {
        validate::non_negative("height", self.height)?;
        validate::non_negative("length", self.length)?;
        validate::non_negative("width", self.width)?;
        validate::year("year", self.year, rules)?;
        validate::positive("passengers", self.passengers)?;
        validate::positive("max_speed", self.max_speed)?;
        validate::positive("weight", self.weight)?;
        validate::required("brand", &self.brand)?;
        validate::required("model", &self.model)?;
        validate::required("registration", &self.registration)?;
        validate::required("color", &self.color)?;
        validate::required("fuel_type", &self.fuel_type)?;
        validate::required("transmission", &self.transmission)
    }
}

impl Validate for VehiclePatch {
    fn validate(&self, rules: &ValidationRules) -> Result<(), ValidationError> {
        let field = self.field();
        match self {
            VehiclePatch::Brand(v)
            | VehiclePatch::Model(v)
            | VehiclePatch::Registration(v)
            | VehiclePatch::Color(v)
            | VehiclePatch::FuelType(v)
            | VehiclePatch::Transmission(v) => validate::required(field, v),
            VehiclePatch::Year(v) => validate::year(field, *v, rules),
            VehiclePatch::Passengers(v) => validate::positive(field, *v),
            VehiclePatch::MaxSpeed(v) | VehiclePatch::Weight(v) => validate::positive(field, *v),
            VehiclePatch::Height(v) | VehiclePatch::Length(v) | VehiclePatch::Width(v) => {
                validate::non_negative(field, *v)
            }
        }
    }
}

fn brand_is(brand: &str) -> Filter<Vehicle> {
    Filter::eq(|v: &Vehicle| &v.brand, brand.to_owned())
}

impl<S: Store<Vehicle>> EntityService<Vehicle, S> {
    pub fn find_by_color_and_year(
        &self,
        color: &str,
        year: i32,
    ) -> Result<Vec<Vehicle>, ServiceError> {
        validate::year("year", year, self.rules())?;
        self.find(
            &Filter::eq(|v: &Vehicle| &v.color, color.to_owned())
                .and(Filter::eq(|v: &Vehicle| &v.year, year)),
        )
    }

    /// Vehicles of `brand` built between `start_year` and `end_year` inclusive.
    pub fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<Vehicle>, ServiceError> {
        validate::year("start_year", start_year, self.rules())?;
        validate::year("end_year", end_year, self.rules())?;
        validate::range("year", start_year, end_year)?;
        self.find(&brand_is(brand).and(Filter::between(
            |v: &Vehicle| v.year,
            start_year,
            end_year,
        )))
    }

    pub fn find_by_fuel_type(&self, fuel_type: &str) -> Result<Vec<Vehicle>, ServiceError> {
        validate::required("fuel_type", fuel_type)?;
        self.find(&Filter::eq(|v: &Vehicle| &v.fuel_type, fuel_type.to_owned()))
    }

    pub fn find_by_transmission(&self, transmission: &str) -> Result<Vec<Vehicle>, ServiceError> {
        validate::required("transmission", transmission)?;
        self.find(&Filter::eq(
            |v: &Vehicle| &v.transmission,
            transmission.to_owned(),
        ))
    }

    /// Vehicles whose length and width both fall in the given inclusive ranges.
    pub fn find_by_dimensions(
        &self,
        (min_length, max_length): (f64, f64),
        (min_width, max_width): (f64, f64),
    ) -> Result<Vec<Vehicle>, ServiceError> {
        validate::range("length", min_length, max_length)?;
        validate::range("width", min_width, max_width)?;
        self.find(
            &Filter::between(|v: &Vehicle| v.length, min_length, max_length)
                .and(Filter::between(|v: &Vehicle| v.width, min_width, max_width)),
        )
    }

    pub fn find_by_weight_range(
        &self,
        min_weight: f64,
        max_weight: f64,
    ) -> Result<Vec<Vehicle>, ServiceError> {
        validate::range("weight", min_weight, max_weight)?;
        self.find(&Filter::between(
            |v: &Vehicle| v.weight,
            min_weight,
            max_weight,
        ))
    }

    pub fn average_speed_by_brand(&self, brand: &str) -> Result<f64, ServiceError> {
        validate::required("brand", brand)?;
        self.average(&brand_is(brand), |v| v.max_speed)
    }

    pub fn average_passengers_by_brand(&self, brand: &str) -> Result<f64, ServiceError> {
        validate::required("brand", brand)?;
        self.average(&brand_is(brand), |v| f64::from(v.passengers))
    }
}
