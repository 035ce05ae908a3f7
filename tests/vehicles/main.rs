//! Integration tests for the vehicle registry service.

mod fixtures;

use entity_store::domain::{Vehicle, VehiclePatch};
use entity_store::{ErrorKind, Filter, Id};
use fixtures::{fleet, service, vehicle};
use serde_json::json;

fn ids(vehicles: &[Vehicle]) -> Vec<Id> {
    vehicles.iter().map(|v| v.id).collect()
}

// ============================================================================
// Lookups
// ============================================================================

#[test]
fn find_by_color_and_year() {
    let service = service();
    let stored = fleet(&service);

    let found = service.find_by_color_and_year("red", 2015).unwrap();
    assert_eq!(ids(&found), vec![stored[0].id, stored[3].id]);

    let err = service.find_by_color_and_year("green", 2015).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFoundMany);

    let err = service.find_by_color_and_year("red", 1800).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidField);
}

#[test]
fn find_by_brand_and_year_range() {
    let service = service();
    let stored = fleet(&service);

    let found = service
        .find_by_brand_and_year_range("Toyota", 2016, 2024)
        .unwrap();
    assert_eq!(ids(&found), vec![stored[2].id]);

    let err = service
        .find_by_brand_and_year_range("Toyota", 2020, 2010)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidField);

    let err = service
        .find_by_brand_and_year_range("Toyota", 2010, 2099)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidField);
}

#[test]
fn find_by_fuel_type_and_transmission() {
    let service = service();
    let stored = fleet(&service);

    assert_eq!(
        ids(&service.find_by_fuel_type("diesel").unwrap()),
        vec![stored[2].id]
    );
    assert_eq!(
        ids(&service.find_by_transmission("automatic").unwrap()),
        vec![stored[2].id, stored[3].id]
    );
    assert_eq!(
        service.find_by_fuel_type("").unwrap_err().kind(),
        ErrorKind::FieldRequired
    );
    assert_eq!(
        service.find_by_fuel_type("electric").unwrap_err().kind(),
        ErrorKind::NotFoundMany
    );
}

#[test]
fn find_by_dimensions() {
    let service = service();
    let stored = fleet(&service);

    let found = service.find_by_dimensions((4.0, 5.0), (1.75, 2.0)).unwrap();
    assert_eq!(ids(&found), vec![stored[0].id, stored[1].id]);

    let err = service
        .find_by_dimensions((5.0, 4.0), (1.0, 2.0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidField);
}

#[test]
fn find_by_weight_range() {
    let service = service();
    let stored = fleet(&service);

    let found = service.find_by_weight_range(1000.0, 1300.0).unwrap();
    assert_eq!(ids(&found), vec![stored[0].id, stored[1].id, stored[3].id]);

    assert_eq!(
        service.find_by_weight_range(-1.0, 10.0).unwrap_err().kind(),
        ErrorKind::InvalidField
    );
}

#[test]
fn combined_filter_through_service() {
    let service = service();
    let stored = fleet(&service);

    let filter = Filter::all_of([
        Filter::eq(|v: &Vehicle| &v.brand, "Toyota".to_string()),
        Filter::gt(|v: &Vehicle| v.max_speed, 170.0),
        Filter::between(|v: &Vehicle| v.passengers, 1, 3),
    ]);
    assert_eq!(ids(&service.find(&filter).unwrap()), vec![stored[2].id]);
}

// ============================================================================
// Aggregates
// ============================================================================

#[test]
fn average_speed_by_brand() {
    let service = service();
    fleet(&service);

    assert_eq!(service.average_speed_by_brand("Ford").unwrap(), 200.0);
    assert_eq!(service.average_speed_by_brand("Toyota").unwrap(), 170.0);
    assert_eq!(
        service.average_speed_by_brand("Fiat").unwrap_err().kind(),
        ErrorKind::NotFoundMany
    );
}

#[test]
fn average_passengers_by_brand() {
    let service = service();
    fleet(&service);

    assert_eq!(service.average_passengers_by_brand("Ford").unwrap(), 4.5);
    assert_eq!(service.average_passengers_by_brand("Toyota").unwrap(), 3.0);
}

// ============================================================================
// Mutations
// ============================================================================

#[test]
fn batch_with_duplicate_registration_stores_nothing() {
    let service = service();
    service.create(vehicle("DUP")).unwrap();

    let err = service
        .create_many(vec![vehicle("NEW-1"), vehicle("DUP")])
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DuplicateKey);
    assert_eq!(service.get_all().unwrap().len(), 1);
}

#[test]
fn patch_max_speed_and_fuel_type() {
    let service = service();
    let stored = service.create(vehicle("ABC")).unwrap();

    let patched = service
        .update_partial(
            stored.id,
            vec![
                VehiclePatch::MaxSpeed(220.0),
                VehiclePatch::FuelType("diesel".into()),
            ],
        )
        .unwrap();

    assert_eq!(
        patched,
        Vehicle {
            max_speed: 220.0,
            fuel_type: "diesel".into(),
            ..stored
        }
    );
}

#[test]
fn patch_with_zero_speed_is_rejected() {
    let service = service();
    let stored = service.create(vehicle("ABC")).unwrap();

    let err = service
        .update_partial(stored.id, vec![VehiclePatch::MaxSpeed(0.0)])
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FieldRequired);
    assert_eq!(service.get(stored.id).unwrap().max_speed, 190.0);
}

#[test]
fn patch_registration_moves_natural_key() {
    let service = service();
    let stored = service.create(vehicle("OLD")).unwrap();

    service
        .update_partial(stored.id, vec![VehiclePatch::Registration("NEW".into())])
        .unwrap();

    assert!(service.create(vehicle("OLD")).is_ok());
    assert_eq!(
        service.create(vehicle("NEW")).unwrap_err().kind(),
        ErrorKind::DuplicateKey
    );
}

#[test]
fn untyped_patch_from_json_body() {
    let service = service();
    let stored = service.create(vehicle("ABC")).unwrap();

    let body = json!({ "max_speed": 205.5, "passengers": 7 });
    let patched = service
        .update_partial_fields(stored.id, body.as_object().unwrap())
        .unwrap();

    assert_eq!(patched.max_speed, 205.5);
    assert_eq!(patched.passengers, 7);
    assert_eq!(patched.registration, "ABC");
}

#[test]
fn delete_vehicle() {
    let service = service();
    let stored = fleet(&service);

    service.delete(stored[1].id).unwrap();

    assert_eq!(service.get(stored[1].id).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(service.get_all().unwrap().len(), 3);
    assert_eq!(service.get(stored[3].id).unwrap(), stored[3]);
}
