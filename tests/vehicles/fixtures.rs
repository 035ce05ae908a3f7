use entity_store::domain::Vehicle;
use entity_store::{EntityService, InMemoryStore, ServiceConfig, ValidationRules};

pub type VehicleService = EntityService<Vehicle, InMemoryStore<Vehicle>>;

/// Service with the year bound pinned so fixtures do not depend on the clock.
pub fn service() -> VehicleService {
    EntityService::with_config(
        InMemoryStore::new(),
        ServiceConfig::new().with_rules(ValidationRules::new().with_max_year(2024)),
    )
}

pub fn vehicle(registration: &str) -> Vehicle {
    Vehicle {
        brand: "Ford".into(),
        model: "Focus".into(),
        registration: registration.into(),
        color: "red".into(),
        year: 2015,
        passengers: 5,
        max_speed: 190.0,
        fuel_type: "gas".into(),
        transmission: "manual".into(),
        weight: 1300.0,
        height: 1.5,
        length: 4.4,
        width: 1.8,
        ..Default::default()
    }
}

/// A small mixed fleet, stored in order.
pub fn fleet(service: &VehicleService) -> Vec<Vehicle> {
    let vehicles = vec![
        vehicle("F-1"),
        Vehicle {
            color: "blue".into(),
            year: 2020,
            max_speed: 210.0,
            passengers: 4,
            ..vehicle("F-2")
        },
        Vehicle {
            brand: "Toyota".into(),
            model: "Hilux".into(),
            fuel_type: "diesel".into(),
            transmission: "automatic".into(),
            weight: 2100.0,
            length: 5.3,
            width: 1.9,
            year: 2018,
            passengers: 2,
            max_speed: 175.0,
            ..vehicle("T-1")
        },
        Vehicle {
            brand: "Toyota".into(),
            model: "Yaris".into(),
            color: "red".into(),
            year: 2015,
            fuel_type: "hybrid".into(),
            transmission: "automatic".into(),
            weight: 1050.0,
            length: 3.9,
            width: 1.7,
            passengers: 4,
            max_speed: 165.0,
            ..vehicle("T-2")
        },
    ];
    service.create_many(vehicles).unwrap()
}
