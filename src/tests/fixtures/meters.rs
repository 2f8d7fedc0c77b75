// Shared meter fixtures for unit and e2e tests.

use chrono::{DateTime, Utc};

use crate::modules::smart_meters::adapters::outbound::meter_store_in_memory::InMemoryMeterStore;
use crate::modules::smart_meters::core::meter::Meter;

pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-06-30T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn ravi() -> Meter {
    Meter::new(101, "Ravi Kumar", "OK")
}

// A store holding one meter whose readings add up to `usage` kWh.
pub fn meter_with_usage(meter_id: i64, usage: f64) -> InMemoryMeterStore {
    InMemoryMeterStore::new()
        .with_meter(Meter::new(meter_id, "Test Customer", "OK"))
        .with_reading(meter_id, usage, fixed_now())
}
