// Meter and reading records as the meter store hands them to the core.
//
// Purpose
// - Carry the persisted shape of a meter and its usage readings.
//
// Notes
// - `Meter::status` is the stored display label. The authoritative status is always
//   recomputed from usage, see status.rs.
// - Meter ids are assigned externally, reading ids by the store.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Meter {
    pub id: i64,
    pub name: String,
    pub status: String,
}

impl Meter {
    pub fn new(id: i64, name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: status.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Reading {
    pub id: i64,
    pub meter_id: i64,
    pub kwh: f64,
    pub timestamp: DateTime<Utc>,
}

// A reading that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub meter_id: i64,
    pub kwh: f64,
    pub timestamp: DateTime<Utc>,
}
