// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe the meter store as a trait so query handlers never see a concrete backend.
//
// Responsibilities
// - Lookup by id, aggregate usage by id, list meters, one-time idempotent seeding.
// - A missing meter is `Ok(None)` / `Ok(0.0)`. Only storage faults are errors.
//
// Boundaries
// - No concrete input or output here. Adapters implement this trait in adapters/outbound.
//
// Testing guidance
// - Use the in memory store for handler tests; it can be toggled offline.

use async_trait::async_trait;
use thiserror::Error;

use crate::modules::smart_meters::core::meter::Meter;

#[derive(Debug, Error)]
pub enum MeterStoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for MeterStoreError {
    fn from(err: sqlx::Error) -> Self {
        MeterStoreError::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait MeterStore: Send + Sync {
    /// Creates the schema if needed and seeds whichever collection is empty.
    /// Safe to call on every start.
    async fn initialize(&self) -> Result<(), MeterStoreError>;

    async fn find_meter(&self, meter_id: i64) -> Result<Option<Meter>, MeterStoreError>;

    /// Total kWh across every reading of the meter. `0.0` when there are none,
    /// including when the meter does not exist.
    async fn sum_usage(&self, meter_id: i64) -> Result<f64, MeterStoreError>;

    /// All meters ordered by id.
    async fn list_meters(&self) -> Result<Vec<Meter>, MeterStoreError>;
}
