// In memory implementation of the MeterStore port.
//
// Purpose
// - Support handler and transport tests, and local runs without a database.
//
// Responsibilities
// - Keep meters keyed by id and readings in insertion order.
// - Seed exactly like the SQLite store: each empty collection independently.
// - Refuse readings for meters that do not exist.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::modules::smart_meters::core::meter::{Meter, NewReading, Reading};
use crate::modules::smart_meters::core::ports::{MeterStore, MeterStoreError};
use crate::modules::smart_meters::core::seed::{generate_readings, seed_meters};

#[derive(Default)]
pub struct InMemoryMeterStore {
    meters: RwLock<BTreeMap<i64, Meter>>,
    readings: RwLock<Vec<Reading>>,
    is_offline: bool,
}

impl InMemoryMeterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub fn with_meter(mut self, meter: Meter) -> Self {
        self.meters.get_mut().insert(meter.id, meter);
        self
    }

    /// Panics if the meter has not been added first.
    pub fn with_reading(mut self, meter_id: i64, kwh: f64, timestamp: DateTime<Utc>) -> Self {
        assert!(
            self.meters.get_mut().contains_key(&meter_id),
            "reading references unknown meter {meter_id}"
        );
        let readings = self.readings.get_mut();
        let id = readings.len() as i64 + 1;
        readings.push(Reading {
            id,
            meter_id,
            kwh,
            timestamp,
        });
        self
    }

    pub async fn readings_for(&self, meter_id: i64) -> Vec<Reading> {
        self.readings
            .read()
            .await
            .iter()
            .filter(|r| r.meter_id == meter_id)
            .cloned()
            .collect()
    }

    pub async fn reading_count(&self) -> usize {
        self.readings.read().await.len()
    }

    fn ensure_online(&self) -> Result<(), MeterStoreError> {
        if self.is_offline {
            return Err(MeterStoreError::Unavailable("Meter store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MeterStore for InMemoryMeterStore {
    async fn initialize(&self) -> Result<(), MeterStoreError> {
        self.ensure_online()?;

        {
            let mut meters = self.meters.write().await;
            if meters.is_empty() {
                info!("seeding meters");
                for meter in seed_meters() {
                    meters.insert(meter.id, meter);
                }
            } else {
                info!("meter table already seeded");
            }
        }

        let meter_ids: Vec<i64> = self.meters.read().await.keys().copied().collect();
        let mut readings = self.readings.write().await;
        if readings.is_empty() {
            info!(meters = meter_ids.len(), "seeding meter readings");
            let generated = generate_readings(&mut rand::thread_rng(), &meter_ids, Utc::now());
            readings.extend(generated.into_iter().enumerate().map(
                |(index, NewReading { meter_id, kwh, timestamp })| Reading {
                    id: index as i64 + 1,
                    meter_id,
                    kwh,
                    timestamp,
                },
            ));
        } else {
            info!("meter readings already exist");
        }
        Ok(())
    }

    async fn find_meter(&self, meter_id: i64) -> Result<Option<Meter>, MeterStoreError> {
        self.ensure_online()?;
        Ok(self.meters.read().await.get(&meter_id).cloned())
    }

    async fn sum_usage(&self, meter_id: i64) -> Result<f64, MeterStoreError> {
        self.ensure_online()?;
        Ok(self
            .readings
            .read()
            .await
            .iter()
            .filter(|r| r.meter_id == meter_id)
            .map(|r| r.kwh)
            .sum())
    }

    async fn list_meters(&self) -> Result<Vec<Meter>, MeterStoreError> {
        self.ensure_online()?;
        Ok(self.meters.read().await.values().cloned().collect())
    }
}
