// Meter query handler derives the externally visible facts about a meter.
//
// Responsibilities
// - Read the meter and its aggregated usage from the store, then apply the billing and
//   status rules from core.
// - Turn a missing meter into sentinel values. Storage faults pass through untouched.
// - Hold no state between calls.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::modules::smart_meters::core::billing::compute_bill;
use crate::modules::smart_meters::core::ports::{MeterStore, MeterStoreError};
use crate::modules::smart_meters::core::status::{MeterStatus, classify};

pub const UNKNOWN_METER_NAME: &str = "Unknown";
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Storage(#[from] MeterStoreError),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MeterInfo {
    pub name: String,
    pub status: MeterStatus,
}

impl MeterInfo {
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_METER_NAME.to_string(),
            status: MeterStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MeterSummary {
    pub meter_id: i64,
    pub name: String,
    pub usage: f64,
    pub bill: i64,
    pub status: MeterStatus,
}

pub struct MeterQueryHandler<TStore>
where
    TStore: MeterStore + ?Sized,
{
    store: Arc<TStore>,
}

impl<TStore> MeterQueryHandler<TStore>
where
    TStore: MeterStore + ?Sized,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn get_meter_info(&self, meter_id: i64) -> Result<MeterInfo, QueryError> {
        debug!(meter_id, "get_meter_info");
        let Some(meter) = self.store.find_meter(meter_id).await? else {
            return Ok(MeterInfo::unknown());
        };
        let usage = self.store.sum_usage(meter_id).await?;
        Ok(MeterInfo {
            name: meter.name,
            status: classify(Some(usage)),
        })
    }

    pub async fn get_usage(&self, meter_id: i64) -> Result<f64, QueryError> {
        debug!(meter_id, "get_usage");
        Ok(self.store.sum_usage(meter_id).await?)
    }

    pub async fn get_bill(&self, meter_id: i64) -> Result<i64, QueryError> {
        debug!(meter_id, "get_bill");
        let usage = self.store.sum_usage(meter_id).await?;
        Ok(compute_bill(usage))
    }

    pub async fn get_status(&self, meter_id: i64) -> Result<MeterStatus, QueryError> {
        debug!(meter_id, "get_status");
        if self.store.find_meter(meter_id).await?.is_none() {
            return Ok(MeterStatus::Unknown);
        }
        let usage = self.store.sum_usage(meter_id).await?;
        Ok(classify(Some(usage)))
    }

    pub async fn get_customer_info(&self, meter_id: i64) -> Result<String, QueryError> {
        debug!(meter_id, "get_customer_info");
        Ok(self
            .store
            .find_meter(meter_id)
            .await?
            .map(|meter| meter.name)
            .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string()))
    }

    pub async fn list_meter_summaries(&self) -> Result<Vec<MeterSummary>, QueryError> {
        let meters = self.store.list_meters().await?;
        let mut summaries = Vec::with_capacity(meters.len());
        for meter in meters {
            let usage = self.store.sum_usage(meter.id).await?;
            summaries.push(MeterSummary {
                meter_id: meter.id,
                name: meter.name,
                usage,
                bill: compute_bill(usage),
                status: classify(Some(usage)),
            });
        }
        Ok(summaries)
    }
}
