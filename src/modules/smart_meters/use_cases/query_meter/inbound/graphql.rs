// GraphQL query root over the meter query handler.
//
// Storage faults surface as GraphQL errors, never as sentinel values.

use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::smart_meters::use_cases::query_meter::handler::{MeterInfo, MeterSummary};
use crate::shell::state::AppState;

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlMeterInfo {
    pub name: String,
    pub status: String,
}

impl From<MeterInfo> for GqlMeterInfo {
    fn from(v: MeterInfo) -> Self {
        Self {
            name: v.name,
            status: v.status.to_string(),
        }
    }
}

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlMeterSummary {
    pub meter_id: i64,
    pub name: String,
    pub usage: f64,
    pub bill: i64,
    pub status: String,
}

impl From<MeterSummary> for GqlMeterSummary {
    fn from(v: MeterSummary) -> Self {
        Self {
            meter_id: v.meter_id,
            name: v.name,
            usage: v.usage,
            bill: v.bill,
            status: v.status.to_string(),
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn meter_info(&self, context: &Context<'_>, meter_id: i64) -> GqlResult<GqlMeterInfo> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.queries.get_meter_info(meter_id).await?.into())
    }

    async fn usage(&self, context: &Context<'_>, meter_id: i64) -> GqlResult<f64> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.queries.get_usage(meter_id).await?)
    }

    async fn bill(&self, context: &Context<'_>, meter_id: i64) -> GqlResult<i64> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.queries.get_bill(meter_id).await?)
    }

    async fn status(&self, context: &Context<'_>, meter_id: i64) -> GqlResult<String> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.queries.get_status(meter_id).await?.to_string())
    }

    async fn customer_info(&self, context: &Context<'_>, meter_id: i64) -> GqlResult<String> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.queries.get_customer_info(meter_id).await?)
    }

    async fn meters(&self, context: &Context<'_>) -> GqlResult<Vec<GqlMeterSummary>> {
        let state = context.data_unchecked::<AppState>();
        let list = state.queries.list_meter_summaries().await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}
