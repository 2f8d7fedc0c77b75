// Tool registry shared by every inbound transport.
//
// Purpose
// - Name the five read-only tools exactly as clients call them and dispatch a call to the
//   query handler.
//
// Responsibilities
// - Parse tool names and `{"meter_id": <integer>}` arguments.
// - Render results as JSON values with the wire shapes clients depend on.

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::modules::smart_meters::core::ports::MeterStore;
use crate::modules::smart_meters::use_cases::query_meter::handler::{MeterQueryHandler, QueryError};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Query(#[from] QueryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    GetMeterInfo,
    GetUsage,
    GetBill,
    GetStatus,
    GetCustomerInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolArguments {
    pub meter_id: i64,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::GetMeterInfo,
        Tool::GetUsage,
        Tool::GetBill,
        Tool::GetStatus,
        Tool::GetCustomerInfo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::GetMeterInfo => "get_meter_info",
            Tool::GetUsage => "get_usage",
            Tool::GetBill => "get_bill",
            Tool::GetStatus => "get_status",
            Tool::GetCustomerInfo => "get_customer_info",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::GetMeterInfo => "Customer name and usage-derived status of a smart meter.",
            Tool::GetUsage => "Total recorded usage of a smart meter in kWh.",
            Tool::GetBill => "Bill for a smart meter's total usage, in whole currency units.",
            Tool::GetStatus => "Usage status of a smart meter: OK, High Usage or Unknown.",
            Tool::GetCustomerInfo => "Name of the customer a smart meter belongs to.",
        }
    }

    pub fn from_name(name: &str) -> Result<Tool, ToolError> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    pub fn descriptor(&self) -> Value {
        json!({
            "name": self.name(),
            "description": self.description(),
            "inputSchema": {
                "type": "object",
                "properties": {
                    "meter_id": { "type": "integer", "description": "Meter identifier" }
                },
                "required": ["meter_id"]
            }
        })
    }
}

pub fn descriptors() -> Vec<Value> {
    Tool::ALL.iter().map(Tool::descriptor).collect()
}

pub fn parse_arguments(arguments: Value) -> Result<ToolArguments, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

pub async fn call_tool<TStore>(
    handler: &MeterQueryHandler<TStore>,
    tool: Tool,
    arguments: Value,
) -> Result<Value, ToolError>
where
    TStore: MeterStore + ?Sized,
{
    let ToolArguments { meter_id } = parse_arguments(arguments)?;
    let result = match tool {
        Tool::GetMeterInfo => json!(handler.get_meter_info(meter_id).await?),
        Tool::GetUsage => json!(handler.get_usage(meter_id).await?),
        Tool::GetBill => json!(handler.get_bill(meter_id).await?),
        Tool::GetStatus => json!(handler.get_status(meter_id).await?),
        Tool::GetCustomerInfo => json!(handler.get_customer_info(meter_id).await?),
    };
    Ok(result)
}

#[cfg(test)]
mod smart_meter_tools_tests {
    use super::*;
    use crate::modules::smart_meters::adapters::outbound::meter_store_in_memory::InMemoryMeterStore;
    use crate::tests::fixtures::meters::{fixed_now, ravi};
    use rstest::{fixture, rstest};
    use std::sync::Arc;

    #[fixture]
    fn handler() -> MeterQueryHandler<InMemoryMeterStore> {
        MeterQueryHandler::new(Arc::new(
            InMemoryMeterStore::new()
                .with_meter(ravi())
                .with_reading(101, 59.99, fixed_now()),
        ))
    }

    #[rstest]
    #[case("get_meter_info", Tool::GetMeterInfo)]
    #[case("get_usage", Tool::GetUsage)]
    #[case("get_bill", Tool::GetBill)]
    #[case("get_status", Tool::GetStatus)]
    #[case("get_customer_info", Tool::GetCustomerInfo)]
    fn it_should_parse_every_wire_name(#[case] name: &str, #[case] expected: Tool) {
        let tool = Tool::from_name(name).unwrap();
        assert_eq!(tool, expected);
        assert_eq!(tool.name(), name);
    }

    #[rstest]
    fn it_should_reject_an_unknown_tool_name() {
        assert!(matches!(
            Tool::from_name("set_bill"),
            Err(ToolError::UnknownTool(name)) if name == "set_bill"
        ));
    }

    #[rstest]
    fn it_should_describe_meter_id_as_a_required_integer() {
        let all = descriptors();
        assert_eq!(all.len(), 5);
        for descriptor in all {
            assert_eq!(descriptor["inputSchema"]["properties"]["meter_id"]["type"], "integer");
            assert_eq!(descriptor["inputSchema"]["required"], json!(["meter_id"]));
        }
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"meter_id": "101"}))]
    #[case(json!({"meter_id": 1.5}))]
    #[case(json!(null))]
    fn it_should_reject_malformed_arguments(#[case] arguments: Value) {
        assert!(matches!(
            parse_arguments(arguments),
            Err(ToolError::InvalidArguments(_))
        ));
    }

    #[rstest]
    #[case(Tool::GetMeterInfo, json!({"name": "Ravi Kumar", "status": "OK"}))]
    #[case(Tool::GetUsage, json!(59.99))]
    #[case(Tool::GetBill, json!(419))]
    #[case(Tool::GetStatus, json!("OK"))]
    #[case(Tool::GetCustomerInfo, json!("Ravi Kumar"))]
    #[tokio::test]
    async fn it_should_render_results_in_wire_shape(
        handler: MeterQueryHandler<InMemoryMeterStore>,
        #[case] tool: Tool,
        #[case] expected: Value,
    ) {
        let result = call_tool(&handler, tool, json!({"meter_id": 101})).await.unwrap();
        assert_eq!(result, expected);
    }

    #[rstest]
    #[case(Tool::GetMeterInfo, json!({"name": "Unknown", "status": "Unknown"}))]
    #[case(Tool::GetUsage, json!(0.0))]
    #[case(Tool::GetBill, json!(0))]
    #[case(Tool::GetStatus, json!("Unknown"))]
    #[case(Tool::GetCustomerInfo, json!("Unknown Customer"))]
    #[tokio::test]
    async fn it_should_render_sentinels_for_an_unknown_meter(
        handler: MeterQueryHandler<InMemoryMeterStore>,
        #[case] tool: Tool,
        #[case] expected: Value,
    ) {
        let result = call_tool(&handler, tool, json!({"meter_id": 999})).await.unwrap();
        assert_eq!(result, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_surface_storage_faults() {
        let mut store = InMemoryMeterStore::new();
        store.toggle_offline();
        let handler = MeterQueryHandler::new(Arc::new(store));
        let result = call_tool(&handler, Tool::GetUsage, json!({"meter_id": 101})).await;
        assert!(matches!(result, Err(ToolError::Query(_))));
    }
}
