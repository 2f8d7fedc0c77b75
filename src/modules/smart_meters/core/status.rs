// Usage-derived meter status.
//
// Purpose
// - Classify a meter from its total usage. The stored status label is never consulted.
//
// Boundaries
// - Pure. The caller decides whether the meter exists and passes `None` when it does not.

use std::fmt;

/// Usage strictly above this many kWh counts as high usage.
pub const HIGH_USAGE_THRESHOLD_KWH: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum MeterStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "High Usage")]
    HighUsage,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl MeterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeterStatus::Ok => "OK",
            MeterStatus::HighUsage => "High Usage",
            MeterStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MeterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `usage_kwh` is `None` for a meter that does not exist.
pub fn classify(usage_kwh: Option<f64>) -> MeterStatus {
    match usage_kwh {
        None => MeterStatus::Unknown,
        Some(usage) if usage > HIGH_USAGE_THRESHOLD_KWH => MeterStatus::HighUsage,
        Some(_) => MeterStatus::Ok,
    }
}

#[cfg(test)]
mod smart_meter_status_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(0.0), MeterStatus::Ok)]
    #[case(Some(399.99), MeterStatus::Ok)]
    #[case(Some(400.0), MeterStatus::Ok)]
    #[case(Some(400.01), MeterStatus::HighUsage)]
    #[case(Some(750.0), MeterStatus::HighUsage)]
    #[case(None, MeterStatus::Unknown)]
    fn it_should_classify_usage_against_the_threshold(
        #[case] usage: Option<f64>,
        #[case] expected: MeterStatus,
    ) {
        assert_eq!(classify(usage), expected);
    }

    #[rstest]
    fn it_should_serialize_to_the_wire_labels() {
        assert_eq!(serde_json::to_value(MeterStatus::Ok).unwrap(), "OK");
        assert_eq!(serde_json::to_value(MeterStatus::HighUsage).unwrap(), "High Usage");
        assert_eq!(serde_json::to_value(MeterStatus::Unknown).unwrap(), "Unknown");
        assert_eq!(MeterStatus::HighUsage.to_string(), "High Usage");
    }
}
