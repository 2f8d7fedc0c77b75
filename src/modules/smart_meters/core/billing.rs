// Pure billing rule.
//
// - A bill is usage multiplied by a fixed per-kWh rate, truncated to whole currency units.
// - Never performs input or output.

/// Currency units charged per kWh.
pub const RATE_PER_KWH: f64 = 7.0;

pub fn compute_bill(usage_kwh: f64) -> i64 {
    (usage_kwh * RATE_PER_KWH).floor() as i64
}
