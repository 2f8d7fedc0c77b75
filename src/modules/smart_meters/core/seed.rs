// Seed data for an empty meter store.
//
// Purpose
// - The fixed meter roster and the synthetic reading generator used by `initialize`.
//
// Responsibilities
// - One reading per day going back from `now`, `READINGS_PER_METER` per meter.
// - Usage drawn uniformly from [MIN_SEED_KWH, MAX_SEED_KWH] and rounded to two decimals.
//
// Boundaries
// - No input or output. The random source is passed in so tests can seed it.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::modules::smart_meters::core::meter::{Meter, NewReading};

pub const READINGS_PER_METER: i64 = 30;
pub const MIN_SEED_KWH: f64 = 5.0;
pub const MAX_SEED_KWH: f64 = 25.0;

pub fn seed_meters() -> Vec<Meter> {
    vec![
        Meter::new(101, "Ravi Kumar", "OK"),
        Meter::new(102, "Asha Singh", "High Usage"),
        Meter::new(103, "Mohit Verma", "OK"),
    ]
}

pub fn generate_readings<R: Rng>(
    rng: &mut R,
    meter_ids: &[i64],
    now: DateTime<Utc>,
) -> Vec<NewReading> {
    let mut readings = Vec::with_capacity(meter_ids.len() * READINGS_PER_METER as usize);
    for &meter_id in meter_ids {
        for day in 0..READINGS_PER_METER {
            let kwh = rng.gen_range(MIN_SEED_KWH..=MAX_SEED_KWH);
            readings.push(NewReading {
                meter_id,
                kwh: (kwh * 100.0).round() / 100.0,
                timestamp: now - Duration::days(day),
            });
        }
    }
    readings
}
