use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quantity::power::Kilowatts;

/// Single smart meter reading.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Reading {
    #[serde(rename = "time")]
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "reading")]
    pub value: Kilowatts,
}

impl Reading {
    pub const fn new(timestamp: DateTime<Utc>, value: Kilowatts) -> Self {
        Self { timestamp, value }
    }
}

/// Batch of readings as submitted by a meter.
///
/// Both fields are optional on the wire so that validation can tell «missing» from «malformed».
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterReadings {
    #[serde(default)]
    pub smart_meter_id: Option<String>,

    #[serde(default)]
    pub electricity_readings: Option<Vec<Reading>>,
}
