use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use crate::{core::reading::Reading, prelude::*};

type Series = Arc<RwLock<Vec<Reading>>>;

/// In-memory reading series keyed by meter ID.
///
/// The outer lock only guards the key set. Each series has its own lock: appends to different
/// meters do not contend, and an append and a read on the same meter never interleave.
#[derive(Default)]
#[must_use]
pub struct ReadingStore(RwLock<HashMap<String, Series>>);

impl ReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the meter's series in storage order, or `None` for an unknown meter.
    #[must_use]
    pub fn get(&self, meter_id: &str) -> Option<Vec<Reading>> {
        let series = self.0.read().get(meter_id).cloned()?;
        let snapshot = series.read().clone();
        Some(snapshot)
    }

    /// Append the readings to the meter's series, creating the series when absent.
    ///
    /// Readings are kept verbatim: no sorting and no deduplication.
    #[instrument(skip_all, fields(meter_id = meter_id, n_readings = readings.len()))]
    pub fn append(&self, meter_id: &str, readings: Vec<Reading>) {
        let series = self.series_or_insert(meter_id);
        let mut series = series.write();
        series.extend(readings);
        debug!(n_total = series.len(), "appended");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    fn series_or_insert(&self, meter_id: &str) -> Series {
        if let Some(series) = self.0.read().get(meter_id) {
            return Arc::clone(series);
        }
        Arc::clone(self.0.write().entry(meter_id.to_owned()).or_default())
    }
}
