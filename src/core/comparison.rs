use std::{collections::HashMap, sync::Arc};

use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{
        calculator::{CostError, Usage},
        catalog::PricePlanCatalog,
        store::ReadingStore,
    },
    prelude::*,
    quantity::cost::Cost,
};

/// Plan name to the estimated cost. Recomputed on every request.
pub type CostResult = HashMap<String, Cost>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[must_use]
pub struct Recommendation {
    pub plan_name: String,
    pub cost: Cost,
}

/// Runs the cost estimation across the whole catalog.
#[must_use]
pub struct Comparator {
    catalog: Arc<PricePlanCatalog>,
    store: Arc<ReadingStore>,
}

impl Comparator {
    pub const fn new(catalog: Arc<PricePlanCatalog>, store: Arc<ReadingStore>) -> Self {
        Self { catalog, store }
    }

    /// Cost of the meter's readings on every plan, or `None` when the meter has no readings.
    #[instrument(skip_all, fields(meter_id = meter_id))]
    pub fn compare_all(&self, meter_id: &str) -> Result<Option<CostResult>, CostError> {
        Ok(self.costs(meter_id)?.map(|costs| costs.into_iter().collect()))
    }

    /// Plans ranked from the cheapest, at most `limit` of them.
    ///
    /// No limit means all plans, and a non-positive limit means none.
    /// Plans with equal costs keep their catalog order.
    #[instrument(skip_all, fields(meter_id = meter_id, limit = ?limit))]
    pub fn recommend(
        &self,
        meter_id: &str,
        limit: Option<i64>,
    ) -> Result<Option<Vec<Recommendation>>, CostError> {
        Ok(self.costs(meter_id)?.map(|costs| rank(costs, limit)))
    }

    /// Costs in catalog order.
    fn costs(&self, meter_id: &str) -> Result<Option<Vec<(String, Cost)>>, CostError> {
        let Some(readings) = self.store.get(meter_id).filter(|readings| !readings.is_empty())
        else {
            debug!("no readings");
            return Ok(None);
        };

        // The hourly average does not depend on the plan, so failing it fails the whole comparison:
        let usage = Usage::try_estimate(&readings)?;
        debug!(average = %usage.average, elapsed = %usage.elapsed, "estimated usage");
        let hourly_average = usage.hourly_average().inspect_err(|error| {
            warn!(n_readings = readings.len(), "cannot compare: {error}");
        })?;

        let costs = self
            .catalog
            .iter()
            .map(|plan| Ok((plan.name.clone(), hourly_average.cost(plan)?)))
            .collect::<Result<Vec<_>, CostError>>()?;
        info!(n_plans = costs.len(), "compared");
        Ok(Some(costs))
    }
}

/// Stable ascending sort by cost, truncated to the limit.
fn rank(costs: Vec<(String, Cost)>, limit: Option<i64>) -> Vec<Recommendation> {
    let limit = limit.map_or(costs.len(), |limit| usize::try_from(limit).unwrap_or(0));
    costs
        .into_iter()
        .sorted_by_key(|(_, cost)| *cost)
        .take(limit)
        .map(|(plan_name, cost)| Recommendation { plan_name, cost })
        .collect()
}
