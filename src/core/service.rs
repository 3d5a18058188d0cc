use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::{
    core::{
        accounts::Accounts,
        calculator::CostError,
        catalog::PricePlanCatalog,
        comparison::{Comparator, CostResult, Recommendation},
        reading::Reading,
        store::ReadingStore,
    },
    prelude::*,
};

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("missing smart meter ID")]
    MissingMeterId,

    #[error("missing electricity readings")]
    MissingReadings,
}

/// Comparison across all plans, annotated with the plan the meter's account is on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[must_use]
pub struct Comparison {
    #[serde(rename = "pricePlanComparisons")]
    pub costs: CostResult,

    #[serde(rename = "pricePlanId")]
    pub price_plan_id: Option<String>,
}

/// Operations exposed to the outer layers.
#[must_use]
pub struct EnergyService {
    store: Arc<ReadingStore>,
    catalog: Arc<PricePlanCatalog>,
    accounts: Arc<Accounts>,
    comparator: Comparator,
}

impl EnergyService {
    pub fn new(
        store: Arc<ReadingStore>,
        catalog: Arc<PricePlanCatalog>,
        accounts: Arc<Accounts>,
    ) -> Self {
        let comparator = Comparator::new(Arc::clone(&catalog), Arc::clone(&store));
        Self { store, catalog, accounts, comparator }
    }

    pub fn catalog(&self) -> &PricePlanCatalog {
        &self.catalog
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    /// Validate and append the batch.
    ///
    /// The meter ID must be non-blank and the batch must contain at least one reading.
    #[instrument(skip_all, fields(meter_id = ?meter_id))]
    pub fn store_readings(
        &self,
        meter_id: Option<&str>,
        readings: Option<Vec<Reading>>,
    ) -> Result<(), InvalidInput> {
        let meter_id = meter_id
            .filter(|meter_id| !meter_id.trim().is_empty())
            .ok_or(InvalidInput::MissingMeterId)?;
        let readings =
            readings.filter(|readings| !readings.is_empty()).ok_or(InvalidInput::MissingReadings)?;
        info!(n_readings = readings.len(), "storing");
        self.store.append(meter_id, readings);
        Ok(())
    }

    #[must_use]
    pub fn get_readings(&self, meter_id: &str) -> Option<Vec<Reading>> {
        self.store.get(meter_id)
    }

    pub fn compare_all(&self, meter_id: &str) -> Result<Option<Comparison>, CostError> {
        Ok(self.comparator.compare_all(meter_id)?.map(|costs| Comparison {
            costs,
            price_plan_id: self.accounts.price_plan_id(meter_id).map(ToOwned::to_owned),
        }))
    }

    pub fn recommend(
        &self,
        meter_id: &str,
        limit: Option<i64>,
    ) -> Result<Option<Vec<Recommendation>>, CostError> {
        self.comparator.recommend(meter_id, limit)
    }
}

#[cfg(test)]
pub mod tests {
    use std::collections::HashMap;

    use chrono::{DateTime, TimeDelta, Utc};
    use rust_decimal::{Decimal, dec};

    use super::*;
    use crate::{
        config::Config,
        quantity::{cost::Cost, power::Kilowatts},
    };

    pub fn service() -> EnergyService {
        let (catalog, accounts) = Config::builtin().unwrap().into_parts().unwrap();
        EnergyService::new(Arc::new(ReadingStore::new()), Arc::new(catalog), Arc::new(accounts))
    }

    pub fn reference_readings() -> Vec<Reading> {
        let start: DateTime<Utc> = "2024-04-26T00:00:10Z".parse().unwrap();
        (0..3)
            .map(|i| {
                Reading::new(
                    start + TimeDelta::seconds(10 * i),
                    Kilowatts::from(Decimal::from(10 * (i + 1))),
                )
            })
            .collect()
    }

    #[test]
    fn test_rejects_missing_meter_id() {
        let service = service();
        assert_eq!(
            service.store_readings(None, Some(reference_readings())),
            Err(InvalidInput::MissingMeterId),
        );
        assert_eq!(
            service.store_readings(Some("  "), Some(reference_readings())),
            Err(InvalidInput::MissingMeterId),
        );
        assert_eq!(
            service.store_readings(None, Some(Vec::new())),
            Err(InvalidInput::MissingMeterId),
        );
    }

    #[test]
    fn test_rejects_missing_readings() {
        let service = service();
        service.store_readings(Some("10101010"), Some(reference_readings())).unwrap();
        assert_eq!(
            service.store_readings(Some("10101010"), Some(Vec::new())),
            Err(InvalidInput::MissingReadings),
        );
        assert_eq!(
            service.store_readings(Some("10101010"), None),
            Err(InvalidInput::MissingReadings),
        );
        assert_eq!(service.get_readings("10101010").map(|readings| readings.len()), Some(3));
    }

    #[test]
    fn test_rejected_batch_does_not_create_meter() {
        let service = service();
        let _ = service.store_readings(Some("10101010"), Some(Vec::new()));
        assert_eq!(service.get_readings("10101010"), None);
    }

    #[test]
    fn test_compare_all_annotates_account() -> Result {
        let service = service();
        service.store_readings(Some("smart-meter-1"), Some(reference_readings()))?;
        service.store_readings(Some("bob"), Some(reference_readings()))?;

        let comparison = service.compare_all("smart-meter-1")?.context("no comparison")?;
        assert_eq!(comparison.price_plan_id.as_deref(), Some("price-plan-1"));
        assert_eq!(
            comparison.costs,
            HashMap::from([
                ("price-plan-0".to_owned(), Cost::from(dec!(36000))),
                ("price-plan-1".to_owned(), Cost::from(dec!(7200))),
                ("price-plan-2".to_owned(), Cost::from(dec!(3600))),
            ]),
        );

        let comparison = service.compare_all("bob")?.context("no comparison")?;
        assert_eq!(comparison.price_plan_id, None);
        Ok(())
    }

    #[test]
    fn test_unknown_meter_is_not_found() -> Result {
        let service = service();
        assert_eq!(service.get_readings("alice"), None);
        assert_eq!(service.compare_all("alice")?, None);
        assert_eq!(service.recommend("alice", Some(1))?, None);
        Ok(())
    }
}
