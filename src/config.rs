use std::{collections::HashMap, path::Path};

use serde::Deserialize;

use crate::{
    core::{
        accounts::Accounts,
        catalog::{CatalogError, PricePlanCatalog},
        plan::PricePlan,
    },
    prelude::*,
};

const BUILTIN: &str = include_str!("../catalog.toml");

/// Price plan catalog and account document.
#[derive(Deserialize)]
#[must_use]
pub struct Config {
    pub price_plans: Vec<PricePlan>,

    /// Meter ID to the plan name.
    #[serde(default)]
    pub accounts: HashMap<String, String>,
}

impl Config {
    pub fn builtin() -> Result<Self> {
        toml::from_str(BUILTIN).context("failed to parse the built-in catalog")
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse `{}`", path.display()))
    }

    /// Read the file when given, fall back to the built-in catalog otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::read_from(path)?,
            None => Self::builtin()?,
        };
        info!(
            n_plans = config.price_plans.len(),
            n_accounts = config.accounts.len(),
            "loaded the catalog",
        );
        Ok(config)
    }

    pub fn into_parts(self) -> Result<(PricePlanCatalog, Accounts), CatalogError> {
        let catalog = PricePlanCatalog::try_new(self.price_plans)?;
        let accounts = Accounts::try_new(self.accounts, &catalog)?;
        Ok((catalog, accounts))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;
    use rust_decimal::dec;

    use super::*;
    use crate::{core::plan::PeakTimeMultiplier, quantity::rate::KilowattHourRate};

    #[test]
    fn test_builtin() -> Result {
        let (catalog, accounts) = Config::builtin()?.into_parts()?;
        let rates: Vec<_> =
            catalog.iter().map(|plan| (plan.name.as_str(), plan.unit_rate)).collect();
        assert_eq!(
            rates,
            [
                ("price-plan-0", KilowattHourRate::from(dec!(10))),
                ("price-plan-1", KilowattHourRate::from(dec!(2))),
                ("price-plan-2", KilowattHourRate::from(dec!(1))),
            ],
        );
        assert_eq!(accounts.len(), 5);
        assert_eq!(accounts.price_plan_id("smart-meter-3"), Some("price-plan-2"));
        Ok(())
    }

    #[test]
    fn test_peak_multipliers() -> Result {
        let config: Config = toml::from_str(
            r#"
                [[price_plans]]
                name = "weekend"
                supplier = "Supplier"
                unit_rate = "0.21"

                [[price_plans.peak_multipliers]]
                day_of_week = "Sat"
                multiplier = "1.5"

                [[price_plans.peak_multipliers]]
                day_of_week = "Sunday"
                multiplier = 2
            "#,
        )?;
        let (catalog, accounts) = config.into_parts()?;
        assert!(accounts.is_empty());
        let plan = catalog.get("weekend").context("missing plan")?;
        assert_eq!(plan.unit_rate, KilowattHourRate::from(dec!(0.21)));
        assert_eq!(
            plan.peak_multipliers,
            [
                PeakTimeMultiplier::new(Weekday::Sat, dec!(1.5)),
                PeakTimeMultiplier::new(Weekday::Sun, dec!(2)),
            ],
        );
        Ok(())
    }

    #[test]
    fn test_bare_float_is_refused() {
        let rate = toml::from_str::<Config>(
            r#"
                [[price_plans]]
                name = "lossy"
                supplier = "Supplier"
                unit_rate = 0.21
            "#,
        );
        assert!(rate.is_err());

        let multiplier = toml::from_str::<Config>(
            r#"
                [[price_plans]]
                name = "lossy"
                supplier = "Supplier"
                unit_rate = "0.21"

                [[price_plans.peak_multipliers]]
                day_of_week = "Mon"
                multiplier = 1.10
            "#,
        );
        assert!(multiplier.is_err());
    }

    #[test]
    fn test_quoted_rate_keeps_scale() -> Result {
        let config: Config = toml::from_str(
            r#"
                [[price_plans]]
                name = "exact"
                supplier = "Supplier"
                unit_rate = "0.2100"
            "#,
        )?;
        assert_eq!(config.price_plans[0].unit_rate.0.scale(), 4);
        Ok(())
    }

    #[test]
    fn test_unknown_account_plan() -> Result {
        let config: Config = toml::from_str(
            r#"
                [[price_plans]]
                name = "only"
                supplier = "Supplier"
                unit_rate = "1"

                [accounts]
                smart-meter-0 = "missing"
            "#,
        )?;
        assert!(matches!(config.into_parts(), Err(CatalogError::UnknownPlan { .. })));
        Ok(())
    }
}
