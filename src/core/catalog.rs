use std::collections::HashSet;

use thiserror::Error;

use crate::core::plan::PricePlan;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("the catalog has no price plans")]
    Empty,

    #[error("duplicate price plan name `{0}`")]
    DuplicateName(String),

    #[error("price plan `{name}` must have a positive unit rate, got {unit_rate}")]
    NonPositiveRate { name: String, unit_rate: String },

    #[error("price plan `{name}` has more than one multiplier for {day_of_week}")]
    DuplicateMultiplier { name: String, day_of_week: chrono::Weekday },

    #[error("meter `{meter_id}` refers to unknown price plan `{plan_id}`")]
    UnknownPlan { meter_id: String, plan_id: String },
}

/// Immutable, validated set of price plans.
///
/// Iteration follows the definition order, which is also the tie-breaking order for the ranking.
#[derive(Clone, Debug)]
#[must_use]
pub struct PricePlanCatalog(Vec<PricePlan>);

impl PricePlanCatalog {
    pub fn try_new(plans: Vec<PricePlan>) -> Result<Self, CatalogError> {
        if plans.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut names = HashSet::with_capacity(plans.len());
        for plan in &plans {
            if !names.insert(plan.name.as_str()) {
                return Err(CatalogError::DuplicateName(plan.name.clone()));
            }
            if plan.unit_rate.0.is_sign_negative() || plan.unit_rate.0.is_zero() {
                return Err(CatalogError::NonPositiveRate {
                    name: plan.name.clone(),
                    unit_rate: plan.unit_rate.0.to_string(),
                });
            }
            let mut weekdays = HashSet::with_capacity(plan.peak_multipliers.len());
            for peak in &plan.peak_multipliers {
                if !weekdays.insert(peak.day_of_week) {
                    return Err(CatalogError::DuplicateMultiplier {
                        name: plan.name.clone(),
                        day_of_week: peak.day_of_week,
                    });
                }
            }
        }
        Ok(Self(plans))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricePlan> {
        self.0.iter()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PricePlan> {
        self.0.iter().find(|plan| plan.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
