use std::collections::HashMap;

use crate::core::catalog::{CatalogError, PricePlanCatalog};

/// Meter ID to the price plan the account is currently on.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct Accounts(HashMap<String, String>);

impl Accounts {
    /// Build the lookup, making sure that every account points to a plan from the catalog.
    pub fn try_new(
        accounts: HashMap<String, String>,
        catalog: &PricePlanCatalog,
    ) -> Result<Self, CatalogError> {
        if let Some((meter_id, plan_id)) =
            accounts.iter().find(|(_, plan_id)| !catalog.contains(plan_id))
        {
            return Err(CatalogError::UnknownPlan {
                meter_id: meter_id.clone(),
                plan_id: plan_id.clone(),
            });
        }
        Ok(Self(accounts))
    }

    #[must_use]
    pub fn price_plan_id(&self, meter_id: &str) -> Option<&str> {
        self.0.get(meter_id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
