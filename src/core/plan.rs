use bon::Builder;
use chrono::{Datelike, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::quantity::{deserialize_exact, rate::KilowattHourRate};

/// Named tariff from a single supplier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[must_use]
pub struct PricePlan {
    #[builder(into)]
    pub name: String,

    #[builder(into)]
    pub supplier: String,

    /// Base price per kilowatt-hour.
    #[serde(deserialize_with = "deserialize_exact")]
    pub unit_rate: KilowattHourRate,

    #[serde(default)]
    #[builder(default)]
    pub peak_multipliers: Vec<PeakTimeMultiplier>,
}

impl PricePlan {
    /// Unit rate on the given day, with the weekday's peak multiplier applied when there is one.
    ///
    /// The first matching multiplier wins.
    pub fn price_at(&self, at: impl Datelike) -> KilowattHourRate {
        let weekday = at.weekday();
        self.peak_multipliers
            .iter()
            .find(|peak| peak.day_of_week == weekday)
            .map_or(self.unit_rate, |peak| self.unit_rate * peak.multiplier)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakTimeMultiplier {
    pub day_of_week: Weekday,

    #[serde(deserialize_with = "deserialize_exact")]
    pub multiplier: Decimal,
}

impl PeakTimeMultiplier {
    #[must_use]
    pub const fn new(day_of_week: Weekday, multiplier: Decimal) -> Self {
        Self { day_of_week, multiplier }
    }
}
