use itertools::{Itertools, MinMaxResult};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::{
    core::{plan::PricePlan, reading::Reading},
    prelude::*,
    quantity::{cost::Cost, power::Kilowatts, time::Hours},
};

const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum CostError {
    #[error("cannot estimate the cost of an empty reading series")]
    EmptySeries,

    #[error("the readings span no time, so the hourly average is undefined")]
    UndefinedComputation,

    #[error("decimal overflow while estimating the cost")]
    Overflow,
}

/// Plan-independent part of the cost estimation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Usage {
    /// Mean of the reading values, rounded half-up to the scale of their sum.
    pub average: Kilowatts,

    /// Time between the earliest and the latest reading.
    pub elapsed: Hours,
}

impl Usage {
    pub fn try_estimate(readings: &[Reading]) -> Result<Self, CostError> {
        let (first, last) = match readings.iter().minmax_by_key(|reading| reading.timestamp) {
            MinMaxResult::NoElements => return Err(CostError::EmptySeries),
            MinMaxResult::OneElement(reading) => (reading, reading),
            MinMaxResult::MinMax(first, last) => (first, last),
        };
        let sum = readings
            .iter()
            .try_fold(Decimal::ZERO, |sum, reading| sum.checked_add(reading.value.0))
            .ok_or(CostError::Overflow)?;
        let average =
            divide_half_up(sum, Decimal::from(readings.len())).ok_or(CostError::Overflow)?;
        let elapsed = Hours::from_whole_seconds(last.timestamp - first.timestamp);
        Ok(Self { average: Kilowatts::from(average), elapsed })
    }

    /// Average reading normalized by the elapsed hours,
    /// rounded half-up to the scale of the average.
    pub fn hourly_average(self) -> Result<HourlyAverage, CostError> {
        if self.elapsed.0.is_zero() {
            return Err(CostError::UndefinedComputation);
        }
        divide_half_up(self.average.0, self.elapsed.0)
            .map(HourlyAverage)
            .ok_or(CostError::Overflow)
    }
}

/// Average reading per elapsed hour, the only input of the cost besides the plan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct HourlyAverage(pub Decimal);

impl HourlyAverage {
    /// Apply the plan's flat unit rate.
    ///
    /// Peak multipliers are not taken into account here, see [`PricePlan::price_at`].
    pub fn cost(self, plan: &PricePlan) -> Result<Cost, CostError> {
        self.0.checked_mul(plan.unit_rate.0).map(Cost::from).ok_or(CostError::Overflow)
    }
}

/// Divide keeping the scale of the dividend, rounding half-up.
///
/// Returns `None` when the quotient does not fit or cannot carry the dividend's scale
/// within the 96-bit mantissa, which is where [`Decimal::rescale`] would silently drop digits.
fn divide_half_up(dividend: Decimal, divisor: Decimal) -> Option<Decimal> {
    let scale = dividend.scale();
    let mut quotient = dividend.checked_div(divisor)?.round_dp_with_strategy(scale, ROUNDING);
    quotient.rescale(scale);
    (quotient.scale() == scale).then_some(quotient)
}

/// Estimate the consumption cost of the reading series on the plan.
#[instrument(skip_all, fields(plan = %plan.name, n_readings = readings.len()))]
pub fn cost(readings: &[Reading], plan: &PricePlan) -> Result<Cost, CostError> {
    let cost = Usage::try_estimate(readings)?.hourly_average()?.cost(plan)?;
    trace!(%cost, "estimated");
    Ok(cost)
}
