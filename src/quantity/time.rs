use std::fmt::{Debug, Display, Formatter};

use chrono::TimeDelta;
use rust_decimal::Decimal;

use crate::quantity::Quantity;

pub type Hours = Quantity<0, 1, 0>;

impl Hours {
    const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

    /// Convert the time delta into hours, ignoring the sub-second part.
    pub fn from_whole_seconds(delta: TimeDelta) -> Self {
        Self(Decimal::from(delta.num_seconds()) / Self::SECONDS_PER_HOUR)
    }
}

impl Display for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} h", self.0)
    }
}

impl Debug for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_from_whole_seconds() {
        assert_eq!(Hours::from_whole_seconds(TimeDelta::minutes(90)), Hours::from(dec!(1.5)));
        assert_eq!(Hours::from_whole_seconds(TimeDelta::milliseconds(999)), Hours::ZERO);
        assert_eq!(Hours::from_whole_seconds(TimeDelta::seconds(36)), Hours::from(dec!(0.01)));
    }
}
