pub mod cost;
pub mod power;
pub mod rate;
pub mod time;

use std::{
    fmt::Formatter,
    ops::{Div, Mul},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de::Visitor};

/// Decimal quantity tagged with its dimensions.
///
/// Serialized as a bare decimal: a string on output, a string or a number on input.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[must_use]
pub struct Quantity<const POWER: isize, const TIME: isize, const COST: isize>(pub Decimal);

impl<const POWER: isize, const TIME: isize, const COST: isize> Quantity<POWER, TIME, COST> {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[must_use]
    pub fn is_sign_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl<const POWER: isize, const TIME: isize, const COST: isize> Mul<Decimal>
    for Quantity<POWER, TIME, COST>
{
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl<const POWER: isize, const TIME: isize, const COST: isize> Div<Decimal>
    for Quantity<POWER, TIME, COST>
{
    type Output = Self;

    fn div(self, rhs: Decimal) -> Self::Output {
        Self(self.0 / rhs)
    }
}

/// Deserialize a decimal from a string or an integer.
///
/// Floats are refused: formats like TOML hand them over as `f64`, which has already lost the scale.
pub fn deserialize_exact<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<Decimal>,
{
    struct ExactVisitor;

    impl Visitor<'_> for ExactVisitor {
        type Value = Decimal;

        fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
            formatter.write_str("a decimal as a quoted string, or an integer")
        }

        fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Decimal::from(value))
        }

        fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Decimal::from(value))
        }

        fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(ExactVisitor).map(T::from)
}

#[cfg(test)]
mod tests {
    use std::fmt::{Debug, Formatter};

    use rust_decimal::dec;

    use super::*;

    pub type Bare = Quantity<0, 0, 0>;

    impl Debug for Bare {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }

    #[test]
    fn test_sum() {
        let total: Bare = [dec!(1.5), dec!(2.25), dec!(3)].into_iter().map(Bare::from).sum();
        assert_eq!(total, Bare::from(dec!(6.75)));
    }

    #[test]
    fn test_scaling() {
        assert_eq!(Bare::from(dec!(2.5)) * dec!(4), Bare::from(dec!(10)));
        assert_eq!(Bare::from(dec!(10)) / dec!(4), Bare::from(dec!(2.5)));
    }

    #[test]
    fn test_is_sign_negative() {
        assert!(Bare::from(dec!(-0.1)).is_sign_negative());
        assert!(!Bare::ZERO.is_sign_negative());
        assert!(!Bare::from(-Decimal::ZERO).is_sign_negative());
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() -> anyhow::Result<()> {
        assert_eq!(serde_json::from_str::<Bare>("10")?, Bare::from(dec!(10)));
        assert_eq!(serde_json::from_str::<Bare>("\"0.125\"")?, Bare::from(dec!(0.125)));
        assert_eq!(serde_json::to_string(&Bare::from(dec!(3600)))?, "\"3600\"");
        Ok(())
    }
}
