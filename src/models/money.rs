use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of fraction digits every amount is carried at.
pub const MONEY_SCALE: u32 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("amount {0} has sub-cent precision")]
    SubCent(Decimal),

    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),

    #[error("cannot parse '{0}' as an amount")]
    Parse(String),
}

/// A money amount held at exactly two fraction digits.
///
/// Arithmetic goes through whole cents so sums never drift; the `Decimal`
/// is only the carrier used for display and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    pub fn zero() -> Self {
        Self::from_cents(0)
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, MONEY_SCALE))
    }

    /// Converts an arbitrary decimal, refusing anything finer than a cent.
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyError> {
        if value.round_dp(MONEY_SCALE) != value {
            return Err(MoneyError::SubCent(value));
        }
        let cents = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|c| c.trunc().to_i64())
            .ok_or(MoneyError::OutOfRange(value))?;
        Ok(Self::from_cents(cents))
    }

    pub fn cents(&self) -> i64 {
        // always built through from_cents, so the mantissa is the cent count
        self.0.mantissa() as i64
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.cents() == 0
    }

    pub fn is_negative(&self) -> bool {
        self.cents() < 0
    }

    pub fn is_positive(&self) -> bool {
        self.cents() > 0
    }

    /// `None` when the sum leaves the `i64` cent range.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.cents().checked_add(rhs.cents()).map(Money::from_cents)
    }

    pub fn checked_mul(self, factor: i64) -> Option<Money> {
        self.cents().checked_mul(factor).map(Money::from_cents)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str_exact(s.trim()).map_err(|_| MoneyError::Parse(s.to_string()))?;
        Self::from_decimal(value)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Money> for Decimal {
    fn from(m: Money) -> Self {
        m.0
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money::from_cents(self.cents() + rhs.cents())
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money::from_cents(self.cents() - rhs.cents())
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money::from_cents(-self.cents())
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::from_decimal(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_two_fraction_digits() {
        assert_eq!(Money::from_cents(3000).to_string(), "30.00");
        assert_eq!(Money::from_cents(11250).to_string(), "112.50");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn from_decimal_normalizes_scale() {
        let m = Money::from_decimal(Decimal::new(1500, 0)).unwrap();
        assert_eq!(m.cents(), 150_000);
        assert_eq!(m.to_string(), "1500.00");

        let m = Money::from_decimal(Decimal::new(45050, 3)).unwrap();
        assert_eq!(m.cents(), 4505);
    }

    #[test]
    fn rejects_sub_cent_amounts() {
        let err = Money::from_decimal(Decimal::new(1001, 3)).unwrap_err();
        assert!(matches!(err, MoneyError::SubCent(_)));
        assert!("12.345".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn arithmetic_stays_in_cents() {
        let a: Money = "0.10".parse().unwrap();
        let b: Money = "0.20".parse().unwrap();
        assert_eq!((a + b).cents(), 30);
        assert_eq!((a - b).cents(), -10);
        let total: Money = vec![a, b, a].into_iter().sum();
        assert_eq!(total, Money::from_cents(40));
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_cents(3000)).unwrap();
        assert_eq!(json, "\"30.00\"");
        let back: Money = serde_json::from_str("\"30.00\"").unwrap();
        assert_eq!(back.cents(), 3000);
        let from_number: Money = serde_json::from_str("40").unwrap();
        assert_eq!(from_number.cents(), 4000);
        assert!(serde_json::from_str::<Money>("\"1.005\"").is_err());
    }

    #[test]
    fn checked_ops_detect_overflow() {
        let big = Money::from_cents(i64::MAX - 1);
        assert_eq!(big.checked_add(Money::from_cents(1)), Some(Money::from_cents(i64::MAX)));
        assert!(big.checked_add(Money::from_cents(2)).is_none());
        assert_eq!(Money::from_cents(4000).checked_mul(31), Some(Money::from_cents(124_000)));
        assert!(big.checked_mul(31).is_none());
    }
}
