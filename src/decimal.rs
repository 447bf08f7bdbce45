use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::errors::ValidationError;

/// decimal places kept on every money result
pub const MONEY_SCALE: u32 = 8;

/// signed money amount, currency is tracked by the owner of the value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(MONEY_SCALE))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(MONEY_SCALE)))
    }

    /// create from whole currency units
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor units (cents)
    pub fn from_minor(amount: i64, scale: u32) -> Self {
        Money(Decimal::new(amount, scale).round_dp(MONEY_SCALE))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// `self * pct / 100`
    pub fn percent(&self, pct: Percentage) -> Self {
        Money(self.0.saturating_mul(pct.as_fraction()).round_dp(MONEY_SCALE))
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0
            .checked_add(other.0)
            .map(|d| Money(d.round_dp(MONEY_SCALE)))
    }

    pub fn checked_mul(self, factor: Decimal) -> Option<Money> {
        self.0
            .checked_mul(factor)
            .map(|d| Money(d.round_dp(MONEY_SCALE)))
    }

    /// divide by a count, zero when the count is zero
    pub fn checked_div_count(&self, count: u64) -> Self {
        if count == 0 {
            return Money::ZERO;
        }
        Money((self.0 / Decimal::from(count)).round_dp(MONEY_SCALE))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0).round_dp(MONEY_SCALE))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = self.0.saturating_add(other.0).round_dp(MONEY_SCALE);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).round_dp(MONEY_SCALE))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = self.0.saturating_sub(other.0).round_dp(MONEY_SCALE);
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money(self.0.saturating_mul(other).round_dp(MONEY_SCALE))
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    /// zero divisor yields zero, overflow saturates
    fn div(self, other: Decimal) -> Money {
        if other.is_zero() {
            return Money::ZERO;
        }
        let quotient = self
            .0
            .checked_div(other)
            .unwrap_or_else(|| saturated(self.0, other));
        Money(quotient.round_dp(MONEY_SCALE))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + *x)
    }
}

/// percentage in percent units, `10` is ten percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Percentage(Decimal);

impl Percentage {
    pub const ZERO: Percentage = Percentage(Decimal::ZERO);
    pub const HUNDRED: Percentage = Percentage(Decimal::ONE_HUNDRED);

    /// create a percentage, rejecting anything outside `[0, 100]`
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(ValidationError::PercentageOutOfRange { value });
        }
        Ok(Percentage(value))
    }

    /// create without the range check, for values already known to be valid
    pub fn from_decimal_unchecked(value: Decimal) -> Self {
        Percentage(value)
    }

    pub fn from_whole(p: u32) -> Self {
        Percentage(Decimal::from(p))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// as a fraction, 10% -> 0.1
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// `numerator / divisor * 100`, zero when the divisor is zero and
/// saturated at the decimal bounds on overflow
pub fn ratio_percent(numerator: Decimal, divisor: Decimal) -> Decimal {
    if divisor.is_zero() {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(divisor)
        .map(|q| q.saturating_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| saturated(numerator, divisor))
        .round_dp(MONEY_SCALE)
}

fn saturated(numerator: Decimal, divisor: Decimal) -> Decimal {
    if numerator.is_sign_negative() == divisor.is_sign_negative() {
        Decimal::MAX
    } else {
        Decimal::MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_percent_of_amount() {
        let amount = Money::from_major(1_000);
        assert_eq!(amount.percent(Percentage::from_whole(10)), Money::from_major(100));
        assert_eq!(amount.percent(Percentage::ZERO), Money::ZERO);
        assert_eq!(amount.percent(Percentage::HUNDRED), amount);

        let cents = Money::from_minor(12_345, 2);
        assert_eq!(cents.percent(Percentage::from_whole(50)), Money::from_decimal(dec!(61.725)));
    }

    #[test]
    fn test_percentage_range() {
        assert!(Percentage::new(dec!(0)).is_ok());
        assert!(Percentage::new(dec!(100)).is_ok());
        assert!(Percentage::new(dec!(12.5)).is_ok());

        assert_eq!(
            Percentage::new(dec!(100.01)),
            Err(ValidationError::PercentageOutOfRange { value: dec!(100.01) })
        );
        assert!(Percentage::new(dec!(-1)).is_err());
    }

    #[test]
    fn test_guarded_division() {
        assert_eq!(ratio_percent(dec!(5), dec!(0)), Decimal::ZERO);
        assert_eq!(ratio_percent(dec!(0), dec!(0)), Decimal::ZERO);
        assert_eq!(ratio_percent(dec!(5), dec!(20)), dec!(25));

        assert_eq!(Money::from_major(900).checked_div_count(0), Money::ZERO);
        assert_eq!(Money::from_major(900).checked_div_count(3), Money::from_major(300));
    }

    #[test]
    fn test_overflow_saturates() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert_eq!(huge + huge, huge);
        assert_eq!(-huge - huge, -huge);
        assert_eq!(huge * dec!(3), huge);
        let half = huge.percent(Percentage::from_whole(50));
        assert!(half.is_positive() && half < huge);
        assert_eq!(huge.checked_add(Money::ONE), None);
        assert_eq!(huge.checked_mul(dec!(2)), None);
        assert_eq!(Money::from_major(12).checked_mul(dec!(0.5)), Some(Money::from_major(6)));

        let large = dec!(1000000000000000000000);
        assert_eq!(ratio_percent(large, dec!(0.00000001)), Decimal::MAX);
        assert_eq!(ratio_percent(-large, dec!(0.00000001)), Decimal::MIN);
        assert_eq!(Money::from_major(12) / Decimal::ZERO, Money::ZERO);
    }

    #[test]
    fn test_signed_balance() {
        let owed = -Money::from_major(1_200);
        assert!(owed.is_negative());
        assert!(!owed.is_positive());
        assert_eq!(owed.abs(), Money::from_major(1_200));
        assert_eq!(owed + Money::from_major(1_200), Money::ZERO);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![Money::from_major(1), Money::from_minor(50, 2), Money::from_major(2)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_minor(350, 2));
    }
}
