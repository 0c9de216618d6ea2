use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Whole currency units. Prices and budgets are never fractional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);
    pub const MAX: Money = Money(i64::MAX);

    /// Multiply by a unit count (nights, stars, units). Saturates at [`Money::MAX`].
    pub fn times(self, factor: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(factor)))
    }

    pub fn checked_times(self, factor: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(factor)).map(Self)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Apply a discount expressed in basis points (1000 = 10%).
    pub fn discounted_by_bps(self, bps: u32) -> Self {
        let kept = 10_000 - i128::from(bps.min(10_000));
        // Never larger in magnitude than `self`, so the narrowing always fits
        let discounted = i128::from(self.0) * kept / 10_000;
        Self(i64::try_from(discounted).unwrap_or(i64::MAX))
    }

    /// How many whole times `unit` fits into this amount. Zero for a non-positive unit.
    pub fn whole_multiples_of(self, unit: Money) -> u32 {
        if unit.0 <= 0 || self.0 < unit.0 {
            return 0;
        }
        u32::try_from(self.0 / unit.0).unwrap_or(u32::MAX)
    }
}

/// Sum a series of amounts, `None` on overflow.
pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
    amounts
        .into_iter()
        .try_fold(Money::ZERO, |total, amount| total.checked_add(amount))
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            write!(f, "-${}", grouped)
        } else {
            write!(f, "${}", grouped)
        }
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}
