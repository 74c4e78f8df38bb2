use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

/// Monetary amount in integer minor currency units ("cents").
///
/// Non-negative by construction; arithmetic saturates rather than wrapping
/// so a pricing bug can never produce a negative or absurd charge.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(pub u64);

impl Cents {
    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_add(self, other: Cents) -> Cents {
        Cents(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Cents) -> Cents {
        Cents(self.0.saturating_sub(other.0))
    }

    /// Multiply by a quantity, saturating on overflow.
    pub fn saturating_mul(self, quantity: u64) -> Cents {
        Cents(self.0.saturating_mul(quantity))
    }

    /// `rate_percent` of this amount, truncated toward zero.
    pub fn percent(self, rate_percent: u64) -> Cents {
        Cents(self.0.saturating_mul(rate_percent) / 100)
    }

    pub fn min(self, other: Cents) -> Cents {
        Cents(self.0.min(other.0))
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::zero(), Cents::saturating_add)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_arithmetic() {
        assert_eq!(Cents::new(5).saturating_sub(Cents::new(9)), Cents::zero());
        assert_eq!(Cents::new(u64::MAX).saturating_add(Cents::new(1)).0, u64::MAX);
        assert_eq!(Cents::new(995).saturating_add(Cents::new(5)), Cents::new(1000));
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(Cents::new(60000).percent(10), Cents::new(6000));
        assert_eq!(Cents::new(999).percent(10), Cents::new(99));
        assert_eq!(Cents::new(0).percent(10), Cents::zero());
    }

    #[test]
    fn test_sum() {
        let total: Cents = [Cents::new(100), Cents::new(250)].into_iter().sum();
        assert_eq!(total, Cents::new(350));
    }
}
