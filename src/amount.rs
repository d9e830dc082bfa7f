use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// An amount of coins in the smallest unit.
///
/// The value is signed so that a transaction carrying a negative output can be
/// represented and then rejected by validation. All arithmetic is checked.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Coin(i64);

impl Coin {
    pub const ZERO: Coin = Coin(0);

    pub const fn new(amount: i64) -> Self {
        Coin(amount)
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Coin) -> Option<Coin> {
        self.0.checked_add(rhs.0).map(Coin)
    }

    pub fn checked_sub(self, rhs: Coin) -> Option<Coin> {
        self.0.checked_sub(rhs.0).map(Coin)
    }

    pub fn saturating_add(self, rhs: Coin) -> Coin {
        Coin(self.0.saturating_add(rhs.0))
    }

    /// Sums the amounts, returning `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Coin>>(amounts: I) -> Option<Coin> {
        amounts
            .into_iter()
            .try_fold(Coin::zero(), |sum, amount| sum.checked_add(amount))
    }
}

impl From<i64> for Coin {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Coin {
    fn from(value: i32) -> Self {
        Self(value as i64)
    }
}

impl Display for Coin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} coins", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_sum_of_amounts() {
        let sum = Coin::checked_sum(vec![Coin::new(3), Coin::new(4), Coin::new(-2)]);
        assert_eq!(sum, Some(Coin::new(5)));
        assert_eq!(Coin::checked_sum(Vec::<Coin>::new()), Some(Coin::zero()));
    }

    #[test]
    fn checked_sum_overflows() {
        assert_eq!(
            Coin::checked_sum(vec![Coin::new(i64::MAX), Coin::new(1)]),
            None
        );
    }

    #[test]
    fn checked_sub_underflows() {
        assert_eq!(Coin::new(i64::MIN).checked_sub(Coin::new(1)), None);
        assert_eq!(
            Coin::new(10).checked_sub(Coin::new(4)),
            Some(Coin::new(6))
        );
    }
}
