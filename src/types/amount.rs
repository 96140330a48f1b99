use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::types::errors::AmountError;

/// A money amount in the smallest currency unit.
///
/// Always strictly positive. Anything that ends up in the transaction log
/// goes through this type first, so zero or negative rows are never written.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Amount(i64);

impl Amount {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Amount {
    type Error = AmountError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(AmountError::NotPositive(value));
        }

        Ok(Amount(value))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(AmountError::Empty);
        }

        let parsed: i64 = value.parse()?;

        Amount::try_from(parsed)
    }
}

impl Display for Amount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
