//! The company placing markets in the city.
use crate::market::Market;
use crate::units::{Dimensionless, Money};
use serde::Deserialize;

/// A company with a fixed budget for opening markets
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Company {
    /// Total money available for opening markets
    pub budget: Money,
}

impl Company {
    /// How many markets like `market` the company could afford.
    ///
    /// This is a real-valued upper bound; rounding it to a whole number of markets is left to the
    /// caller.
    pub fn max_affordable(&self, market: &Market) -> Dimensionless {
        self.budget / market.cost()
    }
}
