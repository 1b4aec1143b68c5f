//! Income and price tiers, and the fixed tables mapping them to money values.
use crate::error::SimulationError;
use crate::units::Money;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The income classification of a grid cell
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum IncomeTier {
    /// Low-income residents
    Low,
    /// Median-income residents
    #[default]
    Median,
    /// High-income residents
    High,
}

impl IncomeTier {
    /// Parse a tier from its key (e.g. "low")
    pub fn from_key(key: &str) -> Result<Self> {
        Ok(key
            .parse::<Self>()
            .map_err(|_| SimulationError::InvalidTier(key.to_string()))?)
    }

    /// Monthly income of a resident in this tier
    pub const fn income(self) -> Money {
        match self {
            Self::Low => Money(300.0),
            Self::Median => Money(1000.0),
            Self::High => Money(2000.0),
        }
    }
}

impl TryFrom<String> for IncomeTier {
    type Error = SimulationError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        key.parse().map_err(|_| SimulationError::InvalidTier(key))
    }
}

/// The price level a market sells at
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PriceTier {
    /// Cheapest goods
    Level1,
    #[allow(missing_docs)]
    Level2,
    #[allow(missing_docs)]
    Level3,
    #[allow(missing_docs)]
    Level4,
    /// Most expensive goods
    Level5,
}

impl PriceTier {
    /// Parse a tier from its key (e.g. "level3")
    pub fn from_key(key: &str) -> Result<Self> {
        Ok(key
            .parse::<Self>()
            .map_err(|_| SimulationError::InvalidTier(key.to_string()))?)
    }

    /// The price the market pays per unit of stock
    pub const fn buy_price(self) -> Money {
        match self {
            Self::Level1 => Money(5.0),
            Self::Level2 => Money(15.0),
            Self::Level3 => Money(30.0),
            Self::Level4 => Money(50.0),
            Self::Level5 => Money(80.0),
        }
    }

    /// The price the market charges a customer, always twice the buy price
    pub const fn sell_price(self) -> Money {
        Money(self.buy_price().0 * 2.0)
    }
}

impl TryFrom<String> for PriceTier {
    type Error = SimulationError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        key.parse().map_err(|_| SimulationError::InvalidTier(key))
    }
}
