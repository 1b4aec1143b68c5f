//! The economics of a single market (store).
use crate::error::SimulationError;
use crate::grid::{Coordinate, Point};
use crate::tier::PriceTier;
use crate::units::Money;
use anyhow::{Result, ensure};

/// Multiplier applied to the stock cost to cover stocking and staffing
const OVERHEAD_MULTIPLIER: f64 = 1.2;

/// A market placed in the city
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    /// Where the market is
    pub location: Point,
    /// The price tier it trades at
    pub price_tier: PriceTier,
    /// The maximum number of customers it can serve
    pub size: u32,
}

impl Market {
    /// Create a new [`Market`], checking that its size is positive
    pub fn new(location: Point, price_tier: PriceTier, size: u32) -> Result<Self> {
        ensure!(size > 0, SimulationError::InvalidSize(size));

        Ok(Self {
            location,
            price_tier,
            size,
        })
    }

    /// Unit price the market pays for stock
    pub fn buy_price(&self) -> Money {
        self.price_tier.buy_price()
    }

    /// Unit price the market charges customers
    pub fn sell_price(&self) -> Money {
        self.price_tier.sell_price()
    }

    /// The fixed cost of running the market
    pub fn cost(&self) -> Money {
        self.buy_price() * f64::from(self.size) * OVERHEAD_MULTIPLIER
    }

    /// Revenue minus cost for the given number of customers.
    ///
    /// Customers beyond the market's size bring no revenue.
    pub fn profit(&self, customers: usize) -> Money {
        let served = customers.min(self.size as usize);
        self.sell_price() * served as f64 - self.cost()
    }

    /// Distance from the market to a cell
    pub fn distance_to(&self, coord: Coordinate) -> f64 {
        self.location.distance(coord.into())
    }
}

/// Create a market with the same tier and size at each location
pub fn build_markets(
    locations: &[Point],
    price_tier: PriceTier,
    size: u32,
) -> Result<Vec<Market>> {
    locations
        .iter()
        .map(|&location| Market::new(location, price_tier, size))
        .collect()
}
