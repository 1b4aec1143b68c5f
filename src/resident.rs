//! Residents of the city and their purchasing decisions.
use crate::grid::{Coordinate, Grid, GridShape, Point};
use crate::units::Money;
use crate::zone::ZoneMap;

/// Residents spend at most `1 / BUDGET_DIVISOR` of their monthly income on one purchase
const BUDGET_DIVISOR: f64 = 10.0;

/// A single resident, living in one grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resident {
    /// Monthly income
    pub income: Money,
    /// The cell the resident lives in
    pub home: Coordinate,
}

impl Resident {
    /// The most the resident is willing to pay for a purchase
    pub fn budget(&self) -> Money {
        self.income / BUDGET_DIVISOR
    }

    /// Whether the resident will buy from a market.
    ///
    /// A resident buys if they can afford the sell price and they live within the market's reach
    /// radius, which is the square root of its size. Both bounds are inclusive.
    pub fn purchase(&self, sell_price: Money, market_location: Point, market_size: u32) -> bool {
        self.budget() >= sell_price
            && Point::from(self.home).distance(market_location) <= f64::from(market_size).sqrt()
    }
}

/// All residents of a city, one per cell
#[derive(Debug, Clone, PartialEq)]
pub struct Population(Grid<Resident>);

impl Population {
    /// The shape of the city the population lives in
    pub fn shape(&self) -> GridShape {
        self.0.shape()
    }

    /// Number of residents
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no residents
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The resident living at the given cell
    pub fn get(&self, home: Coordinate) -> Option<&Resident> {
        self.0.get(home)
    }

    /// Iterate over residents in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Resident> {
        self.0.values()
    }

    /// Residents grouped by row
    pub fn rows(&self) -> std::slice::Chunks<'_, Resident> {
        self.0.rows()
    }
}

/// Create one resident per cell of the zone map, with income taken from the cell's tier
pub fn build_population(zone_map: &ZoneMap) -> Population {
    Population(Grid::from_fn(zone_map.shape(), |home| Resident {
        income: zone_map
            .get(home)
            .copied()
            .unwrap_or_default()
            .income(),
        home,
    }))
}
