//! Fixtures for tests

use crate::grid::{GridShape, Point};
use crate::market::Market;
use crate::resident::{Population, build_population};
use crate::tier::PriceTier;
use crate::zone::build_zone_map;
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// A 10x10 city in which everyone has median income
#[fixture]
pub fn population() -> Population {
    let shape = GridShape::new(10, 10).unwrap();
    build_population(&build_zone_map(shape, None, None).unwrap())
}

/// A cheap market of size 40 in the middle of a 10x10 city
#[fixture]
pub fn market() -> Market {
    Market::new(Point::new(5.0, 5.0), PriceTier::Level1, 40).unwrap()
}
