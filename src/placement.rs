//! Strategies for choosing where to put markets on the grid.
//!
//! Two strategies are provided:
//!
//! * [`PlacementStrategy::Random`] draws cells uniformly at random, with replacement
//! * [`PlacementStrategy::Uniform`] picks cells at a fixed linear interval through the grid
//!
//! Uniform placement keeps a historical quirk in how it maps linear indices back to rows and
//! columns (see [`index_to_point`]). Results from earlier studies depend on the exact locations
//! it picks, so it is kept as-is. On square grids it coincides with plain row-major order; on
//! other grids some locations fall outside the grid, and are kept there.
use crate::error::SimulationError;
use crate::grid::{Coordinate, GridShape, Point};
use anyhow::{Result, ensure};
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How market locations are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlacementStrategy {
    /// Independent uniformly random cells, duplicates allowed
    Random,
    /// Deterministic cells at a fixed interval through the grid
    Uniform,
}

/// Choose `amount` market locations on a grid of the given shape.
///
/// `rng` is only used by [`PlacementStrategy::Random`].
pub fn place<R: Rng + ?Sized>(
    shape: GridShape,
    amount: usize,
    strategy: PlacementStrategy,
    rng: &mut R,
) -> Result<Vec<Point>> {
    let locations = match strategy {
        PlacementStrategy::Random => place_random(shape, amount, rng)
            .into_iter()
            .map(Point::from)
            .collect(),
        PlacementStrategy::Uniform => place_uniform(shape, amount)?,
    };
    if locations.len() < amount {
        warn!(
            "Only {} of {amount} requested markets could be placed ({strategy}) on {shape} grid",
            locations.len()
        );
    } else {
        debug!("Placed {amount} markets ({strategy}) on {shape} grid");
    }

    Ok(locations)
}

/// Draw `amount` cells independently and uniformly at random
pub fn place_random<R: Rng + ?Sized>(
    shape: GridShape,
    amount: usize,
    rng: &mut R,
) -> Vec<Coordinate> {
    (0..amount)
        .map(|_| Coordinate {
            row: rng.gen_range(0..shape.rows()),
            col: rng.gen_range(0..shape.cols()),
        })
        .collect()
}

/// Choose locations at a fixed linear interval through the grid.
///
/// With `N` cells, the interval is `N / (amount - 1)` (rounded down) and the locations picked
/// are those for linear indices `0, interval, 2 * interval, ...` below `N`, truncated to
/// `amount` entries. Note that this can yield fewer than `amount` locations, typically
/// `amount - 1`.
///
/// An `amount` of zero gives no locations and an `amount` of one gives the top-left cell.
pub fn place_uniform(shape: GridShape, amount: usize) -> Result<Vec<Point>> {
    match amount {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![Point::new(0.0, 0.0)]),
        _ => {}
    }

    let cell_count = shape.cell_count();
    let interval = cell_count / (amount - 1);
    ensure!(
        interval > 0,
        SimulationError::DegeneratePlacement { amount, shape }
    );

    Ok((0..cell_count)
        .step_by(interval)
        .take(amount)
        .map(|index| index_to_point(shape, index))
        .collect())
}

/// Map a linear index to a location, as uniform placement has always done.
///
/// The row is derived from `index + 1` and the row count, while the column is derived with the
/// column count. Unless the grid is square, the result may lie outside the grid, with a row
/// past the last one or a negative column.
pub fn index_to_point(shape: GridShape, index: usize) -> Point {
    let next = index + 1;
    if next % shape.rows() == 0 {
        Point::new((next / shape.rows() - 1) as f64, (shape.cols() - 1) as f64)
    } else {
        let row = next / shape.rows();
        Point::new(row as f64, index as f64 - (row * shape.cols()) as f64)
    }
}
