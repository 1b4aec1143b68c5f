//! Building the income zone map for a city.
use crate::grid::{Grid, GridShape, Region};
use crate::tier::IncomeTier;
use anyhow::Result;
use log::debug;

/// A grid of income tiers, one per cell
pub type ZoneMap = Grid<IncomeTier>;

/// Build the income zone map for a city.
///
/// Every cell starts out as [`IncomeTier::Median`]. Cells in `high_region` are then set to
/// [`IncomeTier::High`] and, after that, cells in `low_region` are set to [`IncomeTier::Low`], so
/// where the two regions overlap the cells end up low-income.
///
/// # Arguments
///
/// * `shape` - Number of rows and columns in the city
/// * `high_region` - Optional inclusive rectangle of high-income cells
/// * `low_region` - Optional inclusive rectangle of low-income cells
pub fn build_zone_map(
    shape: GridShape,
    high_region: Option<&Region>,
    low_region: Option<&Region>,
) -> Result<ZoneMap> {
    for region in high_region.iter().chain(low_region.iter()) {
        region.validate(shape)?;
    }

    let mut map = Grid::filled(shape, IncomeTier::Median);
    let overwrites = [(high_region, IncomeTier::High), (low_region, IncomeTier::Low)];
    for (region, tier) in overwrites {
        let Some(region) = region else {
            continue;
        };

        debug!("Setting cells in {region} to {tier} income");
        for coord in region.iter_coordinates() {
            if let Some(cell) = map.get_mut(coord) {
                *cell = tier;
            }
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;
    use crate::grid::Coordinate;

    fn region(start: (usize, usize), end: (usize, usize)) -> Region {
        Region::new(start.into(), end.into())
    }

    #[test]
    fn test_build_zone_map_no_regions() {
        let shape = GridShape::new(4, 6).unwrap();
        let map = build_zone_map(shape, None, None).unwrap();
        assert_eq!(map.len(), 24);
        assert!(map.values().all(|tier| *tier == IncomeTier::Median));
    }

    #[test]
    fn test_build_zone_map_disjoint() {
        let shape = GridShape::new(10, 10).unwrap();
        let high = region((0, 0), (2, 2));
        let low = region((7, 7), (9, 9));
        let map = build_zone_map(shape, Some(&high), Some(&low)).unwrap();

        for (coord, tier) in map.iter() {
            let expected = if coord.row <= 2 && coord.col <= 2 {
                IncomeTier::High
            } else if coord.row >= 7 && coord.col >= 7 {
                IncomeTier::Low
            } else {
                IncomeTier::Median
            };
            assert_eq!(*tier, expected, "wrong tier at {coord}");
        }
    }

    #[test]
    fn test_build_zone_map_low_wins_on_overlap() {
        let shape = GridShape::new(6, 6).unwrap();
        let high = region((0, 0), (3, 3));
        let low = region((2, 2), (5, 5));
        let map = build_zone_map(shape, Some(&high), Some(&low)).unwrap();

        for coord in low.iter_coordinates() {
            assert_eq!(map.get(coord), Some(&IncomeTier::Low));
        }
        assert_eq!(map.get(Coordinate::new(1, 1)), Some(&IncomeTier::High));
        assert_eq!(map.get(Coordinate::new(3, 1)), Some(&IncomeTier::High));
        assert_eq!(map.get(Coordinate::new(0, 5)), Some(&IncomeTier::Median));
    }

    #[test]
    fn test_build_zone_map_invalid_region() {
        let shape = GridShape::new(5, 5).unwrap();
        let high = region((0, 0), (1, 1));
        let low = region((3, 3), (2, 4));
        let err = build_zone_map(shape, Some(&high), Some(&low)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SimulationError>(),
            Some(&SimulationError::InvalidRegion {
                region: low,
                reason: "start corner exceeds end corner",
            })
        );
    }

    #[test]
    fn test_build_zone_map_region_off_grid() {
        let shape = GridShape::new(5, 5).unwrap();
        let high = region((0, 0), (5, 1));
        let err = build_zone_map(shape, Some(&high), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid region (0, 0)-(5, 1): region extends outside the grid"
        );
    }
}
