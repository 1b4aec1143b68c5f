//! Errors raised by the simulation core.
use crate::grid::{GridShape, Region};

/// A failure in building or evaluating part of the model.
///
/// These are wrapped in [`anyhow::Error`] when returned, so callers that need to branch on the
/// kind of failure should use `downcast_ref::<SimulationError>()`.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum SimulationError {
    /// A zone rectangle has unordered corners or lies partly off the grid
    #[display("Invalid region {region}: {reason}")]
    InvalidRegion {
        /// The offending region
        region: Region,
        /// What is wrong with it
        reason: &'static str,
    },
    /// An income or price tier key was not recognised
    #[display("Unknown tier: {_0}")]
    InvalidTier(String),
    /// Uniform placement cannot produce locations for this amount on this grid
    #[display("Cannot place {amount} markets uniformly on a {shape} grid")]
    DegeneratePlacement {
        /// Number of markets requested
        amount: usize,
        /// Shape of the grid
        shape: GridShape,
    },
    /// A market was given a non-positive size
    #[display("Market size must be positive, got {_0}")]
    InvalidSize(u32),
    /// A grid was given zero rows or columns
    #[display("Grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid {
        /// Requested number of rows
        rows: usize,
        /// Requested number of columns
        cols: usize,
    },
}

impl std::error::Error for SimulationError {}
