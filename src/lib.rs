//! Common functionality for marketsim.
//!
//! marketsim estimates how profitable it is for a company to open markets (stores) in a city. The
//! city is a grid of residents whose income depends on where they live. Markets are placed on the
//! grid, either at random or evenly spaced, and each resident decides independently whether to buy
//! from each market based on its price and how far away it is.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod cli;
pub mod company;
pub mod demand;
pub mod error;
pub mod grid;
pub mod input;
pub mod log;
pub mod market;
pub mod model;
pub mod output;
pub mod placement;
pub mod resident;
pub mod settings;
pub mod simulation;
pub mod tier;
pub mod units;
pub mod zone;

#[cfg(test)]
mod fixture;

/// Get the config dir for marketsim
pub fn get_marketsim_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        // No config dir on this platform; look in the working directory instead
        return PathBuf::new();
    };
    config_dir.push("marketsim");

    config_dir
}
