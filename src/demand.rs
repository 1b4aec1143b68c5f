//! Aggregating resident demand into market profits.
//!
//! Each market is scored against the whole population independently of the others: a resident who
//! can reach two markets counts as a customer of both. This makes the per-market work
//! independent, so it is spread across threads with `rayon` and the results are summed at the end.
use crate::market::Market;
use crate::resident::Population;
use crate::units::Money;
use log::debug;
use rayon::prelude::*;

/// The customers and profit of a single market
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketOutcome {
    /// Number of residents who would buy from the market
    pub customers: usize,
    /// Profit given those customers
    pub profit: Money,
}

/// Count the residents who would buy from the given market
pub fn count_customers(market: &Market, population: &Population) -> usize {
    let sell_price = market.sell_price();
    population
        .iter()
        .filter(|resident| resident.purchase(sell_price, market.location, market.size))
        .count()
}

/// Count the residents who would buy from the given market, in parallel across bands of rows.
///
/// Gives the same result as [`count_customers`]. Useful when there are few markets but a large
/// population.
pub fn count_customers_partitioned(
    market: &Market,
    population: &Population,
    partitions: usize,
) -> usize {
    let rows: Vec<_> = population.rows().collect();
    let band_size = rows.len().div_ceil(partitions.max(1));
    let sell_price = market.sell_price();

    rows.par_chunks(band_size)
        .map(|band| {
            band.iter()
                .flat_map(|row| row.iter())
                .filter(|resident| resident.purchase(sell_price, market.location, market.size))
                .count()
        })
        .sum()
}

/// Score every market against the population, returning outcomes in the same order as `markets`
pub fn evaluate_markets(markets: &[Market], population: &Population) -> Vec<MarketOutcome> {
    markets
        .par_iter()
        .map(|market| {
            let customers = count_customers(market, population);
            debug!(
                "Market at {} ({}, size {}) has {customers} customers",
                market.location, market.price_tier, market.size
            );
            MarketOutcome {
                customers,
                profit: market.profit(customers),
            }
        })
        .collect()
}

/// Total profit across all markets
pub fn total_profit(markets: &[Market], population: &Population) -> Money {
    markets
        .par_iter()
        .map(|market| market.profit(count_customers(market, population)))
        .sum()
}
