//! Functionality for evaluating the scenarios in a model.
use crate::demand::evaluate_markets;
use crate::grid::Point;
use crate::market::{Market, build_markets};
use crate::model::{Model, Scenario};
use crate::output::{DataWriter, ScenarioResult};
use crate::placement::place;
use crate::tier::PriceTier;
use anyhow::{Result, ensure};
use itertools::Itertools;
use log::{debug, error, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;

/// The most markets that will be opened for a single price tier and size
pub const MAX_MARKETS: usize = 1_000_000;

/// Run every scenario in the model, writing results to `output_path`.
///
/// A scenario that fails is logged and skipped, and the remaining scenarios still run.
///
/// # Arguments:
///
/// * `model` - The model to run
/// * `output_path` - The folder to which output files will be written
pub fn run(model: &Model, output_path: &Path) -> Result<()> {
    let mut writer = DataWriter::create(output_path)?;

    for (name, scenario) in &model.scenarios {
        info!("Running scenario: {name}");
        let results = match run_scenario(model, name, scenario) {
            Ok(results) => results,
            Err(err) => {
                error!("Skipping scenario {name}: {err:#}");
                continue;
            }
        };

        if let Some(best) = results.iter().max_by(|a, b| a.profit.0.total_cmp(&b.profit.0)) {
            info!(
                "Most profitable in {name}: {} markets of size {} at {} (profit {})",
                best.markets, best.size, best.price_tier, best.profit
            );
        }
        writer.write_results(&results)?;
    }

    writer.flush()
}

/// Evaluate one scenario for every combination of its price tiers and sizes.
///
/// Random placement draws from a generator seeded with the scenario's seed, if given, so seeded
/// scenarios give the same results on every run.
pub fn run_scenario(
    model: &Model,
    name: &str,
    scenario: &Scenario,
) -> Result<Vec<ScenarioResult>> {
    let mut rng = scenario_rng(scenario.seed);

    scenario
        .price_tiers
        .iter()
        .cartesian_product(&scenario.sizes)
        .map(|(&price_tier, &size)| evaluate(model, name, scenario, price_tier, size, &mut rng))
        .collect()
}

/// Random number generator for placement, reproducible only if a seed is given
fn scenario_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// The number of markets to open for the given tier and size
fn market_count(
    model: &Model,
    scenario: &Scenario,
    price_tier: PriceTier,
    size: u32,
) -> Result<usize> {
    let count = match scenario.markets {
        Some(markets) => markets,
        None => {
            let prototype = Market::new(Point::new(0.0, 0.0), price_tier, size)?;
            let affordable = model.company.max_affordable(&prototype).value();
            debug!("Company can afford {affordable} markets of size {size} at {price_tier}");

            // Saturates for huge budgets
            affordable.floor() as usize
        }
    };
    ensure!(
        count <= MAX_MARKETS,
        "Cannot open {count} markets of size {size} at {price_tier}: the limit is {MAX_MARKETS}"
    );

    Ok(count)
}

/// Place and score markets of one tier and size
fn evaluate<R: Rng>(
    model: &Model,
    name: &str,
    scenario: &Scenario,
    price_tier: PriceTier,
    size: u32,
    rng: &mut R,
) -> Result<ScenarioResult> {
    let amount = market_count(model, scenario, price_tier, size)?;
    let locations = place(model.city.shape(), amount, scenario.placement, rng)?;
    let markets = build_markets(&locations, price_tier, size)?;
    let outcomes = evaluate_markets(&markets, &model.city.population);

    Ok(ScenarioResult {
        scenario: name.to_string(),
        placement: scenario.placement,
        price_tier,
        size,
        markets: markets.len(),
        customers: outcomes.iter().map(|outcome| outcome.customers).sum(),
        cost: markets.iter().map(Market::cost).sum(),
        profit: outcomes.iter().map(|outcome| outcome.profit).sum(),
    })
}
