//! Code for loading simulation models.
//!
//! A model is a directory containing a `model.toml` file which describes the city, the company
//! and the scenarios to evaluate.
use crate::company::Company;
use crate::error::SimulationError;
use crate::grid::{GridShape, Region};
use crate::input::read_toml;
use crate::placement::PlacementStrategy;
use crate::resident::{Population, build_population};
use crate::tier::PriceTier;
use crate::zone::{ZoneMap, build_zone_map};
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;
use std::path::Path;

const MODEL_FILE_NAME: &str = "model.toml";

/// Represents the contents of the entire model file.
#[derive(Debug, Deserialize, PartialEq)]
struct ModelFile {
    city: CityParameters,
    company: Company,
    scenarios: IndexMap<String, Scenario>,
}

/// The `[city]` section of the model file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CityParameters {
    /// Number of rows in the grid
    pub rows: usize,
    /// Number of columns in the grid
    pub cols: usize,
    /// Rectangle of high-income cells
    pub high_region: Option<Region>,
    /// Rectangle of low-income cells, taking precedence over `high_region`
    pub low_region: Option<Region>,
}

/// A set of markets to evaluate, one run per combination of price tier and size
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Scenario {
    /// How markets are placed
    pub placement: PlacementStrategy,
    /// Price tiers to try
    pub price_tiers: Vec<PriceTier>,
    /// Market sizes to try
    pub sizes: Vec<u32>,
    /// Fixed number of markets. If absent, as many as the company can afford.
    pub markets: Option<usize>,
    /// Seed for random placement. If absent, placement is not reproducible.
    pub seed: Option<u64>,
}

/// The city: its income zones and residents
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    /// Income tier of each cell
    pub zone_map: ZoneMap,
    /// One resident per cell
    pub population: Population,
}

impl City {
    /// Build the zone map and population for the given parameters
    pub fn new(parameters: &CityParameters) -> Result<Self> {
        let shape = GridShape::new(parameters.rows, parameters.cols)?;
        let zone_map = build_zone_map(
            shape,
            parameters.high_region.as_ref(),
            parameters.low_region.as_ref(),
        )?;
        let population = build_population(&zone_map);

        Ok(Self {
            zone_map,
            population,
        })
    }

    /// The shape of the city grid
    pub fn shape(&self) -> GridShape {
        self.zone_map.shape()
    }
}

/// Model definition
#[derive(Debug)]
pub struct Model {
    /// The city markets are placed in
    pub city: City,
    /// The company placing markets
    pub company: Company,
    /// Scenarios to evaluate, in the order given in the model file
    pub scenarios: IndexMap<String, Scenario>,
}

/// Check that the company parameters are valid
fn check_company(company: &Company) -> Result<()> {
    let budget = company.budget.value();
    ensure!(
        budget.is_finite() && budget >= 0.0,
        "Company budget must be a non-negative number"
    );

    Ok(())
}

/// Check that a scenario's parameters are valid
fn check_scenario(scenario: &Scenario) -> Result<()> {
    ensure!(!scenario.price_tiers.is_empty(), "No price tiers given");
    ensure!(!scenario.sizes.is_empty(), "No market sizes given");
    for &size in &scenario.sizes {
        ensure!(size > 0, SimulationError::InvalidSize(size));
    }

    Ok(())
}

impl Model {
    /// Read a model from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model configuration files
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<Model> {
        let model_dir = model_dir.as_ref();
        let file_path = model_dir.join(MODEL_FILE_NAME);
        let model_file: ModelFile = read_toml(&file_path)?;

        let city = City::new(&model_file.city).context("Invalid city parameters")?;
        check_company(&model_file.company)?;
        ensure!(
            !model_file.scenarios.is_empty(),
            "Model must contain at least one scenario"
        );
        for (name, scenario) in &model_file.scenarios {
            check_scenario(scenario).with_context(|| format!("Invalid scenario: {name}"))?;
            if scenario.seed.is_some() && scenario.placement == PlacementStrategy::Uniform {
                warn!("Seed given for scenario {name} is ignored as placement is uniform");
            }
        }

        Ok(Model {
            city,
            company: model_file.company,
            scenarios: model_file.scenarios,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use crate::tier::IncomeTier;
    use crate::units::Money;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const CITY: &str = "[city]
rows = 10
cols = 10
high_region = { start = [0, 0], end = [2, 2] }
low_region = { start = [2, 2], end = [9, 9] }

[company]
budget = 15000.0
";

    /// Write a model file with the given contents to a temporary directory
    fn write_model(contents: &str) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let mut file = File::create(dir.path().join(MODEL_FILE_NAME)).unwrap();
        write!(file, "{contents}").unwrap();
        dir
    }

    #[test]
    fn test_model_from_path() {
        let dir = write_model(&format!(
            "{CITY}
[scenarios.uniform]
placement = \"uniform\"
price_tiers = [\"level1\", \"level3\"]
sizes = [10, 40]

[scenarios.random]
placement = \"random\"
price_tiers = [\"level2\"]
sizes = [20]
markets = 5
seed = 42
"
        ));
        let model = Model::from_path(dir.path()).unwrap();

        assert_eq!(model.city.shape(), GridShape::new(10, 10).unwrap());
        assert_eq!(model.city.population.len(), 100);
        assert_eq!(
            model.city.zone_map.get((0, 0).into()),
            Some(&IncomeTier::High)
        );
        assert_eq!(
            model.city.zone_map.get((2, 2).into()),
            Some(&IncomeTier::Low)
        );
        assert_eq!(model.company.budget, Money(15000.0));
        assert_eq!(
            model.scenarios.keys().collect::<Vec<_>>(),
            ["uniform", "random"]
        );
        assert_eq!(
            model.scenarios["random"],
            Scenario {
                placement: PlacementStrategy::Random,
                price_tiers: vec![PriceTier::Level2],
                sizes: vec![20],
                markets: Some(5),
                seed: Some(42),
            }
        );
    }

    #[test]
    fn test_model_from_path_missing_file() {
        let dir = tempdir().unwrap();
        assert!(Model::from_path(dir.path()).is_err());
    }

    #[test]
    fn test_model_from_path_unknown_tier() {
        let dir = write_model(&format!(
            "{CITY}
[scenarios.bad]
placement = \"uniform\"
price_tiers = [\"level9\"]
sizes = [10]
"
        ));
        let err = Model::from_path(dir.path()).unwrap_err();
        assert!(format!("{err:?}").contains("Unknown tier: level9"));
    }

    #[test]
    fn test_model_from_path_zero_size() {
        let dir = write_model(&format!(
            "{CITY}
[scenarios.bad]
placement = \"uniform\"
price_tiers = [\"level1\"]
sizes = [10, 0]
"
        ));
        assert_error!(Model::from_path(dir.path()), "Invalid scenario: bad");
    }

    #[test]
    fn test_model_from_path_no_scenarios() {
        let dir = write_model(&format!("{CITY}\n[scenarios]\n"));
        assert_error!(
            Model::from_path(dir.path()),
            "Model must contain at least one scenario"
        );
    }

    #[test]
    fn test_city_new_bad_region() {
        let parameters = CityParameters {
            rows: 5,
            cols: 5,
            high_region: Some(Region::new((0, 0).into(), (5, 5).into())),
            low_region: None,
        };
        assert!(City::new(&parameters).is_err());
    }

    #[test]
    fn test_check_company() {
        assert!(
            check_company(&Company {
                budget: Money(0.0)
            })
            .is_ok()
        );
        assert_error!(
            check_company(&Company {
                budget: Money(-1.0)
            }),
            "Company budget must be a non-negative number"
        );
    }
}
