//! The module responsible for writing output data to disk.
use crate::placement::PlacementStrategy;
use crate::tier::PriceTier;
use crate::units::Money;
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The root folder in which model-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "marketsim_results";

/// The output file name for scenario results
const RESULTS_FILE_NAME: &str = "results.csv";

/// Get the default output directory for the model specified at `model_dir`
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    // Get the model name from the dir path. This ends up being convoluted because we need to check
    // for all possible errors. Ugh.
    let model_dir = model_dir
        .canonicalize() // canonicalise in case the user has specified "."
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    // Construct path
    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create a new output directory for the model, optionally overwriting existing data
///
/// # Arguments
///
/// * `output_dir` - The output directory to create/overwrite
/// * `allow_overwrite` - Whether to delete and recreate the folder if it is non-empty
///
/// # Returns
///
/// True if the output dir contained existing data that was deleted, false if not, or an error.
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    // If the folder already exists, then delete it
    let overwrite = if let Ok(mut it) = fs::read_dir(output_dir) {
        if it.next().is_none() {
            // Folder exists and is empty: nothing to do
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. \
            Please delete the folder or pass the --overwrite command-line option."
        );

        fs::remove_dir_all(output_dir)?;
        true
    } else {
        false
    };

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(overwrite)
}

/// Represents a row in the results CSV file: the outcome of one tier and size in a scenario
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioResult {
    /// Name of the scenario
    pub scenario: String,
    /// How markets were placed
    pub placement: PlacementStrategy,
    /// Price tier of every market
    pub price_tier: PriceTier,
    /// Size of every market
    pub size: u32,
    /// Number of markets placed
    pub markets: usize,
    /// Customers summed over markets (residents reached by several markets count several times)
    pub customers: usize,
    /// Total cost of the markets
    pub cost: Money,
    /// Total profit of the markets
    pub profit: Money,
}

/// An object for writing scenario results to file
pub struct DataWriter {
    results_writer: csv::Writer<File>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    pub fn create(output_path: &Path) -> Result<Self> {
        let file_path = output_path.join(RESULTS_FILE_NAME);
        let results_writer = csv::Writer::from_path(&file_path)
            .with_context(|| format!("Could not create {}", file_path.display()))?;

        Ok(Self { results_writer })
    }

    /// Write scenario results to a CSV file
    pub fn write_results(&mut self, results: &[ScenarioResult]) -> Result<()> {
        for result in results {
            self.results_writer.serialize(result)?;
        }

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.results_writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::{Itertools, assert_equal};
    use std::fs::File;
    use tempfile::tempdir;

    fn result(size: u32, profit: f64) -> ScenarioResult {
        ScenarioResult {
            scenario: "spread".into(),
            placement: PlacementStrategy::Uniform,
            price_tier: PriceTier::Level2,
            size,
            markets: 4,
            customers: 57,
            cost: Money(72.0),
            profit: Money(profit),
        }
    }

    #[test]
    fn test_write_results() {
        let results = [result(10, 120.5), result(20, -3.0)];
        let dir = tempdir().unwrap();

        // Write results
        {
            let mut writer = DataWriter::create(dir.path()).unwrap();
            writer.write_results(&results).unwrap();
            writer.flush().unwrap();
        }

        // Read back and compare
        let records: Vec<ScenarioResult> =
            csv::Reader::from_path(dir.path().join(RESULTS_FILE_NAME))
                .unwrap()
                .into_deserialize()
                .try_collect()
                .unwrap();
        assert_equal(records, results);

        let contents = fs::read_to_string(dir.path().join(RESULTS_FILE_NAME)).unwrap();
        assert!(contents.starts_with(
            "scenario,placement,price_tier,size,markets,customers,cost,profit\n\
            spread,uniform,level2,10,4,57,72.0,120.5\n"
        ));
    }

    #[test]
    fn test_create_output_directory_new_directory() {
        let temp_dir = tempdir().unwrap();
        let output_dir = temp_dir.path().join("results");

        // Create a new directory should succeed and report no overwrite
        assert!(!create_output_directory(&output_dir, false).unwrap());
        assert!(output_dir.is_dir());
    }

    #[test]
    fn test_create_output_directory_existing_empty_directory() {
        let temp_dir = tempdir().unwrap();
        let output_dir = temp_dir.path().join("results");

        fs::create_dir(&output_dir).unwrap();
        assert!(!create_output_directory(&output_dir, false).unwrap());
        assert!(output_dir.is_dir());
    }

    #[test]
    fn test_create_output_directory_existing_with_files() {
        let temp_dir = tempdir().unwrap();
        let output_dir = temp_dir.path().join("results");
        fs::create_dir(&output_dir).unwrap();
        File::create(output_dir.join(RESULTS_FILE_NAME)).unwrap();

        // Without permission to overwrite, this fails
        assert!(create_output_directory(&output_dir, false).is_err());
        assert!(output_dir.join(RESULTS_FILE_NAME).is_file());

        // With permission, the old contents are removed
        assert!(create_output_directory(&output_dir, true).unwrap());
        assert!(output_dir.is_dir());
        assert!(!output_dir.join(RESULTS_FILE_NAME).exists());
    }

    #[test]
    fn test_get_output_dir() {
        let temp_dir = tempdir().unwrap();
        let model_dir = temp_dir.path().join("my_model");
        fs::create_dir(&model_dir).unwrap();

        assert_eq!(
            get_output_dir(&model_dir).unwrap(),
            PathBuf::from(OUTPUT_DIRECTORY_ROOT).join("my_model")
        );
        assert!(get_output_dir(&temp_dir.path().join("missing")).is_err());
    }
}
