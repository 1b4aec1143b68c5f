//! Provides the main entry point to the program.
use human_panic::setup_panic;
use marketsim::cli::run_cli;

fn main() -> anyhow::Result<()> {
    setup_panic!();
    run_cli()
}
