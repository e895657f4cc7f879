//! `scenarios` command handler.
//!
//! Prints the built-in scenario catalog, optionally filtered by
//! difficulty, in human or JSON form.

use crate::catalog;
use crate::cli::args::{OutputFormat, ScenariosArgs};
use crate::error::SiemulateError;

/// List the built-in training scenarios.
///
/// # Errors
///
/// Returns a JSON error if the catalog fails to serialize.
pub fn run(args: &ScenariosArgs) -> Result<(), SiemulateError> {
    let entries = catalog::list(args.difficulty);

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No scenarios match the given difficulty.");
                return Ok(());
            }

            let total = entries.len();
            println!("Built-in Scenarios ({total} available)\n");

            for info in entries {
                println!(
                    "  {:<24}{} ({}, {} events)",
                    info.scenario_id, info.name, info.difficulty, info.total_events
                );
                println!("      {}", info.description);
            }

            println!();
            println!("Start one: siemulate drill --scenario <id>");
        }
    }

    Ok(())
}
