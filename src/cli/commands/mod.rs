//! CLI command dispatch and handlers.
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod drill;
pub mod scenarios;
pub mod serve;
pub mod version;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands};
use crate::error::SiemulateError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// The cancellation token reaches the long-running commands (`serve`,
/// `drill`) so a first interrupt signal winds them down cleanly.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), SiemulateError> {
    match cli.command {
        Commands::Serve(args) => serve::run(&args, cancel).await,
        Commands::Drill(args) => drill::run(&args, cancel).await,
        Commands::Scenarios(args) => scenarios::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
