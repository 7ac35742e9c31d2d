//! Command implementations for the MPCORB processor CLI
//!
//! Each command lives in its own module; shared setup and reporting are in
//! [`shared`], and batched parallel decoding in [`parallel_processor`].

pub mod list;
pub mod parallel_processor;
pub mod shared;
pub mod validate;

pub use parallel_processor::{ParallelDecodeResult, ParallelDecoder};
pub use shared::ProcessingStats;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `list`: decode and print records
/// - `validate`: decode and report failures
pub async fn run(args: Args) -> Result<ProcessingStats> {
    match args.command {
        Some(Commands::List(list_args)) => list::run_list(list_args).await,
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args).await,
        None => Err(Error::configuration("No command specified")),
    }
}
