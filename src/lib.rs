//! Core library for the `jiragen` CLI.
//!
//! Turns unstructured text into structured Jira ticket records, round-trips
//! them through a human-editable markdown document, and uploads them to
//! Jira. The serializer/parser pair in [`markdown`] is the heart of the
//! crate; generation, review, and upload are collaborators behind the port
//! traits in [`ports`].

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod extract;
pub mod markdown;
pub mod model;
pub mod ports;
pub mod review;

#[cfg(test)]
pub(crate) mod testing;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution
/// fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
