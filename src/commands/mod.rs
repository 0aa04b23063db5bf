//! Command dispatch and handlers.

pub mod check;
pub mod generate;
pub mod list;
pub mod upload;

use crate::cli::Command;
use crate::config::Config;

/// Dispatch a parsed command to its handler.
///
/// Configuration is loaded once here and passed down explicitly; nothing
/// below this point reads the environment.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = Config::from_env();
    match command {
        Command::Generate { input, project, issue_type, output_dir, skip_review } => {
            generate::run(
                &config,
                input.as_deref(),
                project.as_deref(),
                *issue_type,
                output_dir,
                *skip_review,
            )
        }
        Command::Upload { file, dir } => upload::run(&config, file.as_deref(), dir),
        Command::List { dir } => list::run(dir),
        Command::Check { connect } => check::run(&config, *connect),
    }
}

/// Builds the single-threaded runtime the handlers use to drive the
/// collaborator futures.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))
}
