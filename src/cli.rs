//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::IssueType;

/// Top-level CLI parser for `jiragen`.
#[derive(Debug, Parser)]
#[command(name = "jiragen", version, about = "Turn unstructured text into Jira tickets")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract tickets from text and write an editable markdown document.
    Generate {
        /// Input text file; reads stdin when omitted.
        input: Option<PathBuf>,
        /// Project key (e.g. PROJ); falls back to DEFAULT_PROJECT_KEY.
        #[arg(short, long)]
        project: Option<String>,
        /// Jira issue type to generate.
        #[arg(short = 't', long, default_value = "task")]
        issue_type: IssueType,
        /// Directory the markdown document is written to.
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
        /// Skip the review pass (faster, lower quality).
        #[arg(long)]
        skip_review: bool,
    },
    /// Parse a markdown document and upload its tickets to Jira.
    Upload {
        /// Document to upload; defaults to the newest one in --dir.
        file: Option<PathBuf>,
        /// Directory searched for documents.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// List generated markdown documents, newest first.
    List {
        /// Directory searched for documents.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Validate configuration.
    Check {
        /// Also probe the Jira API with the configured credentials.
        #[arg(long)]
        connect: bool,
    },
}
