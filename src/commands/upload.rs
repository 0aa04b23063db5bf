//! `jiragen upload` command: markdown document in, Jira issues out.

use std::fmt::Write as _;
use std::path::Path;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::markdown;
use crate::model::TicketStructure;
use crate::ports::tracker::IssueTracker;

/// Keys of the issues created by one upload.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadReport {
    /// Created epic keys, in order.
    pub epics: Vec<String>,
    /// Created task keys, in order.
    pub tasks: Vec<String>,
    /// Created bug keys, in order.
    pub bugs: Vec<String>,
    /// Created story keys, in order.
    pub stories: Vec<String>,
}

impl UploadReport {
    /// Total number of created issues.
    #[must_use]
    pub fn total(&self) -> usize {
        self.epics.len() + self.tasks.len() + self.bugs.len() + self.stories.len()
    }

    /// Human-readable listing of created keys, one kind per line.
    #[must_use]
    pub fn format(&self) -> String {
        let mut out = String::new();
        for (label, keys) in [
            ("Epics", &self.epics),
            ("Tasks", &self.tasks),
            ("Bugs", &self.bugs),
            ("Stories", &self.stories),
        ] {
            if !keys.is_empty() {
                let _ = writeln!(out, "  {label}: {}", keys.join(", "));
            }
        }
        out
    }
}

/// Walks a structure and creates every record in the tracker: epics first,
/// each followed by its parent-linked tasks, then bugs, then stories.
///
/// Single attempt per record; the first failure aborts the walk and is
/// surfaced as-is.
///
/// # Errors
///
/// Returns an error string naming the record whose creation failed.
pub async fn upload_structure(
    tracker: &dyn IssueTracker,
    structure: &TicketStructure,
) -> Result<UploadReport, String> {
    let mut report = UploadReport::default();
    let project_key = &structure.project_key;

    for epic in &structure.epics {
        let epic_key = tracker
            .create_epic(project_key, epic)
            .await
            .map_err(|e| format!("Failed to create epic '{}': {e}", epic.title))?;
        report.epics.push(epic_key.clone());

        for task in &epic.tasks {
            let task_key = tracker
                .create_task(project_key, task, Some(&epic_key))
                .await
                .map_err(|e| format!("Failed to create task '{}': {e}", task.title))?;
            report.tasks.push(task_key);
        }
    }

    for bug in &structure.bugs {
        let key = tracker
            .create_bug(project_key, bug)
            .await
            .map_err(|e| format!("Failed to create bug '{}': {e}", bug.summary))?;
        report.bugs.push(key);
    }

    for story in &structure.stories {
        let key = tracker
            .create_story(project_key, story)
            .await
            .map_err(|e| format!("Failed to create story '{}': {e}", story.title))?;
        report.stories.push(key);
    }

    Ok(report)
}

/// Execute the `upload` command.
///
/// # Errors
///
/// Returns an error string when the configuration is invalid, no document
/// can be located, the document fails to parse, or an issue creation fails.
pub fn run(config: &Config, file: Option<&Path>, dir: &Path) -> Result<(), String> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(format!("Configuration errors:\n  - {}", errors.join("\n  - ")));
    }

    let ctx = ServiceContext::live(config);
    run_with_context(&ctx, file, dir)
}

/// Parses the selected document and uploads it over an already-built
/// context.
///
/// # Errors
///
/// Same conditions as [`run`], minus configuration validation.
pub fn run_with_context(
    ctx: &ServiceContext,
    file: Option<&Path>,
    dir: &Path,
) -> Result<(), String> {
    let path = match file {
        Some(path) => path.to_path_buf(),
        None => markdown::latest_document(ctx.fs.as_ref(), dir)?
            .ok_or_else(|| format!("No ticket documents found in {}", dir.display()))?,
    };

    let content = ctx
        .fs
        .read_to_string(&path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let parsed = markdown::parse(&content)
        .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;

    for skipped in &parsed.skipped {
        tracing::warn!(
            heading = %skipped.heading,
            reason = %skipped.reason,
            "skipping malformed record section"
        );
    }
    if !parsed.skipped.is_empty() {
        println!("Warning: {} malformed section(s) skipped", parsed.skipped.len());
    }

    let structure = parsed.structure;
    if !structure.has_content() {
        return Err(format!("No records recovered from {}", path.display()));
    }

    println!(
        "Uploading {} item(s) to project {}",
        structure.count_total_items(),
        structure.project_key
    );

    let report =
        super::runtime()?.block_on(upload_structure(ctx.tracker.as_ref(), &structure))?;
    println!("Upload complete ({} issue(s)):", report.total());
    print!("{}", report.format());
    Ok(())
}
