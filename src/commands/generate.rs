//! `jiragen generate` command: text in, markdown document out.

use std::io::Read as _;
use std::path::Path;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::extract::ExtractionAgent;
use crate::markdown;
use crate::model::IssueType;
use crate::review::ReviewAgent;

/// Execute the `generate` command.
///
/// # Errors
///
/// Returns an error string when the configuration is invalid, no project
/// key is available, the input is empty or unreadable, or extraction fails.
pub fn run(
    config: &Config,
    input: Option<&Path>,
    project: Option<&str>,
    issue_type: IssueType,
    output_dir: &Path,
    skip_review: bool,
) -> Result<(), String> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(format!("Configuration errors:\n  - {}", errors.join("\n  - ")));
    }

    let project_key = project
        .map(str::to_string)
        .or_else(|| config.default_project.clone())
        .ok_or("Project key required (use --project or set DEFAULT_PROJECT_KEY)")?;

    let text = read_input(input)?;
    if text.trim().is_empty() {
        return Err("Input text is empty".to_string());
    }

    let ctx = ServiceContext::live(config);
    run_with_context(&ctx, &text, &project_key, issue_type, output_dir, skip_review)
}

/// Runs extraction, the optional review pass, and document generation over
/// an already-built context.
///
/// # Errors
///
/// Returns an error string when extraction yields no records or the
/// document cannot be written.
pub fn run_with_context(
    ctx: &ServiceContext,
    text: &str,
    project_key: &str,
    issue_type: IssueType,
    output_dir: &Path,
    skip_review: bool,
) -> Result<(), String> {
    println!("Issue type: {issue_type}");
    println!("Project: {project_key}");
    println!("Input length: {} characters", text.chars().count());

    let runtime = super::runtime()?;

    let agent = ExtractionAgent::new(ctx, issue_type);
    let structure = runtime.block_on(agent.extract(text, project_key))?;
    if !structure.has_content() {
        return Err("No tickets extracted from input".to_string());
    }

    println!("\nExtraction complete: {} item(s)", structure.count_total_items());
    if !structure.epics.is_empty() {
        let tasks: usize = structure.epics.iter().map(|e| e.tasks.len()).sum();
        println!("  Epics: {}", structure.epics.len());
        println!("  Tasks: {tasks}");
    }
    if !structure.bugs.is_empty() {
        println!("  Bugs: {}", structure.bugs.len());
    }
    if !structure.stories.is_empty() {
        println!("  Stories: {}", structure.stories.len());
    }

    if skip_review {
        println!("\nReview skipped.");
    } else {
        let report = runtime.block_on(ReviewAgent::new(ctx).review(&structure));
        println!("\nReview:");
        print!("{report}");
    }

    // The structure's own tag, not the requested one: fallback extraction
    // is always task-shaped.
    let filename = markdown::document_filename(
        &structure.project_key,
        structure.issue_type,
        ctx.clock.now(),
    );
    let path = output_dir.join(filename);
    ctx.fs
        .write(&path, &markdown::render(&structure))
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;

    println!("\nWrote {}", path.display());
    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String, String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            Ok(text)
        }
    }
}
