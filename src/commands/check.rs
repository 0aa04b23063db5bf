//! `jiragen check` command: validate configuration.

use crate::adapters::live::JiraClient;
use crate::config::{Config, LlmProvider};

/// Execute the `check` command. With `connect`, also probes the Jira API
/// using the configured credentials.
///
/// # Errors
///
/// Returns an error string listing every configuration problem, or the
/// connection failure when the probe fails.
pub fn run(config: &Config, connect: bool) -> Result<(), String> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(format!(
            "Configuration validation failed:\n  - {}",
            errors.join("\n  - ")
        ));
    }

    println!("Configuration is valid");
    println!("  Jira URL: {}", config.jira_url);
    println!("  Jira email: {}", config.jira_email);
    println!(
        "  Project key: {}",
        config.default_project.as_deref().unwrap_or("(not set)")
    );
    println!("  LLM provider: {}", config.llm_provider);
    match config.provider() {
        Some(
            LlmProvider::Anthropic { model, .. }
            | LlmProvider::OpenAi { model, .. }
            | LlmProvider::Ollama { model, .. },
        ) => println!("  LLM model: {model}"),
        None => println!("  LLM: not configured (extraction runs in fallback mode)"),
    }

    if connect {
        let client =
            JiraClient::new(&config.jira_url, &config.jira_email, &config.jira_api_token);
        super::runtime()?
            .block_on(client.test_connection())
            .map_err(|e| format!("Jira connection check failed: {e}"))?;
        println!("  Jira connection: ok");
    }

    Ok(())
}
