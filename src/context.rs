//! Service context bundling port trait objects.

use crate::adapters::live::{JiraClient, LiveClock, LiveFileSystem, LiveLlmClient};
use crate::config::Config;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::LlmClient;
use crate::ports::tracker::IssueTracker;

/// Bundles all port trait objects into a single context.
///
/// Constructed once at the command boundary from the loaded [`Config`];
/// tests build one from in-memory fakes instead.
pub struct ServiceContext {
    /// Clock for timestamped filenames.
    pub clock: Box<dyn Clock>,
    /// Filesystem for document I/O.
    pub fs: Box<dyn FileSystem>,
    /// Text-generation client; `None` runs extraction in fallback mode.
    pub llm: Option<Box<dyn LlmClient>>,
    /// Issue tracker for uploads.
    pub tracker: Box<dyn IssueTracker>,
}

impl ServiceContext {
    /// Creates a live context from the configuration.
    ///
    /// The LLM provider is resolved here, once; when no provider is usable
    /// the extraction agent runs in deterministic fallback mode.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            llm: config
                .provider()
                .map(|provider| Box::new(LiveLlmClient::new(provider)) as Box<dyn LlmClient>),
            tracker: Box::new(JiraClient::new(
                &config.jira_url,
                &config.jira_email,
                &config.jira_api_token,
            )),
        }
    }
}
