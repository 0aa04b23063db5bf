//! Issue tracker port for creating Jira issues.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use crate::model::{Bug, Epic, Task, UserStory};

/// Boxed future type alias used by [`IssueTracker`]; resolves to the created
/// issue key (e.g. `PROJ-42`).
pub type TrackerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Creates issues in an external tracker.
///
/// One record per call, single attempt; a transport failure is surfaced
/// as-is to the caller. Abstracting the tracker lets the upload walk be
/// tested without a network.
pub trait IssueTracker: Send + Sync {
    /// Creates an epic and returns its assigned key.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be created.
    fn create_epic(&self, project_key: &str, epic: &Epic) -> TrackerFuture<'_>;

    /// Creates a task, linked under `parent_key` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be created.
    fn create_task(
        &self,
        project_key: &str,
        task: &Task,
        parent_key: Option<&str>,
    ) -> TrackerFuture<'_>;

    /// Creates a bug and returns its assigned key.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be created.
    fn create_bug(&self, project_key: &str, bug: &Bug) -> TrackerFuture<'_>;

    /// Creates a user story and returns its assigned key.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be created.
    fn create_story(&self, project_key: &str, story: &UserStory) -> TrackerFuture<'_>;
}
