//! Shared in-memory fakes for unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::context::ServiceContext;
use crate::model::{Bug, Epic, Task, UserStory};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::{CompletionResponse, LlmClient, LlmFuture};
use crate::ports::tracker::{IssueTracker, TrackerFuture};

/// In-memory filesystem with seedable modification times.
pub(crate) struct MemFs {
    files: Mutex<HashMap<PathBuf, (String, i64)>>,
}

impl MemFs {
    pub(crate) fn new() -> Self {
        Self { files: Mutex::new(HashMap::new()) }
    }

    /// Seeds a file with contents and a modification time (seconds).
    pub(crate) fn seed(&self, path: &str, contents: &str, mtime: i64) {
        let mut files = self.files.lock().unwrap();
        files.insert(PathBuf::from(path), (contents.to_string(), mtime));
    }
}

impl FileSystem for MemFs {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().unwrap();
        files
            .get(path)
            .map(|(c, _)| c.clone())
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut files = self.files.lock().unwrap();
        let mtime = files.values().map(|(_, m)| *m).max().unwrap_or(0) + 1;
        files.insert(path.to_path_buf(), (contents.to_string(), mtime));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.contains_key(path) || files.keys().any(|k| k.starts_with(path) && k != path)
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().unwrap();
        let mut names: Vec<String> = files
            .keys()
            .filter_map(|k| {
                if k.parent() == Some(path) {
                    k.file_name().map(|n| n.to_string_lossy().into_owned())
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        Ok(names)
    }

    fn modified(
        &self,
        path: &Path,
    ) -> Result<DateTime<Utc>, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().unwrap();
        let (_, mtime) = files
            .get(path)
            .ok_or_else(|| format!("File not found: {}", path.display()))?;
        Ok(Utc.timestamp_opt(*mtime, 0).unwrap())
    }
}

/// Clock that always returns the same instant.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl FixedClock {
    pub(crate) fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Self(Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// LLM fake that replays a canned reply or always fails.
pub(crate) enum FakeLlm {
    Replying(String),
    Failing,
}

impl FakeLlm {
    pub(crate) fn replying(text: &str) -> Self {
        Self::Replying(text.to_string())
    }

    pub(crate) fn failing() -> Self {
        Self::Failing
    }
}

impl LlmClient for FakeLlm {
    fn complete(&self, _request: &crate::ports::llm::CompletionRequest) -> LlmFuture<'_> {
        Box::pin(async move {
            match self {
                Self::Replying(text) => Ok(CompletionResponse {
                    text: text.clone(),
                    prompt_tokens: 10,
                    completion_tokens: 20,
                }),
                Self::Failing => Err("simulated completion failure".into()),
            }
        })
    }
}

/// Issue-tracker fake that assigns sequential keys and records every
/// created issue. `fail_on_title` makes the matching create call fail.
pub(crate) struct FakeTracker {
    pub(crate) log: Arc<Mutex<Vec<String>>>,
    fail_on_title: Option<String>,
}

impl FakeTracker {
    pub(crate) fn new() -> Self {
        Self { log: Arc::new(Mutex::new(Vec::new())), fail_on_title: None }
    }

    pub(crate) fn failing_on(title: &str) -> Self {
        Self { log: Arc::new(Mutex::new(Vec::new())), fail_on_title: Some(title.to_string()) }
    }

    fn create(
        &self,
        project_key: &str,
        kind: &str,
        title: &str,
        parent: Option<&str>,
    ) -> TrackerFuture<'_> {
        let project_key = project_key.to_string();
        let kind = kind.to_string();
        let title = title.to_string();
        let parent = parent.map(str::to_string);
        Box::pin(async move {
            if self.fail_on_title.as_deref() == Some(title.as_str()) {
                return Err("simulated transport failure".into());
            }
            let mut log = self.log.lock().unwrap();
            let key = format!("{project_key}-{}", log.len() + 1);
            match parent {
                Some(parent) => log.push(format!("{kind} {key} (parent {parent}): {title}")),
                None => log.push(format!("{kind} {key}: {title}")),
            }
            Ok(key)
        })
    }
}

impl IssueTracker for FakeTracker {
    fn create_epic(&self, project_key: &str, epic: &Epic) -> TrackerFuture<'_> {
        self.create(project_key, "Epic", &epic.title, None)
    }

    fn create_task(
        &self,
        project_key: &str,
        task: &Task,
        parent_key: Option<&str>,
    ) -> TrackerFuture<'_> {
        self.create(project_key, "Task", &task.title, parent_key)
    }

    fn create_bug(&self, project_key: &str, bug: &Bug) -> TrackerFuture<'_> {
        self.create(project_key, "Bug", &bug.summary, None)
    }

    fn create_story(&self, project_key: &str, story: &UserStory) -> TrackerFuture<'_> {
        self.create(project_key, "Story", &story.title, None)
    }
}

/// Builds a context over in-memory adapters: fixed clock, the given
/// filesystem, an optional LLM fake, and a recording tracker.
pub(crate) fn test_context(fs: MemFs, llm: Option<Box<dyn LlmClient>>) -> ServiceContext {
    ServiceContext {
        clock: Box::new(FixedClock::at(2024, 6, 15, 10, 30, 0)),
        fs: Box::new(fs),
        llm,
        tracker: Box::new(FakeTracker::new()),
    }
}

/// Like [`test_context`] but with a caller-supplied tracker.
pub(crate) fn test_context_with_tracker(
    fs: MemFs,
    tracker: Box<dyn IssueTracker>,
) -> ServiceContext {
    ServiceContext {
        clock: Box::new(FixedClock::at(2024, 6, 15, 10, 30, 0)),
        fs: Box::new(fs),
        llm: None,
        tracker,
    }
}
