//! GitHub daily activity -> `_data/work.yml`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rules::{FieldRule, RecordSource, truncate};

/// Tracker prefix of the GitHub activity export
pub const SOURCE: &str = "github_daily";

/// Output file name inside `_data/`
pub const OUTPUT: &str = "work.yml";

const EVENTS: RecordSource = RecordSource::new(&["events", "activity"]);
const REPO: FieldRule = FieldRule::new("repo", &["repo", "repository", "repo_name", "name"]);
const COMMITS: FieldRule = FieldRule::new("commits", &["commits", "count"]);

/// Commit totals for the site's activity widget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkActivity {
    /// Commits across all repositories
    pub commits: i64,
    /// Distinct repositories touched
    pub repos: i64,
}

/// Aggregate an activity export; `None` when its shape is not recognized.
///
/// Events without a repository name are ignored. An event without a commit
/// count counts as one commit.
pub fn normalize(export: &Value) -> Option<WorkActivity> {
    let events = EVENTS.objects(export)?;

    let mut per_repo: BTreeMap<String, i64> = BTreeMap::new();
    for event in events {
        let Some(repo) = REPO.value(event).and_then(Value::as_str) else {
            continue;
        };
        let commits = COMMITS.number(event).map(truncate).unwrap_or(1);
        let total = per_repo.entry(repo.trim().to_string()).or_default();
        *total = total.saturating_add(commits);
        tracing::debug!("{}: +{} commits", repo.trim(), commits);
    }

    Some(WorkActivity {
        commits: per_repo.values().fold(0, |acc, n| acc.saturating_add(*n)),
        repos: per_repo.len() as i64,
    })
}
