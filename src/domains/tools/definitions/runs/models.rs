//! Hex project run payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::common::format_timestamp;

/// Lifecycle state of a project run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Pending,
    Running,
    Errored,
    Completed,
    Killed,
    UnableToAllocateKernel,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Statuses accepted by the `statusFilter` query parameter.
    pub const FILTERS: [&'static str; 6] = [
        "PENDING",
        "RUNNING",
        "ERRORED",
        "COMPLETED",
        "KILLED",
        "UNABLE_TO_ALLOCATE_KERNEL",
    ];

    /// Whether the run can still change state.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Errored => "ERRORED",
            Self::Completed => "COMPLETED",
            Self::Killed => "KILLED",
            Self::UnableToAllocateKernel => "UNABLE_TO_ALLOCATE_KERNEL",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Response of `POST /projects/{id}/runs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunLaunch {
    pub project_id: String,
    pub run_id: String,
    #[serde(default)]
    pub run_url: Option<String>,
    #[serde(default)]
    pub run_status_url: Option<String>,
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub project_version: Option<u64>,
}

/// Response of `GET /projects/{id}/runs/{runId}`, also used in run lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInfo {
    pub project_id: String,
    pub run_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub run_url: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Milliseconds.
    #[serde(default)]
    pub elapsed_time: Option<f64>,
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub project_version: Option<u64>,
}

/// Response of `GET /projects/{id}/runs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunList {
    #[serde(default)]
    pub runs: Vec<RunInfo>,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub previous_page: Option<String>,
}

impl RunInfo {
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "- {} [{}] started {}",
            self.run_id,
            self.status,
            format_timestamp(self.start_time.as_ref())
        );
        if let Some(elapsed) = self.elapsed_time {
            line.push_str(&format!(", took {:.1}s", elapsed / 1000.0));
        }
        line
    }

    pub fn details(&self) -> String {
        let mut out = format!(
            "Run {} of project {}\nStatus: {}\nStarted: {}\nEnded: {}",
            self.run_id,
            self.project_id,
            self.status,
            format_timestamp(self.start_time.as_ref()),
            format_timestamp(self.end_time.as_ref()),
        );
        if let Some(elapsed) = self.elapsed_time {
            out.push_str(&format!("\nElapsed: {:.1}s", elapsed / 1000.0));
        }
        if let Some(version) = self.project_version {
            out.push_str(&format!("\nProject version: {}", version));
        }
        if let Some(url) = &self.run_url {
            out.push_str(&format!("\nURL: {}", url));
        }
        if self.status.is_active() {
            out.push_str("\nThe run is still in progress; check again later.");
        }
        out
    }
}
