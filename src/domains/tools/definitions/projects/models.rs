//! Hex project payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::common::format_timestamp;

/// A Hex project as returned by `/projects` and `/projects/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "projectId")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub project_type: Option<String>,
    #[serde(default)]
    pub creator: Option<UserRef>,
    #[serde(default)]
    pub owner: Option<UserRef>,
    #[serde(default)]
    pub status: Option<NamedRef>,
    #[serde(default)]
    pub categories: Vec<NamedRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub trashed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Project {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled project")
    }

    /// One line for list output.
    pub fn summary_line(&self) -> String {
        let mut line = format!("- {} (ID: {})", self.display_title(), self.id);
        if let Some(status) = &self.status {
            line.push_str(&format!(" [{}]", status.name));
        }
        if self.archived_at.is_some() {
            line.push_str(" [archived]");
        }
        if self.trashed_at.is_some() {
            line.push_str(" [trashed]");
        }
        line
    }

    /// Multi-line detail view.
    pub fn details(&self) -> String {
        let mut out = format!("Project: {}\nID: {}\n", self.display_title(), self.id);

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("Description: {}\n", description));
        }
        if let Some(kind) = &self.project_type {
            out.push_str(&format!("Type: {}\n", kind));
        }
        if let Some(status) = &self.status {
            out.push_str(&format!("Status: {}\n", status.name));
        }
        if let Some(email) = self.owner.as_ref().and_then(|o| o.email.as_deref()) {
            out.push_str(&format!("Owner: {}\n", email));
        }
        if let Some(email) = self.creator.as_ref().and_then(|c| c.email.as_deref()) {
            out.push_str(&format!("Creator: {}\n", email));
        }
        if !self.categories.is_empty() {
            let names: Vec<_> = self.categories.iter().map(|c| c.name.as_str()).collect();
            out.push_str(&format!("Categories: {}\n", names.join(", ")));
        }

        out.push_str(&format!(
            "Created: {}\nLast edited: {}\nLast published: {}",
            format_timestamp(self.created_at.as_ref()),
            format_timestamp(self.last_edited_at.as_ref()),
            format_timestamp(self.last_published_at.as_ref()),
        ));

        if self.archived_at.is_some() {
            out.push_str(&format!(
                "\nArchived: {}",
                format_timestamp(self.archived_at.as_ref())
            ));
        }
        out
    }
}
