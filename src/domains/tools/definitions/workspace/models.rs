//! Workspace member and collection payloads.

use serde::{Deserialize, Serialize};

use super::super::projects::models::UserRef;

/// A workspace member as returned by `/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// A project collection as returned by `/collections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<UserRef>,
}

impl User {
    pub fn summary_line(&self) -> String {
        let name = self.name.as_deref().unwrap_or("(no name)");
        let mut line = format!("- {} (ID: {})", name, self.id);
        if let Some(email) = &self.email {
            line.push_str(&format!(" <{}>", email));
        }
        if let Some(role) = &self.role {
            line.push_str(&format!(" [{}]", role));
        }
        line
    }
}

impl Collection {
    pub fn summary_line(&self) -> String {
        let mut line = format!("- {} (ID: {})", self.name, self.id);
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            line.push_str(&format!(": {}", description));
        }
        line
    }
}
