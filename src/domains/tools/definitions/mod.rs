//! Tool definitions, grouped by the part of the Hex API they cover.
//!
//! Each tool lives in its own file and each group directory provides the
//! [`ToolGroup`](super::ToolGroup) that routes calls to its tools.

pub mod common;
pub mod projects;
pub mod runs;
pub mod workspace;

pub use projects::{GetProjectTool, ListProjectsTool, ProjectTools};
pub use runs::{CancelRunTool, GetRunStatusTool, ListRunsTool, RunProjectTool, RunTools};
pub use workspace::{ListCollectionsTool, ListUsersTool, WorkspaceTools};
