//! Task Entity
//!
//! A task belongs to one project; its status must name one of the project's
//! board columns.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// A task record mirrored from the backend (id 0 = unsaved placeholder)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub completion_date: Option<String>,
    #[serde(rename = "projectId", alias = "project_id", default)]
    pub project_id: u32,
}

impl Task {
    /// Placeholder for an optimistic insert, before the backend assigns an id
    pub fn draft(title: &str, description: &str, status: &str, project_id: u32) -> Self {
        Self {
            id: 0,
            title: title.to_string(),
            description: description.to_string(),
            status: status.to_string(),
            creation_date: None,
            completion_date: None,
            project_id,
        }
    }
}

impl Entity for Task {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}
