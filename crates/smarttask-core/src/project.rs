//! Project Entity
//!
//! A project owns tasks and defines the board layout through an explicit
//! column list or a named workflow template.

use serde::{Deserialize, Serialize};

use crate::column::{default_columns, template_columns, Column};
use crate::entity::Entity;

/// Project priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }
}

/// A project record mirrored from the backend (id 0 = unsaved placeholder)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub kanban_template: Option<String>,
    #[serde(default)]
    pub kanban_columns: Option<Vec<Column>>,
}

impl Project {
    /// Placeholder for an optimistic insert, before the backend assigns an id
    pub fn draft(title: &str, description: &str, priority: Priority) -> Self {
        Self {
            id: 0,
            title: title.to_string(),
            description: description.to_string(),
            creation_date: None,
            completion_date: None,
            priority,
            kanban_template: None,
            kanban_columns: None,
        }
    }

    /// The board columns for this project.
    ///
    /// Single source of truth for status validation: explicit columns win,
    /// then the named template, then the four default statuses.
    pub fn columns(&self) -> Vec<Column> {
        if let Some(columns) = &self.kanban_columns {
            if !columns.is_empty() {
                return columns.clone();
            }
        }
        if let Some(template) = &self.kanban_template {
            if let Some(columns) = template_columns(template) {
                return columns;
            }
        }
        default_columns()
    }
}

impl Entity for Project {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}
