//! Kanban Columns and Workflow Templates
//!
//! A column is one lane of the board; a template is a named preset of
//! columns applied to a project at creation time.

use serde::{Deserialize, Serialize};

/// One lane of the kanban board. The id doubles as a task status value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub icon: String,
}

impl Column {
    pub fn new(id: &str, title: &str, color: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Template identifiers with display names, in picker order
pub const TEMPLATE_NAMES: &[(&str, &str)] = &[
    ("default", "Default"),
    ("architecture", "Architecture"),
    ("systems_engineering", "Systems Engineering"),
];

type ColumnDef = (&'static str, &'static str, &'static str, &'static str);

const DEFAULT_COLUMNS: &[ColumnDef] = &[
    ("pending", "Pending", "#ffc107", "\u{1F4CB}"),
    ("in_progress", "In Progress", "#007bff", "\u{1F504}"),
    ("completed", "Completed", "#28a745", "\u{2705}"),
    ("cancelled", "Cancelled", "#6c757d", "\u{274C}"),
];

const ARCHITECTURE_COLUMNS: &[ColumnDef] = &[
    ("requirements", "Requirements", "#e91e63", "\u{1F4DD}"),
    ("design", "Design", "#9c27b0", "\u{1F3A8}"),
    ("construction", "Construction", "#2196f3", "\u{1F3D7}"),
    ("validation", "Validation", "#4caf50", "\u{2714}"),
];

const SYSTEMS_ENGINEERING_COLUMNS: &[ColumnDef] = &[
    ("todo", "To Do", "#ff9800", "\u{1F4CC}"),
    ("in_progress", "In Progress", "#03a9f4", "\u{2699}"),
    ("review", "In Review", "#ff5722", "\u{1F50D}"),
    ("completed", "Completed", "#8bc34a", "\u{2705}"),
];

fn build(defs: &[ColumnDef]) -> Vec<Column> {
    defs.iter()
        .map(|(id, title, color, icon)| Column::new(id, title, color, icon))
        .collect()
}

/// Columns for a named workflow template, or None for an unknown name
pub fn template_columns(name: &str) -> Option<Vec<Column>> {
    match name {
        "default" => Some(build(DEFAULT_COLUMNS)),
        "architecture" => Some(build(ARCHITECTURE_COLUMNS)),
        "systems_engineering" => Some(build(SYSTEMS_ENGINEERING_COLUMNS)),
        _ => None,
    }
}

/// The four standard statuses used when a project defines no columns
pub fn default_columns() -> Vec<Column> {
    build(DEFAULT_COLUMNS)
}
