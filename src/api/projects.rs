//! Project Endpoints

use serde::Serialize;
use smarttask_core::{Column, Project};

use super::{delete_ack, get_json, post_json, put_json, ApiError};

#[derive(Serialize)]
pub struct CreateProjectArgs<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub priority: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kanban_template: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kanban_columns: Option<&'a [Column]>,
}

#[derive(Serialize)]
pub struct UpdateProjectArgs<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kanban_template: Option<&'a str>,
}

pub async fn list_projects() -> Result<Vec<Project>, ApiError> {
    get_json("/projects").await
}

pub async fn create_project(args: &CreateProjectArgs<'_>) -> Result<Project, ApiError> {
    post_json("/projects", args).await
}

pub async fn update_project(id: u32, args: &UpdateProjectArgs<'_>) -> Result<Project, ApiError> {
    put_json(&format!("/projects/{}", id), args).await
}

pub async fn delete_project(id: u32) -> Result<(), ApiError> {
    delete_ack(&format!("/projects/{}", id)).await
}
