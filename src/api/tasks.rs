//! Task Endpoints

use serde::Serialize;
use smarttask_core::Task;

use super::{delete_ack, get_json, post_json, put_json, ApiError};

#[derive(Serialize)]
pub struct CreateTaskArgs<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<&'a str>,
    #[serde(rename = "projectId")]
    pub project_id: u32,
}

/// Full task payload for PUT /tasks/{id}; the backend expects every field
#[derive(Serialize)]
pub struct UpdateTaskArgs<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<&'a str>,
    #[serde(rename = "projectId")]
    pub project_id: u32,
}

impl<'a> UpdateTaskArgs<'a> {
    /// Payload for a status-only change, keeping the task's other fields
    pub fn status_change(task: &'a Task, status: &'a str) -> Self {
        Self {
            title: &task.title,
            description: &task.description,
            status,
            completion_date: task.completion_date.as_deref(),
            creation_date: task.creation_date.as_deref(),
            project_id: task.project_id,
        }
    }
}

pub async fn list_tasks_by_project(project_id: u32) -> Result<Vec<Task>, ApiError> {
    get_json(&format!("/tasks/project/{}", project_id)).await
}

pub async fn create_task(args: &CreateTaskArgs<'_>) -> Result<Task, ApiError> {
    post_json("/tasks", args).await
}

pub async fn update_task(id: u32, args: &UpdateTaskArgs<'_>) -> Result<Task, ApiError> {
    put_json(&format!("/tasks/{}", id), args).await
}

pub async fn delete_task(id: u32) -> Result<(), ApiError> {
    delete_ack(&format!("/tasks/{}", id)).await
}
