//! Voice Intent Model
//!
//! Wire shape of the remote intent classifier's response and its mapping
//! into a closed action enum. The backend is untrusted: unrecognized action
//! strings become `Unknown` instead of passing through.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Task fields the classifier may extract from the transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "projectId", alias = "project_id", default)]
    pub project_id: Option<u32>,
    #[serde(rename = "projectName", alias = "project_name", default)]
    pub project_name: Option<String>,
    #[serde(rename = "completionDate", alias = "completion_date", default)]
    pub completion_date: Option<String>,
}

/// Project fields the classifier may extract from the transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

/// Search filters for the searchTasks action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "searchTerm", alias = "search_term", default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "projectId", alias = "project_id", default)]
    pub project_id: Option<u32>,
}

impl SearchParams {
    /// Case-insensitive term match against title/description, exact status
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(term) = &self.search_term {
            let term = term.to_lowercase();
            if !task.title.to_lowercase().contains(&term)
                && !task.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if &task.status != status {
                return false;
            }
        }
        true
    }
}

/// Raw response from POST /speech/process-voice-text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceIntentResponse {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "taskDetails", default)]
    pub task_details: Option<TaskDetails>,
    #[serde(rename = "projectDetails", default)]
    pub project_details: Option<ProjectDetails>,
    #[serde(rename = "searchResults", default)]
    pub search_results: Option<Vec<Task>>,
    #[serde(rename = "searchParams", default)]
    pub search_params: Option<SearchParams>,
}

/// Closed set of actions the client dispatches on
#[derive(Debug, Clone, PartialEq)]
pub enum IntentAction {
    CreateTask(TaskDetails),
    CreateProject(ProjectDetails),
    SearchTasks {
        results: Vec<Task>,
        params: Option<SearchParams>,
    },
    Error(String),
    /// Missing or unrecognized action string; carries the backend message
    Unknown(Option<String>),
}

impl VoiceIntentResponse {
    pub fn classify(self) -> IntentAction {
        match self.action.as_deref() {
            Some("createTask") => IntentAction::CreateTask(self.task_details.unwrap_or_default()),
            Some("createProject") => {
                IntentAction::CreateProject(self.project_details.unwrap_or_default())
            }
            Some("searchTasks") => IntentAction::SearchTasks {
                results: self.search_results.unwrap_or_default(),
                params: self.search_params,
            },
            Some("error") => IntentAction::Error(
                self.message
                    .unwrap_or_else(|| "The assistant reported an error.".to_string()),
            ),
            _ => IntentAction::Unknown(self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_action() {
        let response: VoiceIntentResponse = serde_json::from_str(
            r#"{"action":"createTask","message":"Done","taskDetails":{"title":"Write report"}}"#,
        )
        .expect("valid response");

        match response.classify() {
            IntentAction::CreateTask(details) => {
                assert_eq!(details.title.as_deref(), Some("Write report"));
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_action_string_is_not_passed_through() {
        let response: VoiceIntentResponse =
            serde_json::from_str(r#"{"action":"rebootServer","message":"done"}"#)
                .expect("valid response");
        assert_eq!(
            response.classify(),
            IntentAction::Unknown(Some("done".to_string()))
        );
    }

    #[test]
    fn test_missing_action_is_unknown() {
        let response: VoiceIntentResponse =
            serde_json::from_str(r#"{"message":"Here is some info"}"#).expect("valid response");
        assert_eq!(
            response.classify(),
            IntentAction::Unknown(Some("Here is some info".to_string()))
        );
    }

    #[test]
    fn test_error_action_keeps_backend_message() {
        let response: VoiceIntentResponse =
            serde_json::from_str(r#"{"action":"error","message":"No project selected"}"#)
                .expect("valid response");
        assert_eq!(
            response.classify(),
            IntentAction::Error("No project selected".to_string())
        );
    }

    #[test]
    fn test_search_params_filtering() {
        let tasks = vec![
            Task::draft("Write report", "quarterly numbers", "pending", 1),
            Task::draft("Fix login", "", "completed", 1),
        ];

        let by_term = SearchParams {
            search_term: Some("REPORT".to_string()),
            ..Default::default()
        };
        assert!(by_term.matches(&tasks[0]));
        assert!(!by_term.matches(&tasks[1]));

        let by_status = SearchParams {
            status: Some("completed".to_string()),
            ..Default::default()
        };
        assert!(!by_status.matches(&tasks[0]));
        assert!(by_status.matches(&tasks[1]));
    }
}
