//! UI Components
//!
//! Leptos views for the SmartTask client.

mod dashboard;
mod kanban_board;
mod kanban_card;
mod kanban_column;
mod layout;
mod login_register;
mod project_form;
mod project_list;
mod task_form;
mod toast_host;
mod voice_assistant;

pub use dashboard::DashboardPage;
pub use kanban_board::{bind_board_drops, KanbanPage};
pub use kanban_card::KanbanCard;
pub use kanban_column::KanbanColumn;
pub use layout::{Layout, Page};
pub use login_register::LoginRegister;
pub use project_form::ProjectForm;
pub use project_list::ProjectsPage;
pub use task_form::TaskForm;
pub use toast_host::ToastHost;
pub use voice_assistant::VoiceAssistant;
