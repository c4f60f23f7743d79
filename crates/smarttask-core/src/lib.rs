//! SmartTask Core
//!
//! Domain entities and the optimistic mutation protocol shared by the
//! frontend. No UI or WASM dependencies, so everything here is testable
//! natively.

pub mod column;
pub mod entity;
pub mod intent;
pub mod project;
pub mod status;
pub mod sync;
pub mod task;

#[cfg(test)]
mod tests;

pub use column::{default_columns, template_columns, Column, TEMPLATE_NAMES};
pub use entity::Entity;
pub use intent::{IntentAction, ProjectDetails, SearchParams, TaskDetails, VoiceIntentResponse};
pub use project::{Priority, Project};
pub use status::{plan_transition, Transition};
pub use sync::{MutationController, MutationRejected, Outcome, RemoteChange, StateSlot};
pub use task::Task;
