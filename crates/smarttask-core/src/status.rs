//! Status Transition Validation
//!
//! Gates drag-and-drop status changes before they reach the mutation
//! controller.

use crate::column::Column;
use crate::task::Task;

/// Outcome of validating a drop target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Valid move to a new column; carries the new status value
    Move(String),
    /// Dropped on the column the task already occupies
    NoOp,
    /// Target is not a column of the task's project
    Invalid,
}

/// Validate a status change against the project's column set.
///
/// `NoOp` and `Invalid` must never produce a remote call or a local
/// mutation; only `Move` proceeds to the controller.
pub fn plan_transition(task: &Task, target: &str, columns: &[Column]) -> Transition {
    if task.status == target {
        return Transition::NoOp;
    }
    if columns.iter().any(|c| c.id == target) {
        Transition::Move(target.to_string())
    } else {
        Transition::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::default_columns;

    fn task_with_status(status: &str) -> Task {
        Task::draft("Sample", "", status, 1)
    }

    #[test]
    fn test_valid_move() {
        let task = task_with_status("pending");
        let plan = plan_transition(&task, "completed", &default_columns());
        assert_eq!(plan, Transition::Move("completed".to_string()));
    }

    #[test]
    fn test_same_column_is_noop() {
        let task = task_with_status("pending");
        let plan = plan_transition(&task, "pending", &default_columns());
        assert_eq!(plan, Transition::NoOp);
    }

    #[test]
    fn test_unknown_column_is_invalid() {
        let task = task_with_status("pending");
        let plan = plan_transition(&task, "archived", &default_columns());
        assert_eq!(plan, Transition::Invalid);
    }

    #[test]
    fn test_validates_against_custom_columns() {
        let task = task_with_status("design");
        let columns = crate::column::template_columns("architecture").unwrap();
        assert_eq!(
            plan_transition(&task, "construction", &columns),
            Transition::Move("construction".to_string())
        );
        // Default statuses do not apply once the project defines columns
        assert_eq!(plan_transition(&task, "pending", &columns), Transition::Invalid);
    }
}
