//! Dashboard Page
//!
//! Derived charts over the shared collections. Reads the same store the
//! board mutates, so it stays in sync through the refresh signal without
//! fetching on its own.

use leptos::prelude::*;

use smarttask_core::{default_columns, Priority};

use crate::store::AppStateStoreFields;
use crate::store::{store_current_project, use_app_store};

const PRIORITY_BARS: &[(Priority, &str, &str)] = &[
    (Priority::High, "High", "#dc3545"),
    (Priority::Medium, "Medium", "#ffc107"),
    (Priority::Low, "Low", "#28a745"),
];

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn test_percent_tracks_changing_totals() {
        assert_eq!(percent(5, 10), 50.0);
        // Same count, grown total: the bar must shrink
        assert_eq!(percent(5, 20), 25.0);
        assert_eq!(percent(0, 10), 0.0);
        assert_eq!(percent(3, 0), 0.0);
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_app_store();

    let project_total = Memo::new(move |_| store.projects().get().len());
    let task_total = Memo::new(move |_| store.tasks().get().len());
    let current_project = Memo::new(move |_| store_current_project(&store));

    let priority_counts = Memo::new(move |_| {
        let projects = store.projects().get();
        PRIORITY_BARS
            .iter()
            .map(|(priority, label, color)| {
                let count = projects.iter().filter(|p| p.priority == *priority).count();
                (*label, *color, count)
            })
            .collect::<Vec<_>>()
    });

    let status_counts = Memo::new(move |_| {
        let columns = current_project
            .get()
            .map(|p| p.columns())
            .unwrap_or_else(default_columns);
        let tasks = store.tasks().get();
        columns
            .into_iter()
            .map(|column| {
                let count = tasks.iter().filter(|t| t.status == column.id).count();
                (column.title, column.color, count)
            })
            .collect::<Vec<_>>()
    });

    view! {
        <div class="dashboard-page">
            <h2>"\u{1F4C8} Dashboard"</h2>

            <div class="stat-cards">
                <div class="stat-card">
                    <span class="stat-value">{move || project_total.get()}</span>
                    <span class="stat-label">"Projects"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{move || task_total.get()}</span>
                    <span class="stat-label">
                        {move || {
                            current_project
                                .get()
                                .map(|p| format!("Tasks in {}", p.title))
                                .unwrap_or_else(|| "Tasks".to_string())
                        }}
                    </span>
                </div>
            </div>

            <div class="chart-panel">
                <h3>"Projects by priority"</h3>
                <For
                    each=move || priority_counts.get()
                    key=|(label, _, count)| (*label, *count)
                    children=move |(label, color, count)| {
                        // Tracked read: the row keeps its key when only the
                        // total changes, so the width must stay reactive
                        let width = move || percent(count, project_total.get());
                        view! {
                            <div class="chart-row">
                                <span class="chart-label">{label}</span>
                                <div class="chart-track">
                                    <div
                                        class="chart-bar"
                                        style=move || format!(
                                            "width: {:.0}%; background-color: {};",
                                            width(),
                                            color,
                                        )
                                    ></div>
                                </div>
                                <span class="chart-count">{count}</span>
                            </div>
                        }
                    }
                />
            </div>

            <div class="chart-panel">
                <h3>
                    {move || {
                        current_project
                            .get()
                            .map(|p| format!("Task status: {}", p.title))
                            .unwrap_or_else(|| "Task status".to_string())
                    }}
                </h3>
                <For
                    each=move || status_counts.get()
                    key=|(title, _, count)| (title.clone(), *count)
                    children=move |(title, color, count)| {
                        let width = move || percent(count, task_total.get());
                        view! {
                            <div class="chart-row">
                                <span class="chart-label">{title}</span>
                                <div class="chart-track">
                                    <div
                                        class="chart-bar"
                                        style=move || format!(
                                            "width: {:.0}%; background-color: {};",
                                            width(),
                                            color,
                                        )
                                    ></div>
                                </div>
                                <span class="chart-count">{count}</span>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
