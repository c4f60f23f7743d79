//! Kanban Card Component
//!
//! One draggable task card. A click (as opposed to a drag) opens the task
//! for editing.

use board_dnd::{make_on_card_mousedown, DndSignals};
use leptos::prelude::*;

use smarttask_core::Task;

#[component]
pub fn KanbanCard(task: Task, on_edit: Callback<Task>) -> impl IntoView {
    let dnd = expect_context::<DndSignals>();
    let task_id = task.id;
    let edit_target = task.clone();

    let on_mousedown = make_on_card_mousedown(dnd, task_id);
    let on_click = move |_| {
        // Suppress the click that ends a drag
        if dnd.drag_just_ended_read.get_untracked() {
            return;
        }
        on_edit.run(edit_target.clone());
    };

    let is_dragging = move || dnd.dragging_read.get() == Some(task_id);

    view! {
        <div
            class=move || if is_dragging() { "kanban-card dragging" } else { "kanban-card" }
            on:mousedown=on_mousedown
            on:click=on_click
        >
            <div class="kanban-card-title">{task.title.clone()}</div>
            {(!task.description.is_empty())
                .then(|| view! { <div class="kanban-card-description">{task.description.clone()}</div> })}
            {task
                .completion_date
                .clone()
                .map(|date| view! { <div class="kanban-card-date">"\u{23F0} " {date}</div> })}
        </div>
    }
}
