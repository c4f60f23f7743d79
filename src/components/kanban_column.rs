//! Kanban Column Component
//!
//! One board lane. Highlights itself while a dragged card hovers over it.

use board_dnd::{make_on_column_mouseenter, make_on_column_mouseleave, DndSignals};
use leptos::prelude::*;

use smarttask_core::{Column, Task};

use crate::components::KanbanCard;

#[component]
pub fn KanbanColumn(
    column: Column,
    tasks: Memo<Vec<Task>>,
    on_edit: Callback<Task>,
    on_add: Callback<String>,
) -> impl IntoView {
    let dnd = expect_context::<DndSignals>();
    let column_id = column.id.clone();
    let add_status = column.id.clone();
    let hover_id = column.id.clone();

    let on_mouseenter = make_on_column_mouseenter(dnd, column_id);
    let on_mouseleave = make_on_column_mouseleave(dnd);

    let is_drop_target =
        move || dnd.target_column_read.get().as_deref() == Some(hover_id.as_str());

    view! {
        <div
            class=move || if is_drop_target() { "kanban-column drop-target" } else { "kanban-column" }
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <div class="kanban-column-header" style=format!("border-top-color: {};", column.color)>
                <span class="kanban-column-icon">{column.icon.clone()}</span>
                <span class="kanban-column-title">{column.title.clone()}</span>
                <span class="kanban-column-count">{move || tasks.get().len()}</span>
            </div>

            <div class="kanban-column-cards">
                <For
                    each=move || tasks.get()
                    key=|task| task.id
                    children=move |task| view! { <KanbanCard task=task on_edit=on_edit /> }
                />
            </div>

            <button class="kanban-add-card" on:click=move |_| on_add.run(add_status.clone())>
                "+ Add task"
            </button>
        </div>
    }
}
