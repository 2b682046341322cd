//! Headless board controller: the supplied columns plus the transient drag
//! and visibility state, turning user gestures into `BoardIntent`s.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::card::CardView;
use crate::column::{AddAffordance, Column, find_column};
use crate::drag::{DragPayload, DragSession, TaskMove};
use crate::task::Task;
use crate::visibility::ColumnVisibility;

/// One user intent handed to whoever owns the column data.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardIntent {
    Move(TaskMove),
    Open(Task),
    AddRequest { column_id: String },
    Delete { task_id: String, column_id: String },
}

/// How one column is drawn at a given moment.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub id: String,
    pub title: String,
    pub color: String,
    pub expanded: bool,
    pub drop_hint: bool,
    pub task_count: usize,
    pub collapsed_label: String,
    pub add_affordance: AddAffordance,
    pub cards: Vec<CardView>,
}

impl ColumnLayout {
    pub fn new(column: &Column, expanded: bool, drop_hint: bool, now: DateTime<Utc>) -> Self {
        Self {
            id: column.id.clone(),
            title: column.title.clone(),
            color: column.color.clone(),
            expanded,
            drop_hint,
            task_count: column.task_count(),
            collapsed_label: column.collapsed_label(),
            add_affordance: column.add_affordance(),
            cards: column
                .tasks
                .iter()
                .map(|task| CardView::from_task(task, now))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    columns: Vec<Column>,
    drag: DragSession,
    visibility: ColumnVisibility,
}

impl Board {
    pub fn new(columns: Vec<Column>) -> Self {
        let visibility = ColumnVisibility::for_columns(&columns);
        Self {
            columns,
            drag: DragSession::new(),
            visibility,
        }
    }

    /// Replaces the column data after the owner applied an intent. An
    /// in-flight drag keeps the ids it captured at start.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.visibility.sync(&columns);
        self.columns = columns;
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn visibility(&self) -> &ColumnVisibility {
        &self.visibility
    }

    pub fn begin_drag(&mut self, task_id: &str, column_id: &str) -> Option<DragPayload> {
        let task = find_column(&self.columns, column_id)
            .and_then(|column| column.tasks.iter().find(|task| task.id == task_id))
            .cloned();
        let Some(task) = task else {
            warn!(
                %task_id,
                column = %column_id,
                "drag start for a task that is not on the board"
            );
            return None;
        };
        Some(self.drag.start(task, column_id))
    }

    pub fn hover(&mut self, column_id: &str) -> bool {
        self.drag.hover(column_id)
    }

    pub fn leave(&mut self, column_id: &str, pointer_still_inside: bool) -> bool {
        self.drag.leave(column_id, pointer_still_inside)
    }

    pub fn drop_on(&mut self, column_id: &str, native: Option<&str>) -> Option<BoardIntent> {
        self.drag
            .drop_on(column_id, native)
            .into_move()
            .map(BoardIntent::Move)
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag.end()
    }

    pub fn toggle_column(&mut self, column_id: &str) -> bool {
        self.visibility.toggle(column_id)
    }

    pub fn request_add(&self, column_id: &str) -> BoardIntent {
        debug!(column = %column_id, "add task requested");
        BoardIntent::AddRequest {
            column_id: column_id.to_string(),
        }
    }

    pub fn open(&self, task: &Task) -> BoardIntent {
        BoardIntent::Open(task.clone())
    }

    pub fn layout(&self, now: DateTime<Utc>) -> Vec<ColumnLayout> {
        self.columns
            .iter()
            .map(|column| {
                ColumnLayout::new(
                    column,
                    self.visibility.is_expanded(&column.id),
                    self.drag.is_over(&column.id),
                    now,
                )
            })
            .collect()
    }
}
