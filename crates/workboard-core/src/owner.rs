use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::board::BoardIntent;
use crate::column::Column;
use crate::datetime::to_wire;
use crate::drag::TaskMove;
use crate::task::Task;

/// Reference owner of the column data: applies board intents and hands back a
/// fresh column list. Ids that no longer exist are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardOwner {
    columns: Vec<Column>,
}

impl BoardOwner {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn snapshot(&self) -> Vec<Column> {
        self.columns.clone()
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Returns whether the column data changed.
    pub fn apply(&mut self, intent: BoardIntent, now: DateTime<Utc>) -> bool {
        match intent {
            BoardIntent::Move(movement) => self.move_task(&movement),
            BoardIntent::Delete { task_id, column_id } => self.delete_task(&task_id, &column_id),
            BoardIntent::AddRequest { column_id } => {
                self.add_task(&column_id, "Nieuwe taak", now).is_some()
            }
            BoardIntent::Open(task) => {
                info!(task_id = %task.id, "task opened");
                false
            }
        }
    }

    /// Moves the task to the end of the target column and points its stage at
    /// that column.
    pub fn move_task(&mut self, movement: &TaskMove) -> bool {
        if movement.from_column_id == movement.to_column_id {
            return false;
        }
        let Some(to_idx) = self.column_index(&movement.to_column_id) else {
            warn!(
                column = %movement.to_column_id,
                "move ignored: unknown target column"
            );
            return false;
        };
        let Some(mut task) = self.take_task(&movement.task_id, &movement.from_column_id) else {
            warn!(
                task_id = %movement.task_id,
                from = %movement.from_column_id,
                "move ignored: task not in source column"
            );
            return false;
        };

        info!(
            task_id = %task.id,
            from = %movement.from_column_id,
            to = %movement.to_column_id,
            "task moved between columns"
        );
        task.stage = Some(movement.to_column_id.clone());
        self.columns[to_idx].tasks.push(task);
        true
    }

    pub fn delete_task(&mut self, task_id: &str, column_id: &str) -> bool {
        match self.take_task(task_id, column_id) {
            Some(task) => {
                info!(task_id = %task.id, column = %column_id, "task deleted");
                true
            }
            None => {
                warn!(%task_id, column = %column_id, "delete ignored: task not found");
                false
            }
        }
    }

    /// Appends a new task and returns its id.
    pub fn add_task(&mut self, column_id: &str, title: &str, now: DateTime<Utc>) -> Option<String> {
        let Some(idx) = self.column_index(column_id) else {
            warn!(column = %column_id, "add ignored: unknown column");
            return None;
        };

        let mut task = Task::new(Uuid::new_v4().to_string(), title);
        task.created_at = to_wire(now);
        task.stage = Some(column_id.to_string());
        let id = task.id.clone();

        info!(task_id = %id, column = %column_id, "task added");
        self.columns[idx].tasks.push(task);
        Some(id)
    }

    fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.id == column_id)
    }

    fn take_task(&mut self, task_id: &str, column_id: &str) -> Option<Task> {
        let column = self
            .columns
            .iter_mut()
            .find(|column| column.id == column_id)?;
        let pos = column.tasks.iter().position(|task| task.id == task_id)?;
        Some(column.tasks.remove(pos))
    }
}
