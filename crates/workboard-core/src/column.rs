use serde::{Deserialize, Serialize};

use crate::task::Task;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub color: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Which "add task" control a column body shows. Exactly one is visible at a
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddAffordance {
    EmptyPlaceholder,
    ListFooter,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: color.into(),
            tasks: vec![],
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn add_affordance(&self) -> AddAffordance {
        if self.tasks.is_empty() {
            AddAffordance::EmptyPlaceholder
        } else {
            AddAffordance::ListFooter
        }
    }

    pub fn contains_task(&self, task_id: &str) -> bool {
        self.tasks.iter().any(|task| task.id == task_id)
    }

    pub fn collapsed_label(&self) -> String {
        format!("{} ({})", self.title, self.task_count())
    }
}

pub fn total_tasks(columns: &[Column]) -> usize {
    columns.iter().map(Column::task_count).sum()
}

pub fn find_column<'a>(columns: &'a [Column], column_id: &str) -> Option<&'a Column> {
    columns.iter().find(|column| column.id == column_id)
}
