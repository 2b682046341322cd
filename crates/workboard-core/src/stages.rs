use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::column::Column;
use crate::task::Task;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stage {
    pub id: String,
    pub title: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "slate".to_string()
}

impl Stage {
    pub fn empty_column(&self) -> Column {
        Column::new(self.id.clone(), self.title.clone(), self.color.clone())
    }
}

pub fn default_stages() -> Vec<Stage> {
    [
        ("backlog", "Backlog", "slate"),
        ("todo", "Te doen", "blue"),
        ("in-progress", "Bezig", "violet"),
        ("review", "Review", "amber"),
        ("done", "Klaar", "green"),
    ]
    .into_iter()
    .map(|(id, title, color)| Stage {
        id: id.to_string(),
        title: title.to_string(),
        color: color.to_string(),
    })
    .collect()
}

/// Buckets a flat task list into one column per stage. A task lands in the
/// stage whose id equals its stage key; tasks without a match go to the first
/// stage. Input order is kept inside each column.
pub fn partition_tasks(tasks: Vec<Task>, stages: &[Stage]) -> Vec<Column> {
    let mut columns = stages.iter().map(Stage::empty_column).collect::<Vec<_>>();

    if columns.is_empty() {
        if !tasks.is_empty() {
            warn!(
                task_count = tasks.len(),
                "no stages configured; tasks are not shown"
            );
        }
        return columns;
    }

    for task in tasks {
        let idx = columns
            .iter()
            .position(|column| column.id == task.stage_key())
            .unwrap_or_else(|| {
                debug!(
                    task_id = %task.id,
                    stage = %task.stage_key(),
                    fallback = %columns[0].id,
                    "task stage not configured; using first stage"
                );
                0
            });
        columns[idx].tasks.push(task);
    }

    columns
}
