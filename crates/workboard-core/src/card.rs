use chrono::{DateTime, Utc};
use tracing::debug;

use crate::board::BoardIntent;
use crate::datetime::format_due_date;
use crate::task::{PriorityStyle, Task};

/// Everything a task card shows, derived from a task at one render moment.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub task_id: String,
    pub title: String,
    pub description: Option<String>,
    pub project_name: Option<String>,
    pub priority: PriorityStyle,
    pub due_label: Option<String>,
    pub overdue: bool,
    pub assignee: Option<String>,
    pub initials: Option<String>,
    pub tags: Vec<String>,
    pub comments: Option<u32>,
}

impl CardView {
    pub fn from_task(task: &Task, now: DateTime<Utc>) -> Self {
        let description = task
            .description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        let project_name = Some(task.project_name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            description,
            project_name,
            priority: task.priority.style(),
            due_label: task.due_date.map(format_due_date),
            overdue: task.is_overdue(now),
            assignee: task.assignee.clone(),
            initials: task.assignee.as_deref().and_then(initials),
            tags: task.tags.clone(),
            comments: task.comment_indicator(),
        }
    }
}

fn initials(name: &str) -> Option<String> {
    let letters = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect::<String>();
    (!letters.is_empty()).then_some(letters)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit,
    Delete,
}

/// Open/closed flag of one card's contextual menu. Menus on different cards do
/// not know about each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardMenu {
    open: bool,
}

impl CardMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Runs a menu action: the menu closes and the matching intent is returned.
    pub fn select(&mut self, action: CardAction, task: &Task, column_id: &str) -> BoardIntent {
        self.open = false;
        debug!(task_id = %task.id, ?action, "card menu action");
        match action {
            CardAction::Edit => BoardIntent::Open(task.clone()),
            CardAction::Delete => BoardIntent::Delete {
                task_id: task.id.clone(),
                column_id: column_id.to_string(),
            },
        }
    }
}
