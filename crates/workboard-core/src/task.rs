use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::due_date_serde;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityStyle {
    pub label: &'static str,
    pub color_classes: &'static str,
}

impl Priority {
    pub fn style(self) -> PriorityStyle {
        match self {
            Self::Low => PriorityStyle {
                label: "Laag",
                color_classes: "priority priority-low",
            },
            Self::Normal => PriorityStyle {
                label: "Normaal",
                color_classes: "priority priority-normal",
            },
            Self::High => PriorityStyle {
                label: "Hoog",
                color_classes: "priority priority-high",
            },
            Self::Urgent => PriorityStyle {
                label: "Urgent",
                color_classes: "priority priority-urgent",
            },
        }
    }

    pub fn label(self) -> &'static str {
        self.style().label
    }

    pub fn all() -> [Priority; 4] {
        [Self::Low, Self::Normal, Self::High, Self::Urgent]
    }
}

/// One work item on the board.
///
/// Field names follow the dashboard's camelCase JSON so task lists can be
/// handed over without a mapping layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(
        default,
        with = "due_date_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub comments_count: Option<u32>,
    #[serde(default)]
    pub created_at: String,
    /// Owner-side stage hint consumed by `stages::partition_tasks`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            project_id: String::new(),
            project_name: String::new(),
            priority: Priority::Normal,
            due_date: None,
            assignee: None,
            tags: vec![],
            comments_count: None,
            created_at: String::new(),
            stage: None,
        }
    }

    /// Recomputed on every call; `now` is the render moment.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }

    pub fn comment_indicator(&self) -> Option<u32> {
        self.comments_count.filter(|count| *count > 0)
    }

    pub fn stage_key(&self) -> &str {
        self.stage.as_deref().unwrap_or(&self.project_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
            .single()
            .expect("valid now")
    }

    #[test]
    fn priority_labels_are_dutch() {
        let labels = Priority::all()
            .iter()
            .map(|priority| priority.label())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["Laag", "Normaal", "Hoog", "Urgent"]);
    }

    #[test]
    fn priority_colors_are_distinct() {
        let mut classes = Priority::all()
            .iter()
            .map(|priority| priority.style().color_classes)
            .collect::<Vec<_>>();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes.len(), 4);
    }

    #[test]
    fn overdue_depends_only_on_due_and_now() {
        let now = fixed_now();
        let mut task = Task::new("t1", "Write copy");
        assert!(!task.is_overdue(now));

        task.due_date = Some(now - Duration::days(1));
        assert!(task.is_overdue(now));

        task.priority = Priority::Urgent;
        task.stage = Some("done".into());
        assert!(task.is_overdue(now));

        task.due_date = Some(now + Duration::days(1));
        assert!(!task.is_overdue(now));

        task.due_date = Some(now);
        assert!(!task.is_overdue(now), "due exactly now is not overdue");
    }

    #[test]
    fn comment_indicator_hides_zero() {
        let mut task = Task::new("t1", "x");
        assert_eq!(task.comment_indicator(), None);
        task.comments_count = Some(0);
        assert_eq!(task.comment_indicator(), None);
        task.comments_count = Some(3);
        assert_eq!(task.comment_indicator(), Some(3));
    }

    #[test]
    fn deserializes_dashboard_json() {
        let raw = r#"{
            "id": "t1",
            "title": "Write copy",
            "projectId": "p-7",
            "projectName": "Bakkerij",
            "priority": "urgent",
            "dueDate": "2020-01-01",
            "tags": ["seo", "copy", "seo"],
            "commentsCount": 2,
            "createdAt": "2026-01-02T03:04:05.678Z"
        }"#;
        let task: Task = serde_json::from_str(raw).expect("decode task");
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.tags, vec!["seo", "copy", "seo"]);
        assert_eq!(task.created_at, "2026-01-02T03:04:05.678Z");
        assert!(task.is_overdue(fixed_now()));

        let encoded = serde_json::to_value(&task).expect("encode task");
        assert_eq!(encoded["createdAt"], "2026-01-02T03:04:05.678Z");
    }

    #[test]
    fn rejects_unknown_priority() {
        let raw = r#"{"id":"t1","title":"x","priority":"critical"}"#;
        assert!(serde_json::from_str::<Task>(raw).is_err());
    }
}
