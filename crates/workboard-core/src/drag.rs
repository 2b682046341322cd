//! Drag-and-drop state machine for the board.
//!
//! A drag is recorded twice: once in memory (`DragSession`) and once as a
//! serialized `DragPayload` that the UI writes into the platform's native
//! transfer channel. On drop the native payload wins; when it is missing or
//! unreadable the in-memory context is used instead. Both pieces of state are
//! cleared after every drop or cancel.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::task::Task;

pub const DRAG_MIME: &str = "application/json";
pub const DRAG_TEXT_MIME: &str = "text/plain";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub task_id: String,
    pub from_column_id: String,
}

impl DragPayload {
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Returns `None` for anything that is not a complete payload; callers
    /// fall back to the in-memory context.
    pub fn decode(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        match serde_json::from_str::<Self>(raw) {
            Ok(payload)
                if !payload.task_id.trim().is_empty()
                    && !payload.from_column_id.trim().is_empty() =>
            {
                Some(payload)
            }
            Ok(_) => {
                debug!("drag payload has empty ids");
                None
            }
            Err(error) => {
                debug!(%error, "unreadable drag payload");
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragContext {
    pub task: Task,
    pub from_column_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    pub task_id: String,
    pub from_column_id: String,
    pub to_column_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    Native,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Moved {
        movement: TaskMove,
        source: PayloadSource,
    },
    SameColumn,
    NoSource,
}

impl DropOutcome {
    pub fn into_move(self) -> Option<TaskMove> {
        match self {
            Self::Moved { movement, .. } => Some(movement),
            Self::SameColumn | Self::NoSource => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSession {
    context: Option<DragContext>,
    over_column: Option<String>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the drag and returns the payload to place in the native
    /// transfer channel.
    pub fn start(&mut self, task: Task, from_column_id: impl Into<String>) -> DragPayload {
        let from_column_id = from_column_id.into();
        if let Some(stale) = &self.context {
            warn!(task_id = %stale.task.id, "replacing unfinished drag");
        }
        debug!(task_id = %task.id, from = %from_column_id, "drag start");

        let payload = DragPayload {
            task_id: task.id.clone(),
            from_column_id: from_column_id.clone(),
        };
        self.context = Some(DragContext {
            task,
            from_column_id,
        });
        payload
    }

    pub fn is_active(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&DragContext> {
        self.context.as_ref()
    }

    pub fn dragged_task_id(&self) -> Option<&str> {
        self.context
            .as_ref()
            .map(|context| context.task.id.as_str())
    }

    pub fn over_column(&self) -> Option<&str> {
        self.over_column.as_deref()
    }

    pub fn is_over(&self, column_id: &str) -> bool {
        self.over_column() == Some(column_id)
    }

    /// Marks `column_id` as the hover target. Returns whether anything visible
    /// changed.
    pub fn hover(&mut self, column_id: &str) -> bool {
        if self.is_over(column_id) {
            return false;
        }
        debug!(column = %column_id, "drag over column");
        self.over_column = Some(column_id.to_string());
        true
    }

    /// `pointer_still_inside` is true when the element the pointer moved to is
    /// a descendant of the column's drop zone.
    pub fn leave(&mut self, column_id: &str, pointer_still_inside: bool) -> bool {
        if pointer_still_inside || !self.is_over(column_id) {
            return false;
        }
        debug!(column = %column_id, "drag left column");
        self.over_column = None;
        true
    }

    pub fn drop_on(&mut self, column_id: &str, native: Option<&str>) -> DropOutcome {
        let resolved = match native.and_then(DragPayload::decode) {
            Some(payload) => Some((
                payload.task_id,
                payload.from_column_id,
                PayloadSource::Native,
            )),
            None => self.context.as_ref().map(|context| {
                debug!(
                    task_id = %context.task.id,
                    "native drag payload missing; using in-memory context"
                );
                (
                    context.task.id.clone(),
                    context.from_column_id.clone(),
                    PayloadSource::Memory,
                )
            }),
        };

        self.clear();

        let Some((task_id, from_column_id, source)) = resolved else {
            debug!(column = %column_id, "drop without a drag source");
            return DropOutcome::NoSource;
        };

        if from_column_id == column_id {
            debug!(%task_id, column = %column_id, "drop onto own column ignored");
            return DropOutcome::SameColumn;
        }

        info!(
            %task_id,
            from = %from_column_id,
            to = %column_id,
            ?source,
            "task moved"
        );
        DropOutcome::Moved {
            movement: TaskMove {
                task_id,
                from_column_id,
                to_column_id: column_id.to_string(),
            },
            source,
        }
    }

    /// Drag finished without a drop, or the platform's dragend after a drop.
    pub fn end(&mut self) -> bool {
        let changed = self.context.is_some() || self.over_column.is_some();
        if changed {
            debug!("drag end");
        }
        self.clear();
        changed
    }

    fn clear(&mut self) {
        self.context = None;
        self.over_column = None;
    }
}
