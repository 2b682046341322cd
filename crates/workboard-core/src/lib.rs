pub mod board;
pub mod card;
pub mod column;
pub mod config;
pub mod datetime;
pub mod drag;
pub mod owner;
pub mod stages;
pub mod task;
pub mod visibility;

pub use board::{Board, BoardIntent, ColumnLayout};
pub use column::{AddAffordance, Column};
pub use config::BoardConfig;
pub use drag::{DragPayload, DragSession, DropOutcome, TaskMove};
pub use owner::BoardOwner;
pub use task::{Priority, Task};
pub use visibility::ColumnVisibility;
