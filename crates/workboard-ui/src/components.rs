mod board_column;
mod collapsed_column;
mod task_board;
mod task_card;
mod task_card_menu;

pub use board_column::BoardColumn;
pub use collapsed_column::CollapsedColumn;
pub use task_board::TaskBoard;
pub use task_card::TaskCard;
pub use task_card_menu::TaskCardMenu;
