use workboard_core::column::Column;
use workboard_core::drag::{
  DragSession,
  DropOutcome
};
use workboard_core::task::Task;
use workboard_core::visibility::ColumnVisibility;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_force_update,
  use_mut_ref
};

use super::BoardColumn;

#[derive(Properties, PartialEq)]
pub struct TaskBoardProps {
  pub columns:        Vec<Column>,
  #[prop_or_default]
  pub dark_mode:      bool,
  /// `(task_id, from_column_id,
  /// to_column_id)`
  pub on_task_move:
    Callback<(String, String, String)>,
  pub on_task_click:  Callback<Task>,
  pub on_add_task:    Callback<String>,
  /// `(task_id, column_id)`
  pub on_delete_task:
    Callback<(String, String)>
}

#[function_component(TaskBoard)]
pub fn task_board(
  props: &TaskBoardProps
) -> Html {
  let session = use_mut_ref(DragSession::new);
  let visibility = {
    let columns = props.columns.clone();
    use_mut_ref(move || {
      ColumnVisibility::for_columns(&columns)
    })
  };
  let force_update = use_force_update();

  visibility
    .borrow_mut()
    .sync(&props.columns);

  let on_drag_start = {
    let session = session.clone();
    let force_update = force_update.clone();
    Callback::from(
      move |(task, column_id): (
        Task,
        String
      )| {
        let payload = session
          .borrow_mut()
          .start(task, column_id);
        force_update.force_update();
        match payload.encode() {
          | Ok(raw) => Some(raw),
          | Err(error) => {
            tracing::warn!(%error, "failed to encode drag payload");
            None
          }
        }
      }
    )
  };

  let on_drag_end = {
    let session = session.clone();
    let force_update = force_update.clone();
    Callback::from(move |_: ()| {
      if session.borrow_mut().end() {
        force_update.force_update();
      }
    })
  };

  let on_hover = {
    let session = session.clone();
    let force_update = force_update.clone();
    Callback::from(
      move |column_id: String| {
        if session
          .borrow_mut()
          .hover(&column_id)
        {
          force_update.force_update();
        }
      }
    )
  };

  let on_leave = {
    let session = session.clone();
    let force_update = force_update.clone();
    Callback::from(
      move |(column_id, still_inside): (
        String,
        bool
      )| {
        if session
          .borrow_mut()
          .leave(&column_id, still_inside)
        {
          force_update.force_update();
        }
      }
    )
  };

  let on_drop = {
    let session = session.clone();
    let force_update = force_update.clone();
    let on_task_move =
      props.on_task_move.clone();
    Callback::from(
      move |(column_id, native): (
        String,
        Option<String>
      )| {
        let outcome = session
          .borrow_mut()
          .drop_on(&column_id, native.as_deref());
        force_update.force_update();
        if let DropOutcome::Moved {
          movement,
          ..
        } = outcome
        {
          on_task_move.emit((
            movement.task_id,
            movement.from_column_id,
            movement.to_column_id
          ));
        }
      }
    )
  };

  let on_toggle = {
    let visibility = visibility.clone();
    let force_update = force_update.clone();
    Callback::from(
      move |column_id: String| {
        visibility
          .borrow_mut()
          .toggle(&column_id);
        force_update.force_update();
      }
    )
  };

  let session_ref = session.borrow();
  let visibility_ref = visibility.borrow();
  let dragging_task = session_ref
    .dragged_task_id()
    .map(str::to_string);

  html! {
      <div class={classes!("task-board", props.dark_mode.then_some("dark"))}>
          <div class="task-board-track">
              {
                  for props.columns.iter().cloned().map(|column| {
                      let expanded = visibility_ref.is_expanded(&column.id);
                      let drop_hint = session_ref.is_over(&column.id);
                      let key = column.id.clone();
                      html! {
                          <BoardColumn
                              key={key}
                              column={column}
                              expanded={expanded}
                              drop_hint={drop_hint}
                              dragging_task={dragging_task.clone()}
                              dark_mode={props.dark_mode}
                              on_toggle={on_toggle.clone()}
                              on_add_task={props.on_add_task.clone()}
                              on_task_click={props.on_task_click.clone()}
                              on_delete_task={props.on_delete_task.clone()}
                              on_drag_start={on_drag_start.clone()}
                              on_drag_end={on_drag_end.clone()}
                              on_hover={on_hover.clone()}
                              on_leave={on_leave.clone()}
                              on_drop={on_drop.clone()}
                          />
                      }
                  })
              }
          </div>
      </div>
  }
}
