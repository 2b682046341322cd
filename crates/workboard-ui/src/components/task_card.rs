use web_sys::{
  DragEvent,
  MouseEvent
};
use workboard_core::board::BoardIntent;
use workboard_core::card::{
  CardAction,
  CardMenu,
  CardView
};
use workboard_core::drag::{
  DRAG_MIME,
  DRAG_TEXT_MIME
};
use workboard_core::task::Task;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_state
};

use super::TaskCardMenu;

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
  pub task:          Task,
  pub view:          CardView,
  pub column_id:     String,
  pub is_dragging:   bool,
  pub on_click:      Callback<Task>,
  /// `(task_id, column_id)`
  pub on_delete:
    Callback<(String, String)>,
  pub on_drag_start:
    Callback<(Task, String), Option<String>>,
  pub on_drag_end:   Callback<()>
}

#[function_component(TaskCard)]
pub fn task_card(
  props: &TaskCardProps
) -> Html {
  let menu = use_state(CardMenu::default);
  let view = &props.view;

  let ondragstart = {
    let on_drag_start =
      props.on_drag_start.clone();
    let task = props.task.clone();
    let column_id = props.column_id.clone();
    Callback::from(
      move |event: DragEvent| {
        let task_id = task.id.clone();
        let payload = on_drag_start.emit((
          task.clone(),
          column_id.clone()
        ));
        let Some(data_transfer) =
          event.data_transfer()
        else {
          return;
        };
        if let Some(raw) = payload
          && let Err(error) =
            data_transfer.set_data(DRAG_MIME, &raw)
        {
          tracing::warn!(?error, "failed writing drag payload");
        }
        if let Err(error) = data_transfer
          .set_data(DRAG_TEXT_MIME, &task_id)
        {
          tracing::debug!(?error, "failed writing plain drag text");
        }
        data_transfer.set_effect_allowed("move");
      }
    )
  };

  let ondragend = {
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(move |_: DragEvent| {
      on_drag_end.emit(())
    })
  };

  let onclick = {
    let on_click = props.on_click.clone();
    let task = props.task.clone();
    Callback::from(move |_: MouseEvent| {
      on_click.emit(task.clone())
    })
  };

  let on_toggle_menu = {
    let menu = menu.clone();
    Callback::from(move |_: ()| {
      let mut next = *menu;
      next.toggle();
      menu.set(next);
    })
  };

  let on_action = {
    let menu = menu.clone();
    let task = props.task.clone();
    let column_id = props.column_id.clone();
    let on_click = props.on_click.clone();
    let on_delete = props.on_delete.clone();
    Callback::from(
      move |action: CardAction| {
        let mut next = *menu;
        let intent =
          next.select(action, &task, &column_id);
        menu.set(next);
        match intent {
          | BoardIntent::Open(task) => {
            on_click.emit(task)
          }
          | BoardIntent::Delete {
            task_id,
            column_id
          } => on_delete.emit((task_id, column_id)),
          | _ => {}
        }
      }
    )
  };

  html! {
      <div
          class={classes!("task-card", props.is_dragging.then_some("dragging"))}
          draggable="true"
          {ondragstart}
          {ondragend}
      >
          <div class="task-card-header">
              <div class="task-card-title" onclick={onclick.clone()}>{ &view.title }</div>
              <TaskCardMenu
                  open={menu.is_open()}
                  on_toggle={on_toggle_menu}
                  on_action={on_action}
              />
          </div>
          <div class="task-card-body" {onclick}>
              {
                  if let Some(description) = &view.description {
                      html! { <p class="task-card-description">{ description }</p> }
                  } else {
                      html! {}
                  }
              }
              {
                  if let Some(project) = &view.project_name {
                      html! { <div class="task-card-project">{ project }</div> }
                  } else {
                      html! {}
                  }
              }
              <div class="task-card-meta">
                  <span class={view.priority.color_classes}>{ view.priority.label }</span>
                  {
                      match &view.due_label {
                          | Some(due) => html! {
                              <span class={classes!("badge", "due", view.overdue.then_some("overdue"))}>
                                  { if view.overdue { "⚠ " } else { "" } }
                                  { due }
                              </span>
                          },
                          | None => html! {}
                      }
                  }
              </div>
              <div class="task-card-meta">
                  {
                      for view.tags.iter().map(|tag| html! {
                          <span class="badge tag-badge">{ tag }</span>
                      })
                  }
              </div>
              <div class="task-card-footer">
                  {
                      match (&view.initials, &view.assignee) {
                          | (Some(initials), Some(assignee)) => html! {
                              <span class="avatar" title={assignee.clone()}>{ initials }</span>
                          },
                          | _ => html! {}
                      }
                  }
                  {
                      match view.comments {
                          | Some(count) => html! {
                              <span class="badge comments">{ format!("💬 {count}") }</span>
                          },
                          | None => html! {}
                      }
                  }
              </div>
          </div>
      </div>
  }
}
