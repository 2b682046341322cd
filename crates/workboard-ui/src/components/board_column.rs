use chrono::Utc;
use wasm_bindgen::JsCast;
use web_sys::{
  DragEvent,
  MouseEvent,
  Node
};
use workboard_core::board::ColumnLayout;
use workboard_core::column::{
  AddAffordance,
  Column
};
use workboard_core::drag::DRAG_MIME;
use workboard_core::task::Task;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_node_ref
};

use super::{
  CollapsedColumn,
  TaskCard
};

#[derive(Properties, PartialEq)]
pub struct BoardColumnProps {
  pub column:         Column,
  pub expanded:       bool,
  pub drop_hint:      bool,
  pub dragging_task:  Option<String>,
  #[prop_or_default]
  pub dark_mode:      bool,
  pub on_toggle:      Callback<String>,
  pub on_add_task:    Callback<String>,
  pub on_task_click:  Callback<Task>,
  pub on_delete_task:
    Callback<(String, String)>,
  pub on_drag_start:
    Callback<(Task, String), Option<String>>,
  pub on_drag_end:    Callback<()>,
  pub on_hover:       Callback<String>,
  pub on_leave:       Callback<(String, bool)>,
  pub on_drop:
    Callback<(String, Option<String>)>
}

#[function_component(BoardColumn)]
pub fn board_column(
  props: &BoardColumnProps
) -> Html {
  let zone_ref = use_node_ref();
  let layout = ColumnLayout::new(
    &props.column,
    props.expanded,
    props.drop_hint,
    Utc::now()
  );
  let column_id = props.column.id.clone();

  if !layout.expanded {
    let on_toggle = props.on_toggle.clone();
    let column_id = column_id.clone();
    return html! {
        <CollapsedColumn
            color={layout.color.clone()}
            label={layout.collapsed_label.clone()}
            on_expand={Callback::from(move |_: MouseEvent| on_toggle.emit(column_id.clone()))}
        />
    };
  }

  let ondragover = {
    let on_hover = props.on_hover.clone();
    let column_id = column_id.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        if let Some(data_transfer) =
          event.data_transfer()
        {
          data_transfer
            .set_drop_effect("move");
        }
        on_hover.emit(column_id.clone());
      }
    )
  };

  let ondragenter = {
    let on_hover = props.on_hover.clone();
    let column_id = column_id.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        on_hover.emit(column_id.clone());
      }
    )
  };

  let ondragleave = {
    let on_leave = props.on_leave.clone();
    let zone_ref = zone_ref.clone();
    let column_id = column_id.clone();
    Callback::from(
      move |event: DragEvent| {
        let next_target = event
          .related_target()
          .and_then(|target| {
            target.dyn_into::<Node>().ok()
          });
        let still_inside = match (
          zone_ref.cast::<Node>(),
          next_target
        ) {
          | (Some(zone), Some(node)) => {
            zone.contains(Some(&node))
          }
          | _ => false
        };
        on_leave.emit((
          column_id.clone(),
          still_inside
        ));
      }
    )
  };

  let ondrop = {
    let on_drop = props.on_drop.clone();
    let column_id = column_id.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        event.stop_propagation();
        let native = event
          .data_transfer()
          .and_then(|data_transfer| {
            match data_transfer
              .get_data(DRAG_MIME)
            {
              | Ok(raw) => Some(raw),
              | Err(error) => {
                tracing::debug!(
                  ?error,
                  "failed reading drag data"
                );
                None
              }
            }
          })
          .filter(|raw| !raw.is_empty());
        on_drop.emit((
          column_id.clone(),
          native
        ));
      }
    )
  };

  let add_task = {
    let on_add_task =
      props.on_add_task.clone();
    let column_id = column_id.clone();
    Callback::from(move |_: MouseEvent| {
      on_add_task.emit(column_id.clone())
    })
  };

  let collapse = {
    let on_toggle = props.on_toggle.clone();
    let column_id = column_id.clone();
    Callback::from(move |_: MouseEvent| {
      on_toggle.emit(column_id.clone())
    })
  };

  let dot_class = format!(
    "status-dot dot-{}",
    layout.color
  );

  html! {
      <div
          ref={zone_ref}
          class={classes!("board-column", layout.drop_hint.then_some("drop-hint"), props.dark_mode.then_some("dark"))}
          {ondragover}
          {ondragenter}
          {ondragleave}
          {ondrop}
      >
          <div class="board-column-header">
              <span class={dot_class}></span>
              <span class="board-column-title">{ &layout.title }</span>
              <span class="badge">{ layout.task_count }</span>
              <button class="btn icon" title="Taak toevoegen" onclick={add_task.clone()}>{ "+" }</button>
              <button class="btn icon" title="Inklappen" onclick={collapse}>{ "‹" }</button>
          </div>
          <div class="board-column-body">
              {
                  match layout.add_affordance {
                      AddAffordance::EmptyPlaceholder => html! {
                          <div class="board-column-empty">
                              <p>{ "Geen taken" }</p>
                              <button class="btn" onclick={add_task.clone()}>{ "Taak toevoegen" }</button>
                          </div>
                      },
                      AddAffordance::ListFooter => html! {
                          <>
                              {
                                  for props.column.tasks.iter().cloned().zip(layout.cards.iter().cloned()).map(|(task, view)| {
                                      let is_dragging = props.dragging_task.as_deref() == Some(task.id.as_str());
                                      let key = task.id.clone();
                                      html! {
                                          <TaskCard
                                              key={key}
                                              task={task}
                                              view={view}
                                              column_id={column_id.clone()}
                                              is_dragging={is_dragging}
                                              on_click={props.on_task_click.clone()}
                                              on_delete={props.on_delete_task.clone()}
                                              on_drag_start={props.on_drag_start.clone()}
                                              on_drag_end={props.on_drag_end.clone()}
                                          />
                                      }
                                  })
                              }
                              <button class="btn add-task-footer" onclick={add_task.clone()}>{ "+ Taak toevoegen" }</button>
                          </>
                      }
                  }
              }
          </div>
      </div>
  }
}
