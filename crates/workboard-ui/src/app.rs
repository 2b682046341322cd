use chrono::Utc;
use workboard_core::board::BoardIntent;
use workboard_core::config::BoardConfig;
use workboard_core::drag::TaskMove;
use workboard_core::owner::BoardOwner;
use workboard_core::stages::partition_tasks;
use workboard_core::task::Task;
use yew::{
  Callback,
  Html,
  MouseEvent,
  function_component,
  html,
  use_memo,
  use_state
};

use crate::components::TaskBoard;

const DEMO_TASKS: &str =
  include_str!("../assets/demo_tasks.json");

fn demo_tasks() -> Vec<Task> {
  match serde_json::from_str(DEMO_TASKS) {
    | Ok(tasks) => tasks,
    | Err(error) => {
      tracing::error!(%error, "demo tasks are invalid");
      Vec::new()
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config =
    use_memo((), |_| BoardConfig::embedded());
  let owner = {
    let config = config.clone();
    use_state(move || {
      BoardOwner::new(partition_tasks(
        demo_tasks(),
        &config.stages
      ))
    })
  };
  let opened = use_state(|| None::<Task>);

  let apply = {
    let owner = owner.clone();
    Callback::from(
      move |intent: BoardIntent| {
        let mut next = (*owner).clone();
        if next.apply(intent, Utc::now()) {
          owner.set(next);
        }
      }
    )
  };

  let on_task_move = {
    let apply = apply.clone();
    Callback::from(
      move |(task_id, from_column_id, to_column_id): (
        String,
        String,
        String
      )| {
        apply.emit(BoardIntent::Move(
          TaskMove {
            task_id,
            from_column_id,
            to_column_id
          }
        ))
      }
    )
  };

  let on_add_task = {
    let apply = apply.clone();
    Callback::from(
      move |column_id: String| {
        apply.emit(BoardIntent::AddRequest {
          column_id
        })
      }
    )
  };

  let on_delete_task = {
    let apply = apply.clone();
    let opened = opened.clone();
    Callback::from(
      move |(task_id, column_id): (
        String,
        String
      )| {
        if opened
          .as_ref()
          .is_some_and(|task| task.id == task_id)
        {
          opened.set(None);
        }
        apply.emit(BoardIntent::Delete {
          task_id,
          column_id
        })
      }
    )
  };

  let on_task_click = {
    let opened = opened.clone();
    Callback::from(move |task: Task| {
      tracing::debug!(task_id = %task.id, "task opened");
      opened.set(Some(task))
    })
  };

  let on_close = {
    let opened = opened.clone();
    Callback::from(move |_: MouseEvent| {
      opened.set(None)
    })
  };

  html! {
      <div class="app">
          <TaskBoard
              columns={owner.snapshot()}
              dark_mode={config.dark_mode}
              {on_task_move}
              {on_task_click}
              {on_add_task}
              {on_delete_task}
          />
          {
              match &*opened {
                  | Some(task) => html! {
                      <div class="panel details">
                          <div class="header">
                              <span>{ &task.title }</span>
                              <button class="btn icon" title="Sluiten" onclick={on_close}>{ "×" }</button>
                          </div>
                          <div class="kv">
                              <strong>{ "Project" }</strong>
                              <div>{ &task.project_name }</div>
                          </div>
                          <div class="kv">
                              <strong>{ "Prioriteit" }</strong>
                              <div>{ task.priority.label() }</div>
                          </div>
                          <div class="kv">
                              <strong>{ "Aangemaakt" }</strong>
                              <div>{ &task.created_at }</div>
                          </div>
                          {
                              match &task.description {
                                  | Some(description) => html! { <p>{ description }</p> },
                                  | None => html! {}
                              }
                          }
                      </div>
                  },
                  | None => html! {}
              }
          }
      </div>
  }
}
