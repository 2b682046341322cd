use workboard_core::card::CardAction;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskCardMenuProps {
  pub open:      bool,
  pub on_toggle: Callback<()>,
  pub on_action: Callback<CardAction>
}

#[function_component(TaskCardMenu)]
pub fn task_card_menu(
  props: &TaskCardMenuProps
) -> Html {
  let toggle = {
    let on_toggle = props.on_toggle.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.stop_propagation();
        on_toggle.emit(());
      }
    )
  };

  let action_button =
    |action: CardAction,
     label: &'static str,
     class: &'static str| {
      let on_action =
        props.on_action.clone();
      html! {
          <button class={class} onclick={move |event: MouseEvent| {
              event.stop_propagation();
              on_action.emit(action);
          }}>{ label }</button>
      }
    };

  html! {
      <div class="task-card-menu">
          <button class="btn icon" title="Acties" onclick={toggle}>{ "⋯" }</button>
          {
              if props.open {
                  html! {
                      <div class="task-card-menu-items">
                          { action_button(CardAction::Edit, "Bewerken", "btn") }
                          { action_button(CardAction::Delete, "Verwijderen", "btn danger") }
                      </div>
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
