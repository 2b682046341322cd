use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct CollapsedColumnProps {
  pub color:     String,
  /// `"{title} ({count})"`
  pub label:     String,
  pub on_expand: Callback<MouseEvent>
}

/// Narrow vertical strip standing in for
/// a collapsed column. Clicking anywhere
/// on it expands the column again.
#[function_component(CollapsedColumn)]
pub fn collapsed_column(
  props: &CollapsedColumnProps
) -> Html {
  let dot_class = format!(
    "status-dot dot-{}",
    props.color
  );

  html! {
      <div
          class="board-column collapsed"
          title="Uitklappen"
          onclick={props.on_expand.clone()}
      >
          <span class={dot_class}></span>
          <span class="board-column-collapsed-label">{ &props.label }</span>
      </div>
  }
}
