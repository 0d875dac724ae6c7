use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct ResetButtonProps {
    pub onclick: Callback<MouseEvent>,
}

/// Operator control that forgets the persisted fate. Debug builds only.
#[function_component(ResetButton)]
pub fn reset_button(props: &ResetButtonProps) -> Html {
    if !cfg!(debug_assertions) {
        return html! {};
    }
    html! {
        <button class={styles::BUTTON_RESET} onclick={props.onclick.clone()}>
            {"Reset"}
        </button>
    }
}
