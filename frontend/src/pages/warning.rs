use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct WarningPageProps {
    pub device_label: String,
    pub on_acknowledge: Callback<MouseEvent>,
}

#[function_component(WarningPage)]
pub fn warning_page(props: &WarningPageProps) -> Html {
    html! {
        <div class={styles::PAGE_CARD}>
            <h1 class={styles::TEXT_H1}>{"Network Access Suspended"}</h1>
            <p class={classes!(styles::TEXT_BODY, "mt-4")}>
                {"This device has been held at the gateway. Accept your fate to earn your way back online."}
            </p>
            <p class={classes!(styles::TEXT_SMALL, "mt-2")}>
                {"Device: "}<span class="font-mono">{props.device_label.clone()}</span>
            </p>
            <button class={classes!(styles::BUTTON_PRIMARY, "mt-6", "w-full")} onclick={props.on_acknowledge.clone()}>
                {"Accept my fate"}
            </button>
        </div>
    }
}
