mod wheel_canvas;

use shared::fate::FatePath;
use shared::wheel::WheelEngine;
use yew::prelude::*;

use crate::styles;
use wheel_canvas::WheelCanvas;

#[derive(Properties, PartialEq)]
pub struct WheelPageProps {
    pub wheel: WheelEngine,
    pub spin_duration_ms: u32,
    pub on_spin: Callback<MouseEvent>,
}

#[function_component(WheelPage)]
pub fn wheel_page(props: &WheelPageProps) -> Html {
    let verdict = props.wheel.outcome().map(|outcome| match outcome.path() {
        FatePath::Quiz => ("Redemption through knowledge", styles::VERDICT_QUIZ),
        FatePath::Payment => ("Capital sanction", styles::VERDICT_PAYMENT),
    });

    html! {
        <div class={styles::PAGE_CARD}>
            <h2 class={styles::TEXT_H2}>{"Spin the Wheel of Fate"}</h2>
            <p class={styles::TEXT_BODY}>
                {"Where the pointer stops decides how you earn your connection back."}
            </p>
            <div class="my-6">
                <WheelCanvas
                    rotation={props.wheel.rotation()}
                    is_spinning={props.wheel.is_spinning()}
                    duration_ms={props.spin_duration_ms}
                />
            </div>
            {
                match verdict {
                    Some((text, class)) => html! { <p class={class}>{text}</p> },
                    None => html! {},
                }
            }
            <SpinButton
                is_spinning={props.wheel.is_spinning()}
                is_settled={props.wheel.outcome().is_some()}
                onclick={props.on_spin.clone()}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SpinButtonProps {
    is_spinning: bool,
    is_settled: bool,
    onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
fn spin_button(props: &SpinButtonProps) -> Html {
    let is_disabled = props.is_spinning || props.is_settled;
    let button_text = if props.is_spinning {
        "Spinning..."
    } else if props.is_settled {
        "Fate decided"
    } else {
        "Spin"
    };
    let button_class = if is_disabled {
        styles::BUTTON_SPIN_DISABLED
    } else {
        styles::BUTTON_SPIN
    };

    html! {
        <button
            onclick={props.onclick.clone()}
            disabled={is_disabled}
            class={classes!(button_class)}
        >
            <div class="flex items-center justify-center">
                if props.is_spinning {
                    <svg class="inline-block mr-2 animate-spin" xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                        <circle cx="12" cy="12" r="10" />
                        <path d="M12 6v6l4 2" />
                    </svg>
                }
                <span>{button_text}</span>
            </div>
        </button>
    }
}
