use yew::prelude::*;

use crate::styles;

#[function_component(SuccessPage)]
pub fn success_page() -> Html {
    html! {
        <div class={styles::PAGE_CARD}>
            <div class={styles::ALERT_SUCCESS}>
                <h2 class="text-2xl font-bold">{"Access restored"}</h2>
                <p class="mt-2">{"Your connection is back. Taking you where you were headed..."}</p>
            </div>
        </div>
    }
}
