use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct MaintenanceBannerProps {
    pub active: bool,
}

#[function_component(MaintenanceBanner)]
pub fn maintenance_banner(props: &MaintenanceBannerProps) -> Html {
    if !props.active {
        return html! {};
    }
    html! {
        <div class={styles::BANNER_MAINTENANCE}>
            {"The gateway is under maintenance. Some checks may be slow to respond."}
        </div>
    }
}
