pub mod authority;
pub mod components;
pub mod config;
pub mod hooks;
pub mod pages;
pub mod runtime;
pub mod storage;
pub mod styles;

use shared::PageState;
use yew::prelude::*;

use crate::components::{MaintenanceBanner, PortalBackdrop, ResetButton};
use crate::hooks::use_portal;
use crate::pages::{
    payment::PaymentPage, quiz::QuizPage, success::SuccessPage, warning::WarningPage,
    wheel::WheelPage,
};

#[function_component(App)]
pub fn app() -> Html {
    let portal = use_portal();
    let view = &portal.view;

    let page = match view.page {
        PageState::Warning => html! {
            <WarningPage
                device_label={view.device_label.clone()}
                on_acknowledge={portal.on_acknowledge()}
            />
        },
        PageState::Wheel => html! {
            <WheelPage
                wheel={view.wheel.clone()}
                spin_duration_ms={view.spin_duration_ms}
                on_spin={portal.on_spin()}
            />
        },
        PageState::Quiz => html! {
            <QuizPage
                quiz={view.quiz.clone()}
                rules={view.settings.quiz_rules.clone()}
                on_select={portal.on_select()}
                on_submit={portal.on_submit()}
                on_retry={portal.on_retry()}
                on_give_up={portal.on_give_up()}
            />
        },
        PageState::Payment => html! {
            <PaymentPage
                payment={view.payment.clone()}
                payment_link={view.payment_link.clone()}
            />
        },
        PageState::Success => html! { <SuccessPage /> },
    };

    html! {
        <PortalBackdrop>
            <MaintenanceBanner active={view.settings.maintenance_mode} />
            <div class="w-full max-w-md">
                {page}
            </div>
            <ResetButton onclick={portal.on_reset()} />
        </PortalBackdrop>
    }
}
