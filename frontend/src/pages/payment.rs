use shared::payment::{PaymentFlow, PaymentPhase};
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct PaymentPageProps {
    pub payment: PaymentFlow,
    pub payment_link: Option<String>,
}

#[function_component(PaymentPage)]
pub fn payment_page(props: &PaymentPageProps) -> Html {
    let Some(request) = props.payment.request() else {
        return html! {
            <div class={styles::PAGE_CARD}>
                <p class={styles::TEXT_BODY}>{"Checking what you owe..."}</p>
            </div>
        };
    };

    let status = match props.payment.phase() {
        PaymentPhase::Confirmed => "Payment received. Restoring your access...",
        _ => "Waiting for payment confirmation...",
    };

    html! {
        <div class={styles::PAGE_CARD}>
            <h2 class={styles::TEXT_H2}>{"Capital Sanction"}</h2>
            <p class={classes!(styles::TEXT_BODY, "mt-2")}>{request.reason().message()}</p>
            <p class={styles::AMOUNT}>{request.amount().to_string()}</p>
            if let Some(link) = &props.payment_link {
                <a class={classes!(styles::BUTTON_PRIMARY, "w-full")} href={link.clone()}>
                    {"Pay through the payment channel"}
                </a>
            }
            <div class="mt-6 flex items-center justify-center gap-2">
                <svg class={styles::LOADING_SPINNER} xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                    <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
                    <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"></path>
                </svg>
                <span class={styles::TEXT_SMALL}>{status}</span>
            </div>
        </div>
    }
}
