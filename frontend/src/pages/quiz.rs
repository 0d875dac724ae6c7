use shared::quiz::{QuizFlow, QuizPhase};
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct QuizPageProps {
    pub quiz: QuizFlow,
    pub rules: Option<String>,
    pub on_select: Callback<String>,
    pub on_submit: Callback<MouseEvent>,
    pub on_retry: Callback<MouseEvent>,
    pub on_give_up: Callback<MouseEvent>,
}

#[function_component(QuizPage)]
pub fn quiz_page(props: &QuizPageProps) -> Html {
    let quiz = &props.quiz;
    let phase = quiz.phase();
    let penalty = quiz.penalty().cumulative();

    let body = match (phase, quiz.question()) {
        (QuizPhase::Idle | QuizPhase::Loading, _) | (_, None) => html! {
            <div class="flex justify-center py-8">
                <svg class={styles::LOADING_SPINNER} xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                    <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
                    <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"></path>
                </svg>
            </div>
        },
        (_, Some(question)) => {
            let choosing = *phase == QuizPhase::AwaitingAnswer;
            html! {
                <>
                    <p class={classes!(styles::TEXT_BODY, "text-lg", "mb-4")}>{question.question.clone()}</p>
                    <div class="space-y-2">
                        { for question.options.iter().map(|option| {
                            let chosen = quiz.selected() == Some(option.as_str());
                            let onclick = {
                                let on_select = props.on_select.clone();
                                let option = option.clone();
                                Callback::from(move |_: MouseEvent| on_select.emit(option.clone()))
                            };
                            html! {
                                <button
                                    class={if chosen { styles::OPTION_SELECTED } else { styles::OPTION }}
                                    disabled={!choosing}
                                    {onclick}
                                >
                                    {option.clone()}
                                </button>
                            }
                        }) }
                    </div>
                    <button
                        class={classes!(styles::BUTTON_PRIMARY, "mt-6", "w-full")}
                        disabled={!choosing || quiz.selected().is_none()}
                        onclick={props.on_submit.clone()}
                    >
                        { if *phase == QuizPhase::Grading { "Submitting..." } else { "Submit answer" } }
                    </button>
                </>
            }
        }
    };

    let feedback = match phase {
        QuizPhase::Escalate => Some((styles::ALERT_ERROR, "Wrong again. A new question is on its way.")),
        QuizPhase::UnlockedDirect => Some((styles::ALERT_SUCCESS, "Correct! Restoring your access.")),
        QuizPhase::UnlockedPayPenalty { .. } => {
            Some((styles::ALERT_WARNING, "Correct! But the accumulated penalty must be paid."))
        }
        QuizPhase::GivingUp => Some((styles::ALERT_WARNING, "Calculating what you owe...")),
        _ => None,
    };
    let server_message = quiz.last_result().and_then(|result| result.message.clone());

    html! {
        <div class={styles::PAGE_CARD}>
            <h2 class={styles::TEXT_H2}>{"Redemption through Knowledge"}</h2>
            if let Some(rules) = &props.rules {
                <p class={classes!(styles::TEXT_SMALL, "mt-2")}>{rules.clone()}</p>
            }
            if penalty > 0 {
                <p class={classes!(styles::TEXT_ERROR, "mt-2")}>
                    {format!("Accumulated penalty: {}", penalty)}
                </p>
            }
            <div class="mt-6">{body}</div>
            if let Some((class, text)) = feedback {
                <div class={classes!(class, "mt-4")}>
                    <p>{text}</p>
                    if let Some(message) = &server_message {
                        <p class="mt-1 text-sm">{message.clone()}</p>
                    }
                </div>
            }
            if *phase == QuizPhase::Retry {
                <RetryModal
                    wrong_count={quiz.wrong_count()}
                    penalty={penalty}
                    on_retry={props.on_retry.clone()}
                    on_give_up={props.on_give_up.clone()}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct RetryModalProps {
    wrong_count: u32,
    penalty: u32,
    on_retry: Callback<MouseEvent>,
    on_give_up: Callback<MouseEvent>,
}

/// Shown after the first miss: try another question or give up and pay.
#[function_component(RetryModal)]
fn retry_modal(props: &RetryModalProps) -> Html {
    html! {
        <div class={styles::MODAL_OVERLAY}>
            <div class={styles::MODAL_CARD}>
                <h3 class={styles::TEXT_H3}>{"Wrong answer"}</h3>
                <p class={classes!(styles::TEXT_BODY, "mt-2")}>
                    {format!("Misses so far: {}. Current penalty: {}.", props.wrong_count, props.penalty)}
                </p>
                <div class="mt-6 flex gap-4">
                    <button class={classes!(styles::BUTTON_PRIMARY, "flex-1")} onclick={props.on_retry.clone()}>
                        {"Try another question"}
                    </button>
                    <button class={classes!(styles::BUTTON_DANGER, "flex-1")} onclick={props.on_give_up.clone()}>
                        {"Give up and pay"}
                    </button>
                </div>
            </div>
        </div>
    }
}
