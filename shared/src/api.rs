use serde::{Deserialize, Serialize};

use crate::constants::{PLACEHOLDER_OPTIONS, PLACEHOLDER_QUESTION, PLACEHOLDER_QUESTION_ID};
use crate::error::PortalResult;
use crate::poller::PollTicket;

// === API Types ===

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuthStatusResponse {
    pub authorized: bool,
    #[serde(default)]
    pub mac: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
}

impl QuizQuestion {
    /// Stand-in shown when the quiz service cannot be reached.
    pub fn placeholder() -> Self {
        Self {
            id: PLACEHOLDER_QUESTION_ID.to_string(),
            question: PLACEHOLDER_QUESTION.to_string(),
            options: PLACEHOLDER_OPTIONS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnswerRequest {
    #[serde(rename = "student_id")]
    pub device_id: String,
    pub question_id: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStatus {
    Unlocked,
    PayPenalty,
    Wrong,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnswerResponse {
    #[serde(default)]
    pub correct: bool,
    #[serde(default)]
    pub status: AnswerStatus,
    #[serde(default)]
    pub penalty: Option<u32>,
    #[serde(default)]
    pub wrong_count: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AnswerResponse {
    /// The authority counts an explicit unlock status as solved even when
    /// `correct` is missing.
    pub fn is_solved(&self) -> bool {
        self.correct || matches!(self.status, AnswerStatus::Unlocked | AnswerStatus::PayPenalty)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GiveUpRequest {
    #[serde(rename = "student_id")]
    pub device_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GiveUpResponse {
    pub amount: u32,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaymentStatusResponse {
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PortalSettings {
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub quiz_rules: Option<String>,
    #[serde(default)]
    pub maintenance_mode: bool,
}

/// The remote service that decides questions, amounts and authorization.
#[allow(async_fn_in_trait)]
pub trait Authority {
    async fn authorization_status(&self, device_id: &str) -> PortalResult<AuthStatusResponse>;
    async fn fetch_question(&self) -> PortalResult<QuizQuestion>;
    async fn submit_answer(&self, request: &AnswerRequest) -> PortalResult<AnswerResponse>;
    async fn give_up(&self, request: &GiveUpRequest) -> PortalResult<GiveUpResponse>;
    async fn payment_status(&self, device_id: &str) -> PortalResult<PaymentStatusResponse>;
    async fn portal_settings(&self) -> PortalResult<PortalSettings>;
}

/// One request the flow controller wants made.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AuthorizationStatus(PollTicket),
    PaymentStatus(PollTicket),
    FetchQuestion,
    SubmitAnswer(AnswerRequest),
    GiveUp(GiveUpRequest),
    PortalSettings,
}

/// The result of a `Call`, handed back to the flow controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    AuthorizationStatus(PollTicket, PortalResult<AuthStatusResponse>),
    PaymentStatus(PollTicket, PortalResult<PaymentStatusResponse>),
    Question(PortalResult<QuizQuestion>),
    Answer(PortalResult<AnswerResponse>),
    GiveUp(PortalResult<GiveUpResponse>),
    PortalSettings(PortalResult<PortalSettings>),
}

impl Call {
    pub async fn perform<A: Authority>(self, authority: &A, device_id: &str) -> Reply {
        match self {
            Call::AuthorizationStatus(ticket) => {
                Reply::AuthorizationStatus(ticket, authority.authorization_status(device_id).await)
            }
            Call::PaymentStatus(ticket) => {
                Reply::PaymentStatus(ticket, authority.payment_status(device_id).await)
            }
            Call::FetchQuestion => Reply::Question(authority.fetch_question().await),
            Call::SubmitAnswer(request) => Reply::Answer(authority.submit_answer(&request).await),
            Call::GiveUp(request) => Reply::GiveUp(authority.give_up(&request).await),
            Call::PortalSettings => Reply::PortalSettings(authority.portal_settings().await),
        }
    }
}
