use crate::api::{AnswerRequest, AnswerResponse, AnswerStatus, GiveUpRequest, QuizQuestion};
use crate::error::PortalResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    Loading,
    AwaitingAnswer,
    Grading,
    /// First miss on this question: the device may retry or give up.
    Retry,
    /// Repeated miss: a fresh question follows without asking.
    Escalate,
    UnlockedDirect,
    UnlockedPayPenalty { amount: u32 },
    GivingUp,
}

/// What a graded answer means for the rest of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizVerdict {
    Retry,
    Escalate,
    UnlockedDirect,
    UnlockedPayPenalty(u32),
}

/// Penalty accumulated on the authority's side, as last reported by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PenaltyState {
    cumulative: u32,
}

impl PenaltyState {
    pub fn cumulative(&self) -> u32 {
        self.cumulative
    }

    /// Never lowers the penalty.
    pub fn raise(&mut self, reported: u32) {
        self.cumulative = self.cumulative.max(reported);
    }

    /// Amount owed when the authority cannot be asked for one.
    pub fn fallback_amount(&self, surcharge: u32) -> u32 {
        self.cumulative.saturating_add(surcharge)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizFlow {
    phase: QuizPhase,
    question: Option<QuizQuestion>,
    selected: Option<String>,
    last_result: Option<AnswerResponse>,
    wrong_count: u32,
    penalty: PenaltyState,
}

impl Default for QuizFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizFlow {
    pub fn new() -> Self {
        Self {
            phase: QuizPhase::Idle,
            question: None,
            selected: None,
            last_result: None,
            wrong_count: 0,
            penalty: PenaltyState::default(),
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn question(&self) -> Option<&QuizQuestion> {
        self.question.as_ref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn last_result(&self) -> Option<&AnswerResponse> {
        self.last_result.as_ref()
    }

    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    pub fn penalty(&self) -> PenaltyState {
        self.penalty
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, QuizPhase::Loading | QuizPhase::Grading | QuizPhase::GivingUp)
    }

    /// Clears the previous attempt and waits for a new question.
    pub fn begin_fetch(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.phase = QuizPhase::Loading;
        self.question = None;
        self.selected = None;
        self.last_result = None;
        self.wrong_count = 0;
        true
    }

    pub fn load_question(&mut self, result: PortalResult<QuizQuestion>) -> bool {
        if self.phase != QuizPhase::Loading {
            return false;
        }
        let question = result.unwrap_or_else(|err| {
            log::warn!("Failed to fetch question, showing placeholder: {}", err);
            QuizQuestion::placeholder()
        });
        self.question = Some(question);
        self.phase = QuizPhase::AwaitingAnswer;
        true
    }

    pub fn select(&mut self, answer: &str) -> bool {
        if self.phase != QuizPhase::AwaitingAnswer {
            return false;
        }
        let offered = self
            .question
            .as_ref()
            .map_or(false, |q| q.options.iter().any(|o| o == answer));
        if offered {
            self.selected = Some(answer.to_string());
        }
        offered
    }

    pub fn begin_submit(&mut self, device_id: &str) -> Option<AnswerRequest> {
        if self.phase != QuizPhase::AwaitingAnswer {
            return None;
        }
        let question = self.question.as_ref()?;
        let answer = self.selected.clone()?;
        self.phase = QuizPhase::Grading;
        Some(AnswerRequest {
            device_id: device_id.to_string(),
            question_id: question.id.clone(),
            answer,
        })
    }

    /// The submission never reached a verdict; the selection is kept so the
    /// device can submit again.
    pub fn submit_failed(&mut self) {
        if self.phase == QuizPhase::Grading {
            self.phase = QuizPhase::AwaitingAnswer;
        }
    }

    pub fn grade(&mut self, response: AnswerResponse) -> Option<QuizVerdict> {
        if self.phase != QuizPhase::Grading {
            return None;
        }
        if let Some(penalty) = response.penalty {
            self.penalty.raise(penalty);
        }

        let verdict = if response.is_solved() {
            match (response.status.clone(), response.penalty) {
                (AnswerStatus::PayPenalty, Some(amount)) if amount > 0 => {
                    QuizVerdict::UnlockedPayPenalty(amount)
                }
                (AnswerStatus::PayPenalty, _) => {
                    log::warn!("Penalty unlock without a positive penalty, treating as direct unlock");
                    QuizVerdict::UnlockedDirect
                }
                _ => QuizVerdict::UnlockedDirect,
            }
        } else {
            self.wrong_count = response.wrong_count.unwrap_or(self.wrong_count + 1);
            if response.wrong_count == Some(1) {
                QuizVerdict::Retry
            } else {
                QuizVerdict::Escalate
            }
        };

        self.phase = match verdict {
            QuizVerdict::Retry => QuizPhase::Retry,
            QuizVerdict::Escalate => QuizPhase::Escalate,
            QuizVerdict::UnlockedDirect => QuizPhase::UnlockedDirect,
            QuizVerdict::UnlockedPayPenalty(amount) => QuizPhase::UnlockedPayPenalty { amount },
        };
        self.last_result = Some(response);
        Some(verdict)
    }

    /// Dismisses the retry prompt and asks for a fresh question.
    pub fn retry(&mut self) -> bool {
        self.phase == QuizPhase::Retry && self.begin_fetch()
    }

    pub fn begin_give_up(&mut self, device_id: &str) -> Option<GiveUpRequest> {
        if self.phase != QuizPhase::Retry {
            return None;
        }
        self.phase = QuizPhase::GivingUp;
        Some(GiveUpRequest {
            device_id: device_id.to_string(),
        })
    }
}
