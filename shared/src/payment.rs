use serde::{Deserialize, Serialize};

use crate::fate::PersistedFate;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PaymentReason {
    /// The wheel landed on a payment sector.
    WheelSanction,
    /// The quiz was solved but earlier misses left a penalty.
    PenaltyUnlock,
    GaveUp,
    /// Picked up from persisted fate after a reload.
    Resumed,
}

impl PaymentReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::WheelSanction => "Direct capital sanction",
            Self::PenaltyUnlock => "Correct! But the accumulated penalty must be paid",
            Self::GaveUp => "Gave up on the quiz",
            Self::Resumed => "Outstanding payment",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PaymentRequest {
    amount: u32,
    reason: PaymentReason,
}

impl PaymentRequest {
    /// Returns `None` for a zero amount; nothing is owed then.
    pub fn new(amount: u32, reason: PaymentReason) -> Option<Self> {
        (amount > 0).then_some(Self { amount, reason })
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn reason(&self) -> PaymentReason {
        self.reason
    }

    pub fn fate(&self) -> PersistedFate {
        PersistedFate::payment(self.amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentPhase {
    Idle,
    AwaitingConfirmation,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFlow {
    request: Option<PaymentRequest>,
    phase: PaymentPhase,
}

impl Default for PaymentFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentFlow {
    pub fn new() -> Self {
        Self {
            request: None,
            phase: PaymentPhase::Idle,
        }
    }

    pub fn request(&self) -> Option<&PaymentRequest> {
        self.request.as_ref()
    }

    pub fn phase(&self) -> PaymentPhase {
        self.phase
    }

    pub fn set_request(&mut self, request: PaymentRequest) {
        self.request = Some(request);
    }

    pub fn await_confirmation(&mut self) {
        if self.phase != PaymentPhase::Confirmed {
            self.phase = PaymentPhase::AwaitingConfirmation;
        }
    }

    /// Returns true only for the first confirmation.
    pub fn confirm(&mut self) -> bool {
        if self.phase == PaymentPhase::Confirmed {
            return false;
        }
        self.phase = PaymentPhase::Confirmed;
        true
    }
}
