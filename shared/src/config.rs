use crate::constants::*;

/// Timings, amounts and external targets used by the flow controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    pub auth_poll_interval_ms: u32,
    pub payment_poll_interval_ms: u32,
    pub spin_duration_ms: u32,
    pub spin_reveal_ms: u32,
    pub quiz_reveal_ms: u32,
    pub success_redirect_ms: u32,
    pub wheel_payment_amount: u32,
    pub give_up_surcharge: u32,
    pub payment_channel_url: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            auth_poll_interval_ms: AUTH_POLL_INTERVAL_MS,
            payment_poll_interval_ms: PAYMENT_POLL_INTERVAL_MS,
            spin_duration_ms: SPIN_DURATION_MS,
            spin_reveal_ms: SPIN_REVEAL_MS,
            quiz_reveal_ms: QUIZ_REVEAL_MS,
            success_redirect_ms: SUCCESS_REDIRECT_MS,
            wheel_payment_amount: WHEEL_PAYMENT_AMOUNT,
            give_up_surcharge: GIVE_UP_SURCHARGE,
            payment_channel_url: PAYMENT_CHANNEL_URL.to_string(),
        }
    }
}

impl PortalConfig {
    /// Link to the external payment channel with the owed amount embedded.
    pub fn payment_link(&self, amount: u32) -> String {
        format!("{}{}", self.payment_channel_url, amount)
    }
}
