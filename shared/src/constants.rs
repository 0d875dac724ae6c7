// Entry parameters
pub const DEVICE_PARAM: &str = "mac";
pub const DESTINATION_PARAM: &str = "original_url";
pub const UNKNOWN_DEVICE_ID: &str = "00:00:00:00:00:00";
pub const UNKNOWN_DEVICE_LABEL: &str = "Unknown Device";
pub const DEFAULT_DESTINATION: &str = "http://www.google.com";

// Persisted fate keys
pub const FATE_PATH_KEY: &str = "user_fate";
pub const FATE_AMOUNT_KEY: &str = "payment_amount";

// Remote authority endpoints, relative to the API base
pub const AUTH_STATUS_ENDPOINT: &str = "/api/auth/status";
pub const QUIZ_ENDPOINT: &str = "/api/quiz";
pub const QUIZ_ANSWER_ENDPOINT: &str = "/api/quiz/answer";
pub const QUIZ_GIVE_UP_ENDPOINT: &str = "/api/quiz/giveup";
pub const PAYMENT_CHECK_ENDPOINT: &str = "/api/payment/check";
pub const PORTAL_CONFIG_ENDPOINT: &str = "/api/portal/config";

// External payment channel; the owed amount is appended
pub const PAYMENT_CHANNEL_URL: &str = "https://t.me/KDA_V2_bot?start=pay_";

// Polling and pacing, in milliseconds
pub const AUTH_POLL_INTERVAL_MS: u32 = 3000;
pub const PAYMENT_POLL_INTERVAL_MS: u32 = 3000;
pub const SPIN_DURATION_MS: u32 = 4000;
pub const SPIN_REVEAL_MS: u32 = 1500;
pub const QUIZ_REVEAL_MS: u32 = 2000;
pub const SUCCESS_REDIRECT_MS: u32 = 2000;

// Wheel geometry
pub const WHEEL_SECTORS: u32 = 6;
pub const SECTOR_DEGREES: u32 = 360 / WHEEL_SECTORS;
pub const BASE_SPIN_DEGREES: u64 = 1800;

// Amounts
pub const WHEEL_PAYMENT_AMOUNT: u32 = 100;
pub const GIVE_UP_SURCHARGE: u32 = 100;

// Placeholder question served when the quiz service is unreachable
pub const PLACEHOLDER_QUESTION_ID: &str = "error";
pub const PLACEHOLDER_QUESTION: &str = "The system is busy, please reload the page.";
pub const PLACEHOLDER_OPTIONS: [&str; 4] = ["A", "B", "C", "D"];

pub const SUBMIT_FAILED_ALERT: &str = "Submission failed";
