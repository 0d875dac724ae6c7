pub mod payment;
pub mod quiz;
pub mod success;
pub mod warning;
pub mod wheel;
