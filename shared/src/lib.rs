//! Platform-independent core of the penalty portal: what a gated device
//! owes, how it gets there, and when it is let go.

pub mod api;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod fate;
pub mod identity;
pub mod payment;
pub mod poller;
pub mod quiz;
pub mod wheel;

pub use api::{Authority, Call, Reply};
pub use config::PortalConfig;
pub use controller::{Deferred, Effect, FlowController, PageState};
pub use error::{PortalError, PortalResult};
pub use fate::{FatePath, FateStore, KeyValueStore, MemoryStore, PersistedFate};
pub use identity::DeviceIdentity;
