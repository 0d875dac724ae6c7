pub mod maintenance_banner;
pub mod portal_backdrop;
pub mod reset_button;

pub use maintenance_banner::MaintenanceBanner;
pub use portal_backdrop::PortalBackdrop;
pub use reset_button::ResetButton;
