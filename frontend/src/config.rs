use shared::PortalConfig;
use web_sys::window;

pub fn get_api_base_url() -> String {
    // The portal is served by the gateway that also answers the API, so the
    // page's own origin is the authority.
    if let Some(window) = window() {
        if let Ok(origin) = window.location().origin() {
            return origin;
        }
    }

    // Default to 127.0.0.1 for development
    "http://127.0.0.1:8000".to_string()
}

pub fn portal_config() -> PortalConfig {
    PortalConfig::default()
}
