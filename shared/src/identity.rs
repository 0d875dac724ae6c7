use crate::constants::*;

/// Who the portal is talking about and where they were headed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub device_id: String,
    pub original_destination: String,
}

impl DeviceIdentity {
    /// Resolves the identity from entry parameters. Missing or blank values
    /// fall back to fixed sentinels, so this never fails.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            device_id: present(DEVICE_PARAM).unwrap_or_else(|| UNKNOWN_DEVICE_ID.to_string()),
            original_destination: present(DESTINATION_PARAM)
                .unwrap_or_else(|| DEFAULT_DESTINATION.to_string()),
        }
    }

    pub fn short_label(&self) -> &str {
        if self.device_id.is_empty() {
            UNKNOWN_DEVICE_LABEL
        } else {
            &self.device_id
        }
    }
}
