use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// The request never produced a response.
    Network(String),
    /// The authority answered with a non-success status code.
    Status(u16),
    /// The response body did not match the expected shape.
    Decode(String),
    Storage(String),
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortalError::Network(msg) => write!(f, "Network error: {}", msg),
            PortalError::Status(code) => write!(f, "Error status: {}", code),
            PortalError::Decode(msg) => write!(f, "Error parsing response: {}", msg),
            PortalError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for PortalError {}

pub type PortalResult<T> = Result<T, PortalError>;
