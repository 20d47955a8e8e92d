use std::error::Error;
use std::fmt;

/// Message shown when a platform model is constructed without accepting the license.
pub const LICENSE_REJECTION_MESSAGE: &str = "You must accept the platform model license (LICENSE.platform) to use this model. \
     You can do this by setting accept_platform_model_license=true when initializing the model.";

/// Errors raised by this crate itself.
///
/// Failures coming from the base detection framework are never wrapped in
/// this type; they are handed back to the caller unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The caller did not explicitly accept the Platform Model License
    LicenseNotAccepted,
    /// A configuration override produced an invalid record
    InvalidConfiguration(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlatformError::LicenseNotAccepted => write!(f, "{}", LICENSE_REJECTION_MESSAGE),
            PlatformError::InvalidConfiguration(msg) => write!(f, "Invalid model configuration: {}", msg),
        }
    }
}

impl Error for PlatformError {}

impl From<serde_json::Error> for PlatformError {
    fn from(err: serde_json::Error) -> Self {
        PlatformError::InvalidConfiguration(err.to_string())
    }
}
