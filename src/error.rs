//! Error types and handling for the `SkyRoute` service

use thiserror::Error;

/// Main error type for the `SkyRoute` service
#[derive(Error, Debug)]
pub enum SkyRouteError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream provider faults (network, non-OK status, malformed payload)
    #[error("Provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A place name could not be turned into coordinates
    #[error("{message}")]
    Resolution { message: String },

    /// Unexpected fault while assembling a route report
    #[error("Analysis failed: {message}")]
    Analysis { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SkyRouteError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider error tagged with the upstream it came from
    pub fn provider<P: Into<String>, S: Into<String>>(provider: P, message: S) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new resolution error
    pub fn resolution<S: Into<String>>(message: S) -> Self {
        Self::Resolution {
            message: message.into(),
        }
    }

    /// Create a new analysis error
    pub fn analysis<S: Into<String>>(message: S) -> Self {
        Self::Analysis {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkyRouteError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            SkyRouteError::Provider { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            SkyRouteError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            SkyRouteError::Resolution { message } => message.clone(),
            SkyRouteError::Analysis { .. } => self.to_string(),
            SkyRouteError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for SkyRouteError {
    fn from(err: reqwest::Error) -> Self {
        let host = err
            .url()
            .and_then(|url| url.host_str())
            .unwrap_or("unknown")
            .to_string();
        // without_url keeps credentials in query strings out of the message
        Self::provider(host, err.without_url().to_string())
    }
}
