//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A vmodule rule could not be parsed
    #[error("invalid vmodule rule '{rule}': expect comma-separated list of filename=N")]
    VmoduleSyntax { rule: String },

    /// A handler was asked for a capability it does not provide
    #[error("{handler} handler does not support {capability}")]
    Unsupported {
        handler: String,
        capability: String,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a vmodule syntax error for the offending rule
    pub fn vmodule_syntax(rule: impl Into<String>) -> Self {
        LoggerError::VmoduleSyntax { rule: rule.into() }
    }

    /// Create an unsupported-capability error
    pub fn unsupported(handler: impl Into<String>, capability: impl Into<String>) -> Self {
        LoggerError::Unsupported {
            handler: handler.into(),
            capability: capability.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
