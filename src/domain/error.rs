use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {messages:?}")]
    Validation { messages: Vec<String> },

    #[error("{message}")]
    MissingArgument { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Validation failure carrying a single message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            messages: vec![message.into()],
        }
    }

    /// Report required arguments that were not supplied to `function`
    ///
    /// Produces `f() missing 2 required arguments: 'a' and 'b'`.
    pub fn missing_arguments(function: &str, names: &[&str]) -> Self {
        let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();

        let listed = match quoted.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [head @ .., last] => format!("{} and {}", head.join(", "), last),
        };

        let noun = if names.len() == 1 {
            "argument"
        } else {
            "arguments"
        };

        Self::MissingArgument {
            message: format!(
                "{}() missing {} required {}: {}",
                function,
                names.len(),
                noun,
                listed
            ),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Messages attached to a validation error, empty for other kinds
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Validation { messages } => messages,
            _ => &[],
        }
    }
}
