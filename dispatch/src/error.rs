//! Error types for dispatcher setup and handler failures

use thiserror::Error;

use crate::config::ConfigError;

/// Dispatch result type alias
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Errors surfaced while building or activating a dispatcher.
///
/// Routing rejections (disabled handler, missing permission, console context)
/// are not errors: they are reported to the invoker and count as handled.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Command name cannot be empty")]
    EmptyRootName,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A handler panicked while executing.
///
/// Produced by the dispatcher boundary so a panic is reported through the
/// same error channel as a returned `Err`.
#[derive(Debug, Error)]
#[error("handler panicked: {message}")]
pub struct HandlerPanic {
    pub message: String,
}

impl HandlerPanic {
    pub(crate) fn from_payload(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&'static str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_root_name_message() {
        assert_eq!(
            DispatchError::EmptyRootName.to_string(),
            "Command name cannot be empty"
        );
    }

    #[test]
    fn config_errors_convert() {
        let err: DispatchError = ConfigError::Invalid {
            problems: vec!["bad".to_string()],
        }
        .into();
        assert!(matches!(err, DispatchError::Config(_)));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn panic_payloads_are_described() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(HandlerPanic::from_payload(payload.as_ref()).message, "boom");

        let payload: Box<dyn std::any::Any + Send> = Box::new(format!("code {}", 7));
        assert_eq!(HandlerPanic::from_payload(payload.as_ref()).message, "code 7");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u32);
        assert_eq!(
            HandlerPanic::from_payload(payload.as_ref()).message,
            "non-string panic payload"
        );
    }
}
