//! Stack deployment error types

use thiserror::Error;

/// Error returned by a single backend call.
///
/// Backends that expose a structured error code pass it through in `code`;
/// `message` always carries the human-readable text the service returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub code: Option<String>,
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

const NOT_FOUND_CODES: &[&str] = &["StackNotFound", "StackNotFoundException"];
const NOT_FOUND_PREFIX: &str = "stack with id ";
const NOT_FOUND_SUFFIX: &str = "does not exist";
const NO_UPDATES_PHRASE: &str = "No updates are to be performed";

/// Whether a describe error means the stack is unknown to the control plane.
///
/// The control plane reports an unknown stack as a `ValidationError` whose
/// message reads "Stack with id X does not exist". Errors without a service
/// code (transport, timeouts) never count as not-found.
pub fn is_stack_not_found(err: &ApiError) -> bool {
    match err.code.as_deref() {
        Some(code) if NOT_FOUND_CODES.contains(&code) => true,
        Some("ValidationError") => {
            let message = err.message.trim().trim_end_matches('.').to_ascii_lowercase();
            message.starts_with(NOT_FOUND_PREFIX) && message.ends_with(NOT_FOUND_SUFFIX)
        }
        _ => false,
    }
}

/// Whether an update error means the stack already matches the template.
pub fn is_no_updates(err: &ApiError) -> bool {
    err.message.contains(NO_UPDATES_PHRASE)
}

/// Stack deployment errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error(
        "No default VPC found in this region. Create one with \
        `aws ec2 create-default-vpc` or choose a region that has a default VPC"
    )]
    NoDefaultNetwork,

    #[error("Network discovery failed ({operation}): {source}")]
    Network {
        operation: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("{operation} failed for stack {stack}: {source}")]
    Api {
        operation: &'static str,
        stack: String,
        #[source]
        source: ApiError,
    },

    #[error("Stack {stack} disappeared while waiting for it to converge")]
    StackVanished { stack: String },

    #[error("Stack not found: {stack}")]
    StackNotFound { stack: String },

    #[error("Stack {stack} finished with status {status}")]
    DeploymentFailed { stack: String, status: String },

    #[error("Deployment cancelled")]
    Cancelled,
}

impl CloudError {
    pub(crate) fn api(operation: &'static str, stack: &str, source: ApiError) -> Self {
        Self::Api {
            operation,
            stack: stack.to_string(),
            source,
        }
    }

    /// Caller-initiated cancellation, as opposed to a backend failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
