//! Stack state as reported by the control plane
//!
//! Everything here is read fresh from the backend on each query; nothing is
//! cached between poll iterations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Current state of a stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackState {
    /// Stack name
    pub name: String,

    /// Current status
    pub status: StackStatus,

    /// Outputs published by the template (empty until the stack completes)
    pub outputs: Vec<StackOutput>,
}

impl StackState {
    pub fn new(name: impl Into<String>, status: StackStatus) -> Self {
        Self {
            name: name.into(),
            status,
            outputs: Vec::new(),
        }
    }

    pub fn with_output(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.push(StackOutput {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn output(&self, key: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.key == key)
            .map(|o| o.value.as_str())
    }
}

/// A single stack output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackOutput {
    pub key: String,
    pub value: String,
}

/// One entry of a stack's event history
///
/// Identity is the event id. Events never change once the control plane
/// has published them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEvent {
    pub id: String,
    pub logical_resource_id: String,
    pub resource_status: String,
    pub status_reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Status of a stack
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StackStatus {
    CreateInProgress,
    CreateFailed,
    CreateComplete,
    RollbackInProgress,
    RollbackFailed,
    RollbackComplete,
    DeleteInProgress,
    DeleteFailed,
    DeleteComplete,
    UpdateInProgress,
    UpdateCompleteCleanupInProgress,
    UpdateComplete,
    UpdateFailed,
    UpdateRollbackInProgress,
    UpdateRollbackFailed,
    UpdateRollbackCompleteCleanupInProgress,
    UpdateRollbackComplete,
    ReviewInProgress,
    /// Any status this crate does not know about; treated as in progress
    Other(String),
}

const STATUS_NAMES: &[(StackStatus, &str)] = &[
    (StackStatus::CreateInProgress, "CREATE_IN_PROGRESS"),
    (StackStatus::CreateFailed, "CREATE_FAILED"),
    (StackStatus::CreateComplete, "CREATE_COMPLETE"),
    (StackStatus::RollbackInProgress, "ROLLBACK_IN_PROGRESS"),
    (StackStatus::RollbackFailed, "ROLLBACK_FAILED"),
    (StackStatus::RollbackComplete, "ROLLBACK_COMPLETE"),
    (StackStatus::DeleteInProgress, "DELETE_IN_PROGRESS"),
    (StackStatus::DeleteFailed, "DELETE_FAILED"),
    (StackStatus::DeleteComplete, "DELETE_COMPLETE"),
    (StackStatus::UpdateInProgress, "UPDATE_IN_PROGRESS"),
    (
        StackStatus::UpdateCompleteCleanupInProgress,
        "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS",
    ),
    (StackStatus::UpdateComplete, "UPDATE_COMPLETE"),
    (StackStatus::UpdateFailed, "UPDATE_FAILED"),
    (StackStatus::UpdateRollbackInProgress, "UPDATE_ROLLBACK_IN_PROGRESS"),
    (StackStatus::UpdateRollbackFailed, "UPDATE_ROLLBACK_FAILED"),
    (
        StackStatus::UpdateRollbackCompleteCleanupInProgress,
        "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS",
    ),
    (StackStatus::UpdateRollbackComplete, "UPDATE_ROLLBACK_COMPLETE"),
    (StackStatus::ReviewInProgress, "REVIEW_IN_PROGRESS"),
];

impl StackStatus {
    /// The wire name of the status (e.g. `CREATE_COMPLETE`)
    pub fn as_str(&self) -> &str {
        if let Self::Other(name) = self {
            return name;
        }
        STATUS_NAMES
            .iter()
            .find(|(status, _)| status == self)
            .map(|(_, name)| *name)
            .unwrap_or("UNKNOWN")
    }

    /// No further transition happens without new operator action.
    pub fn is_terminal(&self) -> bool {
        self.is_success() || self.is_failure()
    }

    /// Converged to the requested state.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::CreateComplete | Self::UpdateComplete)
    }

    /// Converged, but not to the requested state.
    ///
    /// Rollback completions count as failures: the stack is stable again,
    /// yet the requested change did not take effect.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::CreateFailed
                | Self::UpdateFailed
                | Self::RollbackComplete
                | Self::RollbackFailed
                | Self::UpdateRollbackComplete
                | Self::UpdateRollbackFailed
                | Self::DeleteFailed
                | Self::DeleteComplete
        )
    }
}

impl FromStr for StackStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(STATUS_NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(status, _)| status.clone())
            .unwrap_or_else(|| Self::Other(s.to_string())))
    }
}

impl From<String> for StackStatus {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<StackStatus> for String {
    fn from(status: StackStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for StackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
