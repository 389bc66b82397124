//! Lifecycle actions for a stack deployment

use serde::{Deserialize, Serialize};

/// Request the deployer issues for a stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    /// The stack does not exist yet
    Create,
    /// The stack exists and is brought in line with the template
    Update,
}

impl LifecycleAction {
    pub fn for_existing(exists: bool) -> Self {
        if exists {
            LifecycleAction::Update
        } else {
            LifecycleAction::Create
        }
    }
}

impl std::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleAction::Create => write!(f, "create"),
            LifecycleAction::Update => write!(f, "update"),
        }
    }
}

/// How the control plane answered a create or update request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteOutcome {
    /// Create accepted; the stack is converging
    Created,
    /// Update accepted; the stack is converging
    Updated,
    /// The stack already matches the template
    NoChanges,
}

impl RouteOutcome {
    pub fn action(&self) -> LifecycleAction {
        match self {
            RouteOutcome::Created => LifecycleAction::Create,
            RouteOutcome::Updated | RouteOutcome::NoChanges => LifecycleAction::Update,
        }
    }
}

impl std::fmt::Display for RouteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteOutcome::Created => write!(f, "create requested"),
            RouteOutcome::Updated => write!(f, "update requested"),
            RouteOutcome::NoChanges => write!(f, "no changes"),
        }
    }
}
