//! StackFlow Cloud
//!
//! This crate provisions and reconciles a single declarative stack
//! (file system, security group, instance profile and pass-role policy)
//! through a remote infrastructure-as-code control plane.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 StackFlow CLI                    │
//! │                 (stack deploy)                   │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                stackflow-cloud                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │             StackDeployer                │   │
//! │  │  route -> wait (events) -> collect       │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │  Parameters  │  │ Capabilities │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │      aws      │
//! │   provider    │
//! └───────────────┘
//! ```
//!
//! The backend is injected as six narrow capability traits (see
//! [`provider`]), so tests can fake only the calls they exercise.

pub mod action;
pub mod deployer;
pub mod error;
pub mod events;
pub mod network;
pub mod output;
pub mod params;
pub mod provider;
pub mod state;

// Re-exports
pub use action::{LifecycleAction, RouteOutcome};
pub use deployer::{DEFAULT_STACK_NAME, DeployConfig, DeploymentRequest, StackDeployer};
pub use error::{ApiError, ApiResult, CloudError, Result, is_no_updates, is_stack_not_found};
pub use events::{ProgressLine, ProgressSink, SeenEvents, stream_new_events};
pub use network::discover_network;
pub use output::DeployResult;
pub use params::{NetworkContext, ParameterSet, SUBNET_SLOTS};
pub use provider::{
    CreateStack, DescribeDefaultNetwork, DescribeStack, DescribeSubnets, ListStackEvents,
    StackBackend, StackCapability, StackRequest, UpdateStack,
};
pub use state::{StackEvent, StackOutput, StackState, StackStatus};
pub use tokio_util::sync::CancellationToken;
