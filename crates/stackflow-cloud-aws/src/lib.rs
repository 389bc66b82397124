//! AWS backend for StackFlow
//!
//! This crate implements the stackflow-cloud capability traits on top of
//! CloudFormation (stack lifecycle and events) and EC2 (default VPC and
//! subnet discovery).
//!
//! # Requirements
//!
//! - AWS credentials resolvable by the default provider chain
//!   (environment, `~/.aws/credentials`, SSO, instance metadata, ...)
//! - A region, either configured or passed explicitly
//!
//! # Example
//!
//! ```ignore
//! use stackflow_cloud::{CancellationToken, DeployConfig, DeploymentRequest, StackBackend, StackDeployer};
//! use stackflow_cloud_aws::{AwsStackProvider, STACK_TEMPLATE};
//! use std::sync::Arc;
//!
//! let provider = Arc::new(AwsStackProvider::from_env(None).await?);
//! let deployer = StackDeployer::new(
//!     StackBackend::from_provider(provider),
//!     STACK_TEMPLATE,
//!     DeployConfig::default(),
//! );
//!
//! let result = deployer
//!     .deploy(&DeploymentRequest::default(), &CancellationToken::new())
//!     .await?;
//! println!("file system: {}", result.file_system_id);
//! ```

mod convert;
pub mod error;
pub mod provider;
pub mod template;

pub use error::{AwsError, Result};
pub use provider::AwsStackProvider;
pub use template::STACK_TEMPLATE;
