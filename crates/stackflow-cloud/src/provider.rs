//! Backend capability traits
//!
//! Each remote operation the deployer needs is its own trait so that tests
//! can fake exactly the calls they care about. A concrete backend (see
//! `stackflow-cloud-aws`) usually implements all of them on one type and
//! hands out [`StackBackend`] via [`StackBackend::from_provider`].

use crate::error::ApiResult;
use crate::params::ParameterSet;
use crate::state::{StackEvent, StackState};
use async_trait::async_trait;
use std::sync::Arc;

/// Capability acknowledgment sent with every create and update request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackCapability {
    /// The template creates IAM resources with custom names
    NamedIam,
}

impl std::fmt::Display for StackCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackCapability::NamedIam => write!(f, "CAPABILITY_NAMED_IAM"),
        }
    }
}

/// Create or update request for a stack
#[derive(Debug, Clone, Copy)]
pub struct StackRequest<'a> {
    pub name: &'a str,
    pub template: &'a str,
    pub parameters: &'a ParameterSet,
}

impl StackRequest<'_> {
    /// The stack provisions IAM resources, so this is not negotiable.
    pub fn capabilities(&self) -> &'static [StackCapability] {
        &[StackCapability::NamedIam]
    }
}

#[async_trait]
pub trait CreateStack: Send + Sync {
    async fn create_stack(&self, request: StackRequest<'_>) -> ApiResult<()>;
}

#[async_trait]
pub trait UpdateStack: Send + Sync {
    async fn update_stack(&self, request: StackRequest<'_>) -> ApiResult<()>;
}

#[async_trait]
pub trait DescribeStack: Send + Sync {
    /// Returns every stack matching `name`; an unknown stack may be reported
    /// either as an empty list or as an error.
    async fn describe_stack(&self, name: &str) -> ApiResult<Vec<StackState>>;
}

#[async_trait]
pub trait ListStackEvents: Send + Sync {
    /// Full event history, newest first.
    async fn list_stack_events(&self, name: &str) -> ApiResult<Vec<StackEvent>>;
}

#[async_trait]
pub trait DescribeDefaultNetwork: Send + Sync {
    /// Id of the default network, or `None` when the account has none.
    async fn describe_default_network(&self) -> ApiResult<Option<String>>;
}

#[async_trait]
pub trait DescribeSubnets: Send + Sync {
    async fn describe_subnets(&self, network_id: &str) -> ApiResult<Vec<String>>;
}

/// Every capability the deployer uses, injected at construction time
#[derive(Clone)]
pub struct StackBackend {
    pub create: Arc<dyn CreateStack>,
    pub update: Arc<dyn UpdateStack>,
    pub describe: Arc<dyn DescribeStack>,
    pub events: Arc<dyn ListStackEvents>,
    pub network: Arc<dyn DescribeDefaultNetwork>,
    pub subnets: Arc<dyn DescribeSubnets>,
}

impl StackBackend {
    /// Use one provider for all six capabilities.
    pub fn from_provider<P>(provider: Arc<P>) -> Self
    where
        P: CreateStack
            + UpdateStack
            + DescribeStack
            + ListStackEvents
            + DescribeDefaultNetwork
            + DescribeSubnets
            + 'static,
    {
        Self {
            create: provider.clone(),
            update: provider.clone(),
            describe: provider.clone(),
            events: provider.clone(),
            network: provider.clone(),
            subnets: provider,
        }
    }
}

impl std::fmt::Debug for StackBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackBackend").finish_non_exhaustive()
    }
}
