//! Stack deployment orchestrator
//!
//! Drives one deployment from network discovery to typed outputs:
//!
//! ```text
//! discover network -> build parameters -> exists? -> create | update
//!                  -> poll until terminal (streaming events) -> collect outputs
//! ```
//!
//! An update with nothing to change skips polling and goes straight to the outputs.
//!
//! Every blocking point observes the caller's [`CancellationToken`]. The
//! deployer imposes no overall timeout; cancel the token to bound a deployment.

use crate::action::{LifecycleAction, RouteOutcome};
use crate::error::{is_no_updates, is_stack_not_found, CloudError, Result};
use crate::events::{emit, stream_new_events, ProgressLine, ProgressSink, SeenEvents};
use crate::network::discover_network;
use crate::output::DeployResult;
use crate::params::ParameterSet;
use crate::provider::{StackBackend, StackRequest};
use crate::state::{StackState, StackStatus};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Stack name used when the caller does not pick one
pub const DEFAULT_STACK_NAME: &str = "stackflow";

/// Deployer settings
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Delay between status polls
    pub poll_interval: Duration,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
        }
    }
}

/// One deployment invocation
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    pub stack_name: String,
    pub sink: Option<ProgressSink>,
}

impl DeploymentRequest {
    pub fn new(stack_name: Option<String>) -> Self {
        Self {
            stack_name: stack_name.unwrap_or_else(|| DEFAULT_STACK_NAME.to_string()),
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: ProgressSink) -> Self {
        self.sink = Some(sink);
        self
    }
}

impl Default for DeploymentRequest {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Create-or-update orchestrator for a single stack template
pub struct StackDeployer {
    backend: StackBackend,
    template: Arc<str>,
    config: DeployConfig,
}

impl StackDeployer {
    pub fn new(backend: StackBackend, template: impl Into<Arc<str>>, config: DeployConfig) -> Self {
        Self {
            backend,
            template: template.into(),
            config,
        }
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// Run a full deployment and return the stack outputs.
    pub async fn deploy(
        &self,
        request: &DeploymentRequest,
        cancel: &CancellationToken,
    ) -> Result<DeployResult> {
        let stack = request.stack_name.as_str();
        let sink = request.sink.as_ref();

        let network = cancellable(
            cancel,
            discover_network(self.backend.network.as_ref(), self.backend.subnets.as_ref()),
        )
        .await??;
        let params = ParameterSet::from_network(&network);

        let started_at = Utc::now();
        let outcome = self.route(stack, &params, cancel).await?;
        tracing::info!("Stack {}: {}", stack, outcome);

        // Nothing was changed, so the current status says nothing about this run.
        if outcome != RouteOutcome::NoChanges {
            let status = self.wait(stack, started_at, sink, cancel).await?;
            tracing::info!("Stack {} converged with status {}", stack, status);
        }

        cancel_point(cancel)?;
        cancellable(cancel, self.collect(stack)).await?
    }

    /// Whether the stack currently exists.
    ///
    /// An unknown stack and a fully deleted one both count as absent.
    pub async fn exists(&self, stack: &str) -> Result<bool> {
        match self.backend.describe.describe_stack(stack).await {
            Ok(stacks) => Ok(stacks
                .first()
                .is_some_and(|s| s.status != StackStatus::DeleteComplete)),
            Err(e) if is_stack_not_found(&e) => Ok(false),
            Err(e) => Err(CloudError::api("DescribeStacks", stack, e)),
        }
    }

    /// Which request a deployment would issue, without issuing it.
    pub async fn plan(&self, stack: &str) -> Result<LifecycleAction> {
        Ok(LifecycleAction::for_existing(self.exists(stack).await?))
    }

    /// Issue exactly one create or update request for the stack.
    ///
    /// An update the control plane rejects as having nothing to change is
    /// reported as [`RouteOutcome::NoChanges`], not as an error.
    pub async fn route(
        &self,
        stack: &str,
        params: &ParameterSet,
        cancel: &CancellationToken,
    ) -> Result<RouteOutcome> {
        cancel_point(cancel)?;
        let action = cancellable(cancel, self.plan(stack)).await??;

        let request = StackRequest {
            name: stack,
            template: &self.template,
            parameters: params,
        };

        cancel_point(cancel)?;
        match action {
            LifecycleAction::Create => {
                tracing::info!("Creating stack {}", stack);
                self.backend
                    .create
                    .create_stack(request)
                    .await
                    .map_err(|e| CloudError::api("CreateStack", stack, e))?;
                Ok(RouteOutcome::Created)
            }
            LifecycleAction::Update => {
                tracing::info!("Updating stack {}", stack);
                match self.backend.update.update_stack(request).await {
                    Ok(()) => Ok(RouteOutcome::Updated),
                    Err(e) if is_no_updates(&e) => {
                        tracing::info!("Stack {} is already up to date", stack);
                        Ok(RouteOutcome::NoChanges)
                    }
                    Err(e) => Err(CloudError::api("UpdateStack", stack, e)),
                }
            }
        }
    }

    /// Poll the stack until it reaches a terminal status.
    ///
    /// New events at or after `started_at` go to `sink` as they appear. A
    /// failed event fetch becomes a warning line and polling continues.
    pub async fn wait(
        &self,
        stack: &str,
        started_at: DateTime<Utc>,
        sink: Option<&ProgressSink>,
        cancel: &CancellationToken,
    ) -> Result<StackStatus> {
        let mut seen = SeenEvents::new();

        loop {
            cancel_point(cancel)?;
            let state = cancellable(cancel, self.describe_polled(stack)).await??;

            let streamed = cancellable(
                cancel,
                stream_new_events(
                    self.backend.events.as_ref(),
                    stack,
                    started_at,
                    &mut seen,
                    sink,
                ),
            )
            .await?;
            if let Err(e) = streamed {
                tracing::warn!("Failed to fetch events for stack {}: {}", stack, e);
                emit(
                    sink,
                    ProgressLine::Warning(format!("failed to fetch stack events: {}", e)),
                );
            }

            if state.status.is_success() {
                return Ok(state.status);
            }
            if state.status.is_failure() {
                return Err(CloudError::DeploymentFailed {
                    stack: stack.to_string(),
                    status: state.status.to_string(),
                });
            }

            tracing::debug!("Stack {} is {}, polling again", stack, state.status);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(CloudError::Cancelled),
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }

    /// Read the final outputs of the stack.
    pub async fn collect(&self, stack: &str) -> Result<DeployResult> {
        let state = self
            .describe_one(stack)
            .await?
            .ok_or_else(|| CloudError::StackNotFound {
                stack: stack.to_string(),
            })?;

        Ok(DeployResult::from_outputs(stack, &state.outputs))
    }

    async fn describe_one(&self, stack: &str) -> Result<Option<StackState>> {
        match self.backend.describe.describe_stack(stack).await {
            Ok(stacks) => Ok(stacks.into_iter().next()),
            Err(e) if is_stack_not_found(&e) => Ok(None),
            Err(e) => Err(CloudError::api("DescribeStacks", stack, e)),
        }
    }

    /// A stack that disappears after its request was accepted is fatal.
    async fn describe_polled(&self, stack: &str) -> Result<StackState> {
        self.describe_one(stack)
            .await?
            .ok_or_else(|| CloudError::StackVanished {
                stack: stack.to_string(),
            })
    }
}

fn cancel_point(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(CloudError::Cancelled);
    }
    Ok(())
}

/// Run a read-only call, abandoning it as soon as `cancel` fires.
async fn cancellable<F: Future>(cancel: &CancellationToken, fut: F) -> Result<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(CloudError::Cancelled),
        out = fut => Ok(out),
    }
}
