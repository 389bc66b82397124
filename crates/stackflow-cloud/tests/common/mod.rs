use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stackflow_cloud::{
    ApiError, ApiResult, CreateStack, DescribeDefaultNetwork, DescribeStack, DescribeSubnets,
    ListStackEvents, StackBackend, StackCapability, StackEvent, StackRequest, StackState,
    StackStatus, UpdateStack,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted backend. Each describe/events call takes the next scripted
/// response; the last one repeats once the script runs out.
pub struct MockBackend {
    network: Option<String>,
    subnets: Vec<String>,
    describe: Mutex<VecDeque<ApiResult<Vec<StackState>>>>,
    events: Mutex<VecDeque<ApiResult<Vec<StackEvent>>>>,
    update_error: Mutex<Option<ApiError>>,
    describe_delay: Mutex<Option<(usize, Duration)>>,
    calls: Mutex<Vec<String>>,
    parameters: Mutex<Vec<(String, String)>>,
}

impl MockBackend {
    pub fn new(network: Option<&str>, subnets: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            network: network.map(str::to_string),
            subnets: subnets.iter().map(|s| s.to_string()).collect(),
            describe: Mutex::new(VecDeque::new()),
            events: Mutex::new(VecDeque::new()),
            update_error: Mutex::new(None),
            describe_delay: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            parameters: Mutex::new(Vec::new()),
        })
    }

    pub fn backend(self: &Arc<Self>) -> StackBackend {
        StackBackend::from_provider(self.clone())
    }

    pub fn script_describe(&self, responses: Vec<ApiResult<Vec<StackState>>>) {
        *self.describe.lock().unwrap() = responses.into();
    }

    pub fn script_events(&self, responses: Vec<ApiResult<Vec<StackEvent>>>) {
        *self.events.lock().unwrap() = responses.into();
    }

    pub fn fail_update(&self, error: ApiError) {
        *self.update_error.lock().unwrap() = Some(error);
    }

    /// Make the `nth` describe call (1-based) and every later one hang for `delay`.
    pub fn delay_describe_from(&self, nth: usize, delay: Duration) {
        *self.describe_delay.lock().unwrap() = Some((nth, delay));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|c| *c == operation).count()
    }

    pub fn last_parameters(&self) -> Vec<(String, String)> {
        self.parameters.lock().unwrap().clone()
    }

    fn record(&self, operation: &str) {
        self.calls.lock().unwrap().push(operation.to_string());
    }

    fn record_request(&self, request: &StackRequest<'_>) {
        assert_eq!(request.capabilities(), &[StackCapability::NamedIam]);
        *self.parameters.lock().unwrap() = request
            .parameters
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
    }
}

fn next<T: Clone>(script: &Mutex<VecDeque<ApiResult<T>>>, fallback: T) -> ApiResult<T> {
    let mut script = script.lock().unwrap();
    if script.len() > 1 {
        return script.pop_front().unwrap();
    }
    script.front().cloned().unwrap_or(Ok(fallback))
}

#[async_trait]
impl CreateStack for MockBackend {
    async fn create_stack(&self, request: StackRequest<'_>) -> ApiResult<()> {
        self.record("CreateStack");
        self.record_request(&request);
        Ok(())
    }
}

#[async_trait]
impl UpdateStack for MockBackend {
    async fn update_stack(&self, request: StackRequest<'_>) -> ApiResult<()> {
        self.record("UpdateStack");
        self.record_request(&request);
        match self.update_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DescribeStack for MockBackend {
    async fn describe_stack(&self, _name: &str) -> ApiResult<Vec<StackState>> {
        self.record("DescribeStacks");
        let delay = *self.describe_delay.lock().unwrap();
        if let Some((nth, delay)) = delay {
            if self.count("DescribeStacks") >= nth {
                tokio::time::sleep(delay).await;
            }
        }
        next(&self.describe, Vec::new())
    }
}

#[async_trait]
impl ListStackEvents for MockBackend {
    async fn list_stack_events(&self, _name: &str) -> ApiResult<Vec<StackEvent>> {
        self.record("DescribeStackEvents");
        next(&self.events, Vec::new())
    }
}

#[async_trait]
impl DescribeDefaultNetwork for MockBackend {
    async fn describe_default_network(&self) -> ApiResult<Option<String>> {
        self.record("DescribeVpcs");
        Ok(self.network.clone())
    }
}

#[async_trait]
impl DescribeSubnets for MockBackend {
    async fn describe_subnets(&self, _network_id: &str) -> ApiResult<Vec<String>> {
        self.record("DescribeSubnets");
        Ok(self.subnets.clone())
    }
}

pub fn not_found() -> ApiResult<Vec<StackState>> {
    Err(ApiError::with_code(
        "ValidationError",
        "Stack with id devbox does not exist",
    ))
}

pub fn stack(status: StackStatus) -> StackState {
    StackState::new("devbox", status)
}

pub fn event(id: &str, timestamp: DateTime<Utc>) -> StackEvent {
    StackEvent {
        id: id.to_string(),
        logical_resource_id: "FileSystem".to_string(),
        resource_status: "CREATE_IN_PROGRESS".to_string(),
        status_reason: None,
        timestamp,
    }
}
