//! Conversions from AWS SDK types into the backend-neutral model

use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::primitives::DateTime as SdkDateTime;
use aws_sdk_cloudformation::types::{Output, Stack, StackEvent as SdkStackEvent};
use chrono::{DateTime, Utc};
use stackflow_cloud::{ApiError, StackEvent, StackOutput, StackState, StackStatus};

/// Keep the service error code so callers can classify without parsing text.
pub(crate) fn api_error<E, R>(err: SdkError<E, R>) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let service = err.as_service_error();
    let code = service.and_then(|e| e.code()).map(str::to_string);
    let message = service
        .and_then(|e| e.message())
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

    ApiError { code, message }
}

pub(crate) fn timestamp(value: &SdkDateTime) -> DateTime<Utc> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos()).unwrap_or_default()
}

pub(crate) fn stack_state(stack: &Stack) -> StackState {
    let status = stack
        .stack_status()
        .map(|s| StackStatus::from(s.as_str().to_string()))
        .unwrap_or_else(|| StackStatus::Other(String::new()));

    StackState {
        name: stack.stack_name().unwrap_or_default().to_string(),
        status,
        outputs: stack.outputs().iter().filter_map(stack_output).collect(),
    }
}

fn stack_output(output: &Output) -> Option<StackOutput> {
    Some(StackOutput {
        key: output.output_key()?.to_string(),
        value: output.output_value().unwrap_or_default().to_string(),
    })
}

pub(crate) fn stack_event(event: &SdkStackEvent) -> StackEvent {
    StackEvent {
        id: event.event_id().unwrap_or_default().to_string(),
        logical_resource_id: event.logical_resource_id().unwrap_or_default().to_string(),
        resource_status: event
            .resource_status()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        status_reason: event.resource_status_reason().map(str::to_string),
        timestamp: event.timestamp().map(timestamp).unwrap_or_default(),
    }
}
