//! Stack event streaming
//!
//! The control plane has no resume cursor for events, so every poll fetches
//! the whole history again. [`SeenEvents`] makes sure each event reaches the
//! progress sink once, and events older than the deployment are never shown.

use crate::error::ApiResult;
use crate::provider::ListStackEvents;
use crate::state::StackEvent;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tokio::sync::mpsc::UnboundedSender;

/// Width of the logical resource id column
const LOGICAL_ID_WIDTH: usize = 32;

/// Sending half of the progress stream. Lines are dropped once the receiver is gone.
pub type ProgressSink = UnboundedSender<ProgressLine>;

/// One line of deployment progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressLine {
    Event(StackEvent),
    Warning(String),
}

impl std::fmt::Display for ProgressLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressLine::Event(event) => write!(
                f,
                "{} {:<width$} {} {}",
                event.id,
                event.logical_resource_id,
                event.resource_status,
                event.status_reason.as_deref().unwrap_or(""),
                width = LOGICAL_ID_WIDTH
            ),
            ProgressLine::Warning(message) => write!(f, "warning: {}", message),
        }
    }
}

pub(crate) fn emit(sink: Option<&ProgressSink>, line: ProgressLine) {
    if let Some(sink) = sink {
        // A closed receiver means nobody is listening any more.
        let _ = sink.send(line);
    }
}

/// Event ids already emitted during one deployment's polling loop
#[derive(Debug, Default)]
pub struct SeenEvents {
    ids: HashSet<String>,
}

impl SeenEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Pick the unseen events at or after `started_at` from a newest-first
    /// feed, mark them seen and return them oldest first.
    pub fn take_new(
        &mut self,
        events: Vec<StackEvent>,
        started_at: DateTime<Utc>,
    ) -> Vec<StackEvent> {
        let mut fresh = Vec::new();
        for event in events {
            if self.ids.contains(&event.id) || event.timestamp < started_at {
                continue;
            }
            self.ids.insert(event.id.clone());
            fresh.push(event);
        }

        fresh.reverse();
        fresh.sort_by_key(|event| event.timestamp);
        fresh
    }
}

/// Fetch the stack's events and send the new ones to `sink`.
///
/// Returns how many events were emitted.
pub async fn stream_new_events(
    events: &dyn ListStackEvents,
    stack_name: &str,
    started_at: DateTime<Utc>,
    seen: &mut SeenEvents,
    sink: Option<&ProgressSink>,
) -> ApiResult<usize> {
    let history = events.list_stack_events(stack_name).await?;
    let fresh = seen.take_new(history, started_at);
    let count = fresh.len();

    for event in fresh {
        tracing::debug!(
            "{} {} {}",
            event.logical_resource_id,
            event.resource_status,
            event.status_reason.as_deref().unwrap_or("")
        );
        emit(sink, ProgressLine::Event(event));
    }

    Ok(count)
}
