//! A fake transport for testing code built on the query client.
//!
//! [`RecordingTransport`] never touches the network. It records every request it is handed,
//! along with the credentials it was sent under, and answers with canned responses queued up
//! ahead of time. When the queue is empty it answers with `null` data.

use crate::gql::transport::{Credentials, GraphQLRequest, GraphQLTransport};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One request observed by a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub request: GraphQLRequest,
    pub credentials: Credentials,
}

#[derive(Debug, Default)]
struct Recording {
    calls: Vec<RecordedCall>,
    responses: VecDeque<eyre::Result<serde_json::Value>>,
}

/// Records requests and replays canned responses in order.
///
/// Clones share the same recording, so a test can keep one handle while the client owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue `data` as the answer to the next unanswered request.
    pub fn respond_with(&self, data: serde_json::Value) -> &Self {
        self.lock().responses.push_back(Ok(data));
        self
    }

    /// Queue a failure as the answer to the next unanswered request.
    pub fn fail_with(&self, error: eyre::Report) -> &Self {
        self.lock().responses.push_back(Err(error));
        self
    }

    /// Every request seen so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// The most recent request, if any.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.lock().calls.last().cloned()
    }
}

impl GraphQLTransport for RecordingTransport {
    async fn execute(
        &self,
        request: GraphQLRequest,
        credentials: &Credentials,
    ) -> eyre::Result<serde_json::Value> {
        let mut recording = self.lock();
        tracing::trace!(kind = %request.kind, "recording GraphQL request");
        recording.calls.push(RecordedCall {
            request,
            credentials: credentials.clone(),
        });
        recording
            .responses
            .pop_front()
            .unwrap_or(Ok(serde_json::Value::Null))
    }
}
