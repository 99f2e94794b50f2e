//! The boundary between the query client and the network.
//!
//! The client never talks HTTP itself. It hands a [`GraphQLRequest`] together with a snapshot
//! of the caller's [`Credentials`] to a [`GraphQLTransport`], and gets back the decoded `data`
//! member of the response. [`HttpTransport`] is the production implementation; tests substitute
//! a recording fake (see [`crate::gql::mock`]).

use crate::gql::types::Variables;
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use tracing::instrument;

/// The address of the Twitch GraphQL server.
pub const URL: &str = "https://gql.twitch.tv/gql";

/// The client ID of Twitch's own web client, used when no other identity is configured.
///
/// Requests sent under this identity look like they come from the official website, so it
/// should be used sparingly.
pub const OFFICIAL_CLIENT_ID: &str = "kimne78kx3ncx6brgo4mv6wki5h1ko";

/// Whether a document reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
        }
    }
}

/// A GraphQL document plus the variables it is executed with.
///
/// Serializes to the standard `{"operationName", "query", "variables"}` request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    #[serde(skip)]
    pub kind: OperationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<Cow<'static, str>>,
    pub query: Cow<'static, str>,
    pub variables: Variables,
}

impl GraphQLRequest {
    pub fn query(document: impl Into<Cow<'static, str>>, variables: Variables) -> Self {
        Self {
            kind: OperationKind::Query,
            operation_name: None,
            query: document.into(),
            variables,
        }
    }

    pub fn mutation(document: impl Into<Cow<'static, str>>, variables: Variables) -> Self {
        Self {
            kind: OperationKind::Mutation,
            ..Self::query(document, variables)
        }
    }

    /// Names the operation to run when the document holds more than one.
    pub fn with_operation_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

/// The identity a single request is sent under.
///
/// The client takes one snapshot per call, so a request never mixes the identity of one
/// token with another even if the token is replaced while it is in flight.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    /// The bearer token, if one is set. Never empty.
    pub bearer: Option<String>,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, bearer: Option<String>) -> Self {
        Self {
            client_id: client_id.into(),
            bearer: bearer.filter(|t| !t.is_empty()),
        }
    }

    /// The value of the `Authorization` header, if the request is authenticated.
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("OAuth {token}"))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Executes GraphQL requests.
///
/// Implementations return the `data` member of the response ([`serde_json::Value::Null`] when
/// it is absent) or an error. The client passes that error on to its caller untouched.
pub trait GraphQLTransport: Send + Sync {
    fn execute(
        &self,
        request: GraphQLRequest,
        credentials: &Credentials,
    ) -> impl Future<Output = eyre::Result<serde_json::Value>> + Send;
}

/// An error entry of a GraphQL response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQLError>>,
}

/// Sends requests to a GraphQL server over HTTP.
///
/// Every request carries a `Client-ID` header, and an `Authorization: OAuth <token>` header
/// when the credentials hold a bearer token.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport for `endpoint` with its own HTTP client.
    pub fn new(endpoint: impl Into<String>) -> eyre::Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            // only ever talk to the configured endpoint
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("build HTTP client")?;
        Ok(Self::with_client(endpoint, client))
    }

    /// Creates a transport that shares an existing HTTP client.
    ///
    /// Timeouts and proxies are whatever that client is configured with.
    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GraphQLTransport for HttpTransport {
    #[instrument(
        skip(self, request, credentials),
        fields(kind = %request.kind, operation = ?request.operation_name),
        level = tracing::Level::TRACE
    )]
    async fn execute(
        &self,
        request: GraphQLRequest,
        credentials: &Credentials,
    ) -> eyre::Result<serde_json::Value> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("Client-ID", &credentials.client_id);
        if let Some(authorization) = credentials.authorization() {
            builder = builder.header("Authorization", authorization);
        }

        tracing::trace!(
            authenticated = credentials.bearer.is_some(),
            variables = request.variables.len(),
            "sending GraphQL request"
        );

        let response = builder
            .json(&request)
            .send()
            .await
            .with_context(|| format!("send GraphQL {} to {}", request.kind, self.endpoint))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "GraphQL {} failed with status {}: {}",
                request.kind,
                status_code,
                error_text
            ));
        }

        let body: GraphQLResponse = response
            .json()
            .await
            .context("parse GraphQL response as JSON")?;

        if let Some(errors) = body.errors.filter(|e| !e.is_empty()) {
            tracing::warn!(count = errors.len(), "GraphQL server returned errors");
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            eyre::bail!("GraphQL {} returned errors: {}", request.kind, messages.join("; "));
        }

        Ok(body.data.unwrap_or(serde_json::Value::Null))
    }
}
