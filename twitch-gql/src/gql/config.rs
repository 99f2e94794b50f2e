//! Client configuration.

use crate::gql::transport::{OFFICIAL_CLIENT_ID, URL};
use std::fmt;

/// Overrides the GraphQL endpoint.
pub const ENDPOINT_VAR: &str = "TWITCH_GQL_ENDPOINT";
/// Overrides the client identity sent as `Client-ID`.
pub const CLIENT_ID_VAR: &str = "TWITCH_GQL_CLIENT_ID";
/// Supplies a bearer token.
pub const TOKEN_VAR: &str = "TWITCH_GQL_TOKEN";

/// Settings a [`crate::TwitchGql`] is built from.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub client_id: String,
    /// Initial bearer token; can be replaced later with [`crate::TwitchGql::set_bearer`].
    pub bearer: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: URL.to_string(),
            client_id: OFFICIAL_CLIENT_ID.to_string(),
            bearer: None,
        }
    }
}

impl ClientConfig {
    /// Reads overrides from the environment, falling back to the defaults.
    ///
    /// Empty variables count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            endpoint: get(ENDPOINT_VAR).unwrap_or(defaults.endpoint),
            client_id: get(CLIENT_ID_VAR).unwrap_or(defaults.client_id),
            bearer: get(TOKEN_VAR),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("client_id", &self.client_id)
            .field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
