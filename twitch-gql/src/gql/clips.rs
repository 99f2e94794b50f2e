//! Twitch clip types.

use crate::gql::games::GameRef;
use crate::gql::types::null_as_default;
use crate::gql::users::User;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A short excerpt cut from a broadcast or video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: String,
    /// The human-readable identifier used in clip URLs.
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The channel the clip was taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcaster: Option<User>,
    /// The account that made the clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curator: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<GameRef>,
}
