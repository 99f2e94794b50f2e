//! Twitch channel types.

use crate::gql::games::GameRef;
use crate::gql::types::null_as_default;
use crate::gql::users::User;
use serde::{Deserialize, Serialize};

/// The broadcasting side of a Twitch account.
///
/// A channel shares its ID with the [`User`] that owns it, which is what lets every
/// channel-scoped query be answered by the matching user-scoped one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// The ID of the channel, identical to its owner's user ID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// The channel name, i.e. the owner's login.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// What the channel is set to broadcast next (or is broadcasting now).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast_settings: Option<BroadcastSettings>,
    /// The live stream, present only while the channel is live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<LiveStreamRef>,
}

impl Channel {
    /// Whether the channel was live when it was fetched.
    pub fn is_live(&self) -> bool {
        self.stream.is_some()
    }
}

/// Title, language and category configured for a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<GameRef>,
}

/// Minimal view of the stream a channel is currently running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStreamRef {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub viewers_count: u64,
}

/// Derives the subject for a user-scoped relationship query from a channel.
///
/// Only the ID carries over; it is the one field relationship queries read.
pub(crate) fn user_for_channel(channel: &Channel) -> User {
    User {
        id: channel.id.clone(),
        ..Default::default()
    }
}
