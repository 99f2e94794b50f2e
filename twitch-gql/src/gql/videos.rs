//! Twitch video (VOD) types.

use crate::gql::games::GameRef;
use crate::gql::types::{Connection, Cursor, Node, null_as_default};
use crate::gql::users::User;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A recorded broadcast, highlight or upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `ARCHIVE`, `HIGHLIGHT` or `UPLOAD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub length_seconds: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub view_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<GameRef>,
}

/// Paging for a video listing.
#[derive(Debug, Clone, Default)]
pub struct VideoQueryOpts {
    /// Page size; anything outside `[1, 100]` becomes 25.
    pub first: i32,
    pub after: Option<Cursor>,
}

/// A page of videos.
pub type VideosQuery = Connection<Node<Video>>;
