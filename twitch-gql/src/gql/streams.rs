//! Twitch live stream types.

use crate::gql::games::GameRef;
use crate::gql::types::{Connection, Cursor, Node, null_as_default};
use crate::gql::users::User;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A live broadcast currently running on a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStream {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `live` for regular broadcasts; other values mark reruns and premieres.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub stream_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub viewers_count: u64,
    /// When the broadcast went live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(
        default,
        rename = "previewImageURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcaster: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<GameRef>,
}

/// Ordering of a stream listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamSort {
    /// Most viewers first.
    ViewerCount,
    /// Fewest viewers first.
    ViewerCountAsc,
    /// Most recently started first.
    Recent,
    Relevance,
}

impl fmt::Display for StreamSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ViewerCount => write!(f, "VIEWER_COUNT"),
            Self::ViewerCountAsc => write!(f, "VIEWER_COUNT_ASC"),
            Self::Recent => write!(f, "RECENT"),
            Self::Relevance => write!(f, "RELEVANCE"),
        }
    }
}

/// Filters for [`crate::TwitchGql::get_streams`], sent as the `StreamOptions` input object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamOptions {
    /// Broadcast languages to include, e.g. `EN`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub broadcaster_languages: Vec<String>,
    /// Only streams carrying all of these tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub free_form_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<StreamSort>,
}

/// Paging and filters for a stream listing.
#[derive(Debug, Clone, Default)]
pub struct StreamQueryOpts {
    /// Page size; anything outside `[1, 100]` becomes 25.
    pub first: i32,
    pub after: Option<Cursor>,
    pub options: StreamOptions,
}

/// A page of live streams.
pub type StreamsQuery = Connection<Node<LiveStream>>;
