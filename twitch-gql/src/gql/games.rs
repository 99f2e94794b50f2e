//! Twitch game (category) types.

use crate::gql::types::{Connection, Cursor, Node, null_as_default};
use serde::{Deserialize, Serialize};

/// A category streams and videos are filed under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Viewers across every live stream in the category.
    #[serde(default, deserialize_with = "null_as_default")]
    pub viewers_count: u64,
    /// Number of channels currently live in the category.
    #[serde(default, deserialize_with = "null_as_default")]
    pub broadcasters_count: u64,
}

/// The short form of a game embedded in streams, videos and clips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRef {
    pub id: String,
    pub name: String,
}

/// Filters for [`crate::TwitchGql::get_games`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOptions {
    /// Only categories carrying all of these tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Paging and filters for a game listing.
#[derive(Debug, Clone, Default)]
pub struct GameQueryOpts {
    /// Page size; anything outside `[1, 100]` becomes 25.
    pub first: i32,
    pub after: Option<Cursor>,
    pub options: GameOptions,
}

/// A page of games.
pub type GamesQuery = Connection<Node<Game>>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_options_serialize_to_empty_object() {
        assert_eq!(
            serde_json::to_value(GameOptions::default()).unwrap(),
            serde_json::json!({})
        );
        assert_eq!(
            serde_json::to_value(GameOptions {
                tags: vec!["FPS".into()]
            })
            .unwrap(),
            serde_json::json!({ "tags": ["FPS"] })
        );
    }
}
