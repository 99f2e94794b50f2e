//! Follower relationship types.

use crate::gql::types::{Connection, Cursor, Edge};
use crate::gql::users::User;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// One account following the subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerEdge {
    #[serde(default)]
    pub cursor: Option<Cursor>,
    /// When the follow happened.
    #[serde(default)]
    pub followed_at: Option<Timestamp>,
    pub node: User,
}

impl Edge for FollowerEdge {
    fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }
}

/// Paging for a follower listing.
#[derive(Debug, Clone, Default)]
pub struct FollowQueryOpts {
    /// Page size; anything outside `[1, 100]` becomes 25.
    pub first: i32,
    pub after: Option<Cursor>,
}

/// A page of followers; `total_count` holds the subject's follower count.
pub type FollowersQuery = Connection<FollowerEdge>;
