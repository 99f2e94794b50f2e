//! Channel role (moderator and VIP) types.

use crate::gql::types::{Connection, Cursor, Edge};
use crate::gql::users::User;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// An account holding a role in the subject's channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleEdge {
    #[serde(default)]
    pub cursor: Option<Cursor>,
    /// When the role was granted.
    #[serde(default)]
    pub granted_at: Option<Timestamp>,
    pub node: User,
}

impl Edge for RoleEdge {
    fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }
}

/// Paging for a moderator listing.
#[derive(Debug, Clone, Default)]
pub struct ModsQueryOpts {
    /// Page size; anything outside `[1, 100]` becomes 25.
    pub first: i32,
    pub after: Option<Cursor>,
}

/// Paging for a VIP listing.
#[derive(Debug, Clone, Default)]
pub struct VipsQueryOpts {
    /// Page size; anything outside `[1, 100]` becomes 25.
    pub first: i32,
    pub after: Option<Cursor>,
}

/// A page of moderators.
pub type ModsQuery = Connection<RoleEdge>;

/// A page of VIPs.
pub type VipsQuery = Connection<RoleEdge>;
