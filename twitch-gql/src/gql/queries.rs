//! GraphQL documents sent by the client and the envelopes their `data` decodes into.
//!
//! Identifier lists are declared as `[ID!]` when they hold IDs and `[String!]` when they hold
//! logins or names. Cursors use the schema's `Cursor` scalar.

use crate::gql::channels::Channel;
use crate::gql::clips::Clip;
use crate::gql::follows::FollowersQuery;
use crate::gql::games::GamesQuery;
use crate::gql::roles::{ModsQuery, VipsQuery};
use crate::gql::streams::StreamsQuery;
use crate::gql::users::User;
use crate::gql::videos::VideosQuery;
use serde::Deserialize;

macro_rules! user_fields {
    () => {
        "id login displayName description createdAt profileImageURL(width: 300) \
         roles { isAffiliate isPartner isStaff }"
    };
}

macro_rules! user_ref_fields {
    () => {
        "id login displayName"
    };
}

macro_rules! channel_fields {
    () => {
        "id name: login displayName description \
         broadcastSettings { title language game { id name } } \
         stream { id viewersCount }"
    };
}

macro_rules! video_connection {
    () => {
        concat!(
            "edges { cursor node { id title broadcastType lengthSeconds viewCount createdAt \
             publishedAt owner { ",
            user_ref_fields!(),
            " } game { id name } } } pageInfo { hasNextPage hasPreviousPage }"
        )
    };
}

macro_rules! role_connection {
    () => {
        concat!(
            "edges { cursor grantedAt node { ",
            user_ref_fields!(),
            " } } pageInfo { hasNextPage hasPreviousPage }"
        )
    };
}

pub(crate) const USERNAME_AVAILABILITY: &str = "query IsUsernameAvailable($username: String!) { \
     isUsernameAvailable(username: $username) }";

pub(crate) const CURRENT_USER: &str =
    concat!("query CurrentUser { currentUser { ", user_fields!(), " } }");

pub(crate) const USERS_BY_ID: &str = concat!(
    "query UsersByID($ids: [ID!]) { users(ids: $ids) { ",
    user_fields!(),
    " } }"
);

pub(crate) const USERS_BY_LOGIN: &str = concat!(
    "query UsersByLogin($logins: [String!]) { users(logins: $logins) { ",
    user_fields!(),
    " } }"
);

pub(crate) const CHANNELS_BY_ID: &str = concat!(
    "query ChannelsByID($ids: [ID!]) { users(ids: $ids) { ",
    channel_fields!(),
    " } }"
);

pub(crate) const CHANNELS_BY_NAME: &str = concat!(
    "query ChannelsByName($names: [String!]) { users(logins: $names) { ",
    channel_fields!(),
    " } }"
);

pub(crate) const STREAMS: &str = concat!(
    "query Streams($first: Int, $after: Cursor, $options: StreamOptions) { \
     streams(first: $first, after: $after, options: $options) { \
     edges { cursor node { id title type viewersCount createdAt previewImageURL(width: 440, height: 248) \
     broadcaster { ",
    user_ref_fields!(),
    " } game { id name } } } pageInfo { hasNextPage hasPreviousPage } } }"
);

pub(crate) const VIDEOS: &str = concat!(
    "query Videos($first: Int, $after: Cursor) { videos(first: $first, after: $after) { ",
    video_connection!(),
    " } }"
);

pub(crate) const USER_VIDEOS: &str = concat!(
    "query UserVideos($id: ID!, $first: Int, $after: Cursor) { user(id: $id) { \
     videos(first: $first, after: $after) { ",
    video_connection!(),
    " } } }"
);

pub(crate) const CLIP: &str = concat!(
    "query Clip($slug: ID!) { clip(slug: $slug) { id slug title viewCount durationSeconds \
     createdAt url broadcaster { ",
    user_ref_fields!(),
    " } curator { ",
    user_ref_fields!(),
    " } game { id name } } }"
);

pub(crate) const GAMES: &str = "query Games($first: Int, $after: Cursor, $options: GameOptions) { \
     games(first: $first, after: $after, options: $options) { \
     edges { cursor node { id name displayName viewersCount broadcastersCount } } \
     pageInfo { hasNextPage hasPreviousPage } } }";

pub(crate) const FOLLOWERS: &str = concat!(
    "query Followers($id: ID!, $first: Int, $after: Cursor) { user(id: $id) { \
     followers(first: $first, after: $after) { totalCount \
     edges { cursor followedAt node { ",
    user_ref_fields!(),
    " } } pageInfo { hasNextPage hasPreviousPage } } } }"
);

pub(crate) const MODS: &str = concat!(
    "query Mods($id: ID!, $first: Int, $after: Cursor) { user(id: $id) { \
     mods(first: $first, after: $after) { ",
    role_connection!(),
    " } } }"
);

pub(crate) const VIPS: &str = concat!(
    "query VIPs($id: ID!, $first: Int, $after: Cursor) { user(id: $id) { \
     vips(first: $first, after: $after) { ",
    role_connection!(),
    " } } }"
);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UsernameAvailabilityData {
    #[serde(default)]
    pub is_username_available: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CurrentUserData {
    pub current_user: Option<User>,
}

/// `users(...)` answers `null` for identifiers it does not know.
#[derive(Debug, Deserialize)]
pub(crate) struct UsersData {
    #[serde(default)]
    pub users: Option<Vec<Option<User>>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelsData {
    #[serde(default)]
    pub users: Option<Vec<Option<Channel>>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamsData {
    pub streams: Option<StreamsQuery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideosData {
    pub videos: Option<VideosQuery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GamesData {
    pub games: Option<GamesQuery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClipData {
    pub clip: Option<Clip>,
}

/// `user(id: ...)` wrapping a single nested connection.
#[derive(Debug, Deserialize)]
pub(crate) struct SubjectData<T> {
    pub user: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserVideos {
    pub videos: Option<VideosQuery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserFollowers {
    pub followers: Option<FollowersQuery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserMods {
    pub mods: Option<ModsQuery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserVips {
    pub vips: Option<VipsQuery>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_lists_and_name_lists_are_typed_apart() {
        assert!(USERS_BY_ID.contains("$ids: [ID!]"));
        assert!(CHANNELS_BY_ID.contains("$ids: [ID!]"));
        assert!(USERS_BY_LOGIN.contains("$logins: [String!]"));
        assert!(CHANNELS_BY_NAME.contains("$names: [String!]"));
    }

    #[test]
    fn subject_queries_take_a_required_id() {
        for document in [USER_VIDEOS, FOLLOWERS, MODS, VIPS] {
            assert!(document.contains("$id: ID!"), "{document}");
            assert!(document.contains("user(id: $id)"), "{document}");
        }
    }

    #[test]
    fn fragments_are_spliced_in() {
        assert!(CURRENT_USER.contains("roles { isAffiliate isPartner isStaff }"));
        assert!(MODS.contains("grantedAt node { id login displayName }"));
        assert!(!VIDEOS.contains("!()"));
    }
}
