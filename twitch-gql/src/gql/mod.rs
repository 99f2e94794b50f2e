//! Twitch GraphQL API client library.
//!
//! This module provides a typed client for the GraphQL endpoint behind twitch.tv. It turns
//! domain-level parameters (user IDs, logins, paging options) into GraphQL documents and
//! variables, executes them through a pluggable transport, and decodes the responses into
//! plain data types.
//!
//! # Core Concepts: Users vs Channels
//!
//! ## [`users::User`] - Accounts
//! - **What it is**: An account, identified by an opaque ID and a login
//! - **Use for**: Lookups, and as the subject of relationship queries (followers, mods, VIPs,
//!   videos)
//!
//! ## [`channels::Channel`] - Broadcasting Side
//! - **What it is**: The channel an account broadcasts on, with its title, category and live
//!   stream
//! - **Relationship**: A channel has the same ID as the user that owns it, so every
//!   channel-scoped query is answered by the matching user-scoped query
//!
//! # Validation
//!
//! Arguments are checked before anything is sent:
//! - Bulk lookups accept at most 100 identifiers ([`QueryError::TooManyArguments`])
//! - Follower, moderator and VIP listings need a non-empty subject ID
//!   ([`QueryError::InvalidArgument`])
//! - [`TwitchGql::get_current_user`] needs a bearer token ([`QueryError::TokenNotSet`])
//! - Page sizes outside `[1, 100]` are quietly replaced with 25
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use twitch_gql::{FollowQueryOpts, TwitchGql};
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = TwitchGql::new()?;
//!
//! let users = client.get_users_by_login(&["twitch"]).await?;
//! for user in &users {
//!     let followers = client
//!         .get_followers_for_user(user, &FollowQueryOpts { first: 10, ..Default::default() })
//!         .await?;
//!     if let Some(followers) = followers {
//!         println!("{} has {:?} followers", user.login, followers.total_count);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod clips;
pub mod config;
pub mod error;
pub mod follows;
pub mod games;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod queries;
pub mod roles;
pub mod streams;
pub mod transport;
pub mod types;
pub mod users;
pub mod videos;

// Re-export main types for convenience
pub use client::TwitchGql;
pub use config::ClientConfig;
pub use error::{MAX_BULK_IDENTIFIERS, QueryError};
pub use transport::{
    Credentials, GraphQLRequest, GraphQLTransport, HttpTransport, OFFICIAL_CLIENT_ID,
    OperationKind, URL,
};
pub use types::{
    Connection, Cursor, DEFAULT_PAGE_SIZE, Edge, MAX_PAGE_SIZE, Node, PageInfo, PagedStream,
    Variables, effective_first,
};

// Re-export commonly used types from each module
pub use channels::{BroadcastSettings, Channel, LiveStreamRef};
pub use clips::Clip;
pub use follows::{FollowQueryOpts, FollowerEdge, FollowersQuery};
pub use games::{Game, GameOptions, GameQueryOpts, GameRef, GamesQuery};
pub use roles::{ModsQuery, ModsQueryOpts, RoleEdge, VipsQuery, VipsQueryOpts};
pub use streams::{LiveStream, StreamOptions, StreamQueryOpts, StreamSort, StreamsQuery};
pub use users::{User, UserRoles};
pub use videos::{Video, VideoQueryOpts, VideosQuery};
