//! The Twitch GraphQL query client.
//!
//! Every operation follows the same path: validate the arguments, build the variable mapping,
//! hand one [`GraphQLRequest`] to the transport and decode the `data` it returns. Validation
//! failures come back as [`QueryError`] without any request being made; whatever the transport
//! fails with is returned as-is.
//!
//! # Credentials
//!
//! The bearer token is shared by all clones of a client and may be replaced at any time with
//! [`TwitchGql::set_bearer`]. Each operation reads the token exactly once, when it starts, and
//! sends the request under that snapshot. A replacement therefore only affects operations that
//! start after `set_bearer` returns. Callers that need different tokens at the same time should
//! derive independent clients with [`TwitchGql::with_bearer`] instead of sharing one.

use crate::gql::channels::{Channel, user_for_channel};
use crate::gql::clips::Clip;
use crate::gql::config::ClientConfig;
use crate::gql::error::{QueryError, check_bulk_len, check_subject_id};
use crate::gql::follows::{FollowQueryOpts, FollowerEdge, FollowersQuery};
use crate::gql::games::{GameQueryOpts, GamesQuery};
use crate::gql::queries::{self, SubjectData};
use crate::gql::roles::{ModsQuery, ModsQueryOpts, RoleEdge, VipsQuery, VipsQueryOpts};
use crate::gql::streams::{StreamQueryOpts, StreamsQuery};
use crate::gql::transport::{Credentials, GraphQLRequest, GraphQLTransport, HttpTransport};
use crate::gql::types::{Cursor, Node, PagedStream, Variables, page_variables};
use crate::gql::users::User;
use crate::gql::videos::{Video, VideoQueryOpts, VideosQuery};
use eyre::Context;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_stream::Stream;
use tracing::instrument;

/// Client for the Twitch GraphQL API.
///
/// Construct one with [`TwitchGql::new`] (official web client identity, no token) or
/// [`TwitchGql::from_config`], and reuse it across calls. Cloning is cheap; clones share the
/// transport and the bearer token.
#[derive(Debug, Clone)]
pub struct TwitchGql<T = HttpTransport> {
    /// Sent as `Client-ID` with every request.
    client_id: String,
    /// The current bearer token. Empty means unauthenticated.
    bearer: Arc<RwLock<String>>,
    transport: T,
}

impl TwitchGql<HttpTransport> {
    /// Creates a client for the public endpoint using the official web client identity.
    ///
    /// This identity belongs to Twitch's own website and should be used sparingly.
    pub fn new() -> eyre::Result<Self> {
        Self::from_config(ClientConfig::default())
    }

    /// Creates a client from an explicit configuration.
    pub fn from_config(config: ClientConfig) -> eyre::Result<Self> {
        let transport = HttpTransport::new(config.endpoint).context("set up HTTP transport")?;
        Ok(Self {
            client_id: config.client_id,
            bearer: Arc::new(RwLock::new(config.bearer.unwrap_or_default())),
            transport,
        })
    }
}

impl<T> TwitchGql<T>
where
    T: GraphQLTransport,
{
    /// Creates a client that sends its requests through `transport`.
    pub fn with_transport(client_id: impl Into<String>, transport: T) -> Self {
        Self {
            client_id: client_id.into(),
            bearer: Arc::new(RwLock::new(String::new())),
            transport,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Replaces the bearer token sent with subsequent requests.
    ///
    /// No validation is performed; an empty token clears authentication.
    #[instrument(skip(self, token))]
    pub async fn set_bearer(&self, token: impl Into<String>) {
        let token = token.into();
        tracing::debug!(cleared = token.is_empty(), "replacing bearer token");
        *self.bearer.write().await = token;
    }

    /// Returns a client that shares this one's transport and identity but holds its own token.
    ///
    /// Changing the token of either client afterwards does not affect the other.
    pub fn with_bearer(&self, token: impl Into<String>) -> Self
    where
        T: Clone,
    {
        Self {
            client_id: self.client_id.clone(),
            bearer: Arc::new(RwLock::new(token.into())),
            transport: self.transport.clone(),
        }
    }

    /// Takes a snapshot of the identity the next request would be sent under.
    pub async fn credentials(&self) -> Credentials {
        let bearer = self.bearer.read().await.clone();
        Credentials::new(self.client_id.clone(), Some(bearer))
    }

    /// Executes an arbitrary query and decodes its `data` into `D`.
    ///
    /// Transport errors are returned unchanged. A `null` payload decodes as an empty object, so
    /// `D` should make the fields it expects optional.
    #[instrument(skip(self, document, variables), fields(variables = variables.len()))]
    pub async fn custom_query<D>(
        &self,
        document: impl Into<Cow<'static, str>>,
        variables: Variables,
    ) -> eyre::Result<D>
    where
        D: DeserializeOwned,
    {
        self.run(GraphQLRequest::query(document, variables)).await
    }

    /// Executes an arbitrary mutation and decodes its `data` into `D`.
    ///
    /// Behaves exactly like [`Self::custom_query`] apart from the request being tagged as a
    /// mutation.
    #[instrument(skip(self, document, variables), fields(variables = variables.len()))]
    pub async fn custom_mutation<D>(
        &self,
        document: impl Into<Cow<'static, str>>,
        variables: Variables,
    ) -> eyre::Result<D>
    where
        D: DeserializeOwned,
    {
        self.run(GraphQLRequest::mutation(document, variables)).await
    }

    /// Returns true if nobody has registered `username` yet.
    #[instrument(skip(self), ret)]
    pub async fn is_username_available(&self, username: &str) -> eyre::Result<bool> {
        let mut vars = Variables::new();
        vars.insert("username".into(), username.into());
        let data: queries::UsernameAvailabilityData = self
            .run(GraphQLRequest::query(queries::USERNAME_AVAILABILITY, vars))
            .await?;
        Ok(data.is_username_available)
    }

    /// Fetches the account the bearer token belongs to.
    ///
    /// Fails with [`QueryError::TokenNotSet`] before making any request if no token is set.
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> eyre::Result<Option<User>> {
        let credentials = self.credentials().await;
        if credentials.bearer.is_none() {
            return Err(QueryError::TokenNotSet.into());
        }
        let data: queries::CurrentUserData = self
            .run_as(
                GraphQLRequest::query(queries::CURRENT_USER, Variables::new()),
                &credentials,
            )
            .await?;
        Ok(data.current_user)
    }

    /// Looks up users by their IDs.
    ///
    /// At most 100 IDs may be passed. Unknown IDs are left out of the result.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_users_by_id<S>(&self, ids: &[S]) -> eyre::Result<Vec<User>>
    where
        S: AsRef<str> + Sync,
    {
        check_bulk_len(ids.len())?;
        let data: queries::UsersData = self
            .run(GraphQLRequest::query(
                queries::USERS_BY_ID,
                identifier_variables("ids", ids),
            ))
            .await?;
        let users: Vec<User> = data.users.into_iter().flatten().flatten().collect();
        tracing::debug!(returned_items = users.len(), "fetched users by ID");
        Ok(users)
    }

    /// Looks up users by their login names.
    ///
    /// At most 100 logins may be passed. Unknown logins are left out of the result.
    #[instrument(skip(self, logins), fields(count = logins.len()))]
    pub async fn get_users_by_login<S>(&self, logins: &[S]) -> eyre::Result<Vec<User>>
    where
        S: AsRef<str> + Sync,
    {
        check_bulk_len(logins.len())?;
        let data: queries::UsersData = self
            .run(GraphQLRequest::query(
                queries::USERS_BY_LOGIN,
                identifier_variables("logins", logins),
            ))
            .await?;
        let users: Vec<User> = data.users.into_iter().flatten().flatten().collect();
        tracing::debug!(returned_items = users.len(), "fetched users by login");
        Ok(users)
    }

    /// Looks up channels by their IDs.
    ///
    /// At most 100 IDs may be passed. Unknown IDs are left out of the result.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_channels_by_id<S>(&self, ids: &[S]) -> eyre::Result<Vec<Channel>>
    where
        S: AsRef<str> + Sync,
    {
        check_bulk_len(ids.len())?;
        let data: queries::ChannelsData = self
            .run(GraphQLRequest::query(
                queries::CHANNELS_BY_ID,
                identifier_variables("ids", ids),
            ))
            .await?;
        let channels: Vec<Channel> = data.users.into_iter().flatten().flatten().collect();
        tracing::debug!(returned_items = channels.len(), "fetched channels by ID");
        Ok(channels)
    }

    /// Looks up channels by their names.
    ///
    /// At most 100 names may be passed. Unknown names are left out of the result.
    #[instrument(skip(self, names), fields(count = names.len()))]
    pub async fn get_channels_by_name<S>(&self, names: &[S]) -> eyre::Result<Vec<Channel>>
    where
        S: AsRef<str> + Sync,
    {
        check_bulk_len(names.len())?;
        let data: queries::ChannelsData = self
            .run(GraphQLRequest::query(
                queries::CHANNELS_BY_NAME,
                identifier_variables("names", names),
            ))
            .await?;
        let channels: Vec<Channel> = data.users.into_iter().flatten().flatten().collect();
        tracing::debug!(returned_items = channels.len(), "fetched channels by name");
        Ok(channels)
    }

    /// Lists live streams.
    #[instrument(skip(self))]
    pub async fn get_streams(&self, opts: &StreamQueryOpts) -> eyre::Result<StreamsQuery> {
        let mut vars = page_variables(opts.first, opts.after.as_ref());
        vars.insert(
            "options".into(),
            serde_json::to_value(&opts.options).context("serialize stream options")?,
        );
        let data: queries::StreamsData = self
            .run(GraphQLRequest::query(queries::STREAMS, vars))
            .await?;
        let streams = data.streams.unwrap_or_default();
        tracing::debug!(
            returned_items = streams.edges.len(),
            has_next_page = streams.page_info.has_next_page,
            "fetched streams"
        );
        Ok(streams)
    }

    /// Lists videos across the whole site.
    #[instrument(skip(self))]
    pub async fn get_videos(&self, opts: &VideoQueryOpts) -> eyre::Result<VideosQuery> {
        let vars = page_variables(opts.first, opts.after.as_ref());
        let data: queries::VideosData = self
            .run(GraphQLRequest::query(queries::VIDEOS, vars))
            .await?;
        let videos = data.videos.unwrap_or_default();
        tracing::debug!(
            returned_items = videos.edges.len(),
            has_next_page = videos.page_info.has_next_page,
            "fetched videos"
        );
        Ok(videos)
    }

    /// Lists games (categories).
    #[instrument(skip(self))]
    pub async fn get_games(&self, opts: &GameQueryOpts) -> eyre::Result<GamesQuery> {
        let mut vars = page_variables(opts.first, opts.after.as_ref());
        vars.insert(
            "options".into(),
            serde_json::to_value(&opts.options).context("serialize game options")?,
        );
        let data: queries::GamesData = self
            .run(GraphQLRequest::query(queries::GAMES, vars))
            .await?;
        let games = data.games.unwrap_or_default();
        tracing::debug!(
            returned_items = games.edges.len(),
            has_next_page = games.page_info.has_next_page,
            "fetched games"
        );
        Ok(games)
    }

    /// Fetches a clip by its slug. Returns `None` if there is no such clip.
    #[instrument(skip(self))]
    pub async fn get_clip_by_slug(&self, slug: &str) -> eyre::Result<Option<Clip>> {
        let mut vars = Variables::new();
        vars.insert("slug".into(), slug.into());
        let data: queries::ClipData = self
            .run(GraphQLRequest::query(queries::CLIP, vars))
            .await?;
        Ok(data.clip)
    }

    /// Lists the videos of a user.
    ///
    /// The user's ID is forwarded as-is. Returns `None` when the user does not exist.
    #[instrument(skip(self, user), fields(user.id = %user.id))]
    pub async fn get_videos_by_user(
        &self,
        user: &User,
        opts: &VideoQueryOpts,
    ) -> eyre::Result<Option<VideosQuery>> {
        self.subject_connection(
            queries::USER_VIDEOS,
            &user.id,
            opts.first,
            opts.after.as_ref(),
            |u: queries::UserVideos| u.videos,
        )
        .await
    }

    /// Lists the videos of a channel; equivalent to [`Self::get_videos_by_user`] for the
    /// channel's owner.
    pub async fn get_videos_by_channel(
        &self,
        channel: &Channel,
        opts: &VideoQueryOpts,
    ) -> eyre::Result<Option<VideosQuery>> {
        self.get_videos_by_user(&user_for_channel(channel), opts)
            .await
    }

    /// Lists the followers of a user.
    ///
    /// Fails with [`QueryError::InvalidArgument`] before making any request if the user's ID is
    /// empty. Returns `None` when the user does not exist.
    #[instrument(skip(self, user), fields(user.id = %user.id))]
    pub async fn get_followers_for_user(
        &self,
        user: &User,
        opts: &FollowQueryOpts,
    ) -> eyre::Result<Option<FollowersQuery>> {
        check_subject_id(&user.id)?;
        self.subject_connection(
            queries::FOLLOWERS,
            &user.id,
            opts.first,
            opts.after.as_ref(),
            |u: queries::UserFollowers| u.followers,
        )
        .await
    }

    /// Lists the followers of a channel; see [`Self::get_followers_for_user`].
    pub async fn get_followers_for_channel(
        &self,
        channel: &Channel,
        opts: &FollowQueryOpts,
    ) -> eyre::Result<Option<FollowersQuery>> {
        self.get_followers_for_user(&user_for_channel(channel), opts)
            .await
    }

    /// Lists the moderators of a user's channel.
    ///
    /// Fails with [`QueryError::InvalidArgument`] before making any request if the user's ID is
    /// empty. Returns `None` when the user does not exist.
    #[instrument(skip(self, user), fields(user.id = %user.id))]
    pub async fn get_mods_for_user(
        &self,
        user: &User,
        opts: &ModsQueryOpts,
    ) -> eyre::Result<Option<ModsQuery>> {
        check_subject_id(&user.id)?;
        self.subject_connection(
            queries::MODS,
            &user.id,
            opts.first,
            opts.after.as_ref(),
            |u: queries::UserMods| u.mods,
        )
        .await
    }

    /// Lists the moderators of a channel; see [`Self::get_mods_for_user`].
    pub async fn get_mods_for_channel(
        &self,
        channel: &Channel,
        opts: &ModsQueryOpts,
    ) -> eyre::Result<Option<ModsQuery>> {
        self.get_mods_for_user(&user_for_channel(channel), opts)
            .await
    }

    /// Lists the VIPs of a user's channel.
    ///
    /// Fails with [`QueryError::InvalidArgument`] before making any request if the user's ID is
    /// empty. Returns `None` when the user does not exist.
    #[instrument(skip(self, user), fields(user.id = %user.id))]
    pub async fn get_vips_for_user(
        &self,
        user: &User,
        opts: &VipsQueryOpts,
    ) -> eyre::Result<Option<VipsQuery>> {
        check_subject_id(&user.id)?;
        self.subject_connection(
            queries::VIPS,
            &user.id,
            opts.first,
            opts.after.as_ref(),
            |u: queries::UserVips| u.vips,
        )
        .await
    }

    /// Lists the VIPs of a channel; see [`Self::get_vips_for_user`].
    pub async fn get_vips_for_channel(
        &self,
        channel: &Channel,
        opts: &VipsQueryOpts,
    ) -> eyre::Result<Option<VipsQuery>> {
        self.get_vips_for_user(&user_for_channel(channel), opts)
            .await
    }

    /// Returns a stream of every video of a user, fetching `first` per request.
    ///
    /// The stream ends when the last page has been consumed or the user does not exist.
    pub fn list_videos_by_user<'a>(
        &'a self,
        user: &'a User,
        first: i32,
    ) -> impl Stream<Item = eyre::Result<Node<Video>>> + use<'a, T> {
        PagedStream::new(move |after: Option<Cursor>| async move {
            let page = self
                .get_videos_by_user(user, &VideoQueryOpts { first, after })
                .await?;
            Ok(page.unwrap_or_default())
        })
    }

    /// Returns a stream of every follower of a user, fetching `first` per request.
    ///
    /// An empty user ID surfaces as the stream's first (and only) item.
    pub fn list_followers_for_user<'a>(
        &'a self,
        user: &'a User,
        first: i32,
    ) -> impl Stream<Item = eyre::Result<FollowerEdge>> + use<'a, T> {
        PagedStream::new(move |after: Option<Cursor>| async move {
            let page = self
                .get_followers_for_user(user, &FollowQueryOpts { first, after })
                .await?;
            Ok(page.unwrap_or_default())
        })
    }

    /// Returns a stream of every moderator of a user's channel, fetching `first` per request.
    pub fn list_mods_for_user<'a>(
        &'a self,
        user: &'a User,
        first: i32,
    ) -> impl Stream<Item = eyre::Result<RoleEdge>> + use<'a, T> {
        PagedStream::new(move |after: Option<Cursor>| async move {
            let page = self
                .get_mods_for_user(user, &ModsQueryOpts { first, after })
                .await?;
            Ok(page.unwrap_or_default())
        })
    }

    /// Returns a stream of every VIP of a user's channel, fetching `first` per request.
    pub fn list_vips_for_user<'a>(
        &'a self,
        user: &'a User,
        first: i32,
    ) -> impl Stream<Item = eyre::Result<RoleEdge>> + use<'a, T> {
        PagedStream::new(move |after: Option<Cursor>| async move {
            let page = self
                .get_vips_for_user(user, &VipsQueryOpts { first, after })
                .await?;
            Ok(page.unwrap_or_default())
        })
    }

    /// Runs a `user(id: $id) { <connection> }` query and unwraps the nested connection.
    ///
    /// A `null` user, or a `null` connection inside it, yields `None`.
    async fn subject_connection<W, C>(
        &self,
        document: &'static str,
        id: &str,
        first: i32,
        after: Option<&Cursor>,
        unwrap: impl FnOnce(W) -> Option<C> + Send,
    ) -> eyre::Result<Option<C>>
    where
        W: DeserializeOwned,
    {
        let mut vars = page_variables(first, after);
        vars.insert("id".into(), id.into());
        let data: SubjectData<W> = self.run(GraphQLRequest::query(document, vars)).await?;
        let Some(user) = data.user else {
            tracing::debug!(id, "subject not found");
            return Ok(None);
        };
        Ok(unwrap(user))
    }

    /// Sends `request` under the current credentials and decodes the result.
    async fn run<D>(&self, request: GraphQLRequest) -> eyre::Result<D>
    where
        D: DeserializeOwned,
    {
        let credentials = self.credentials().await;
        self.run_as(request, &credentials).await
    }

    /// Sends `request` under `credentials` and decodes the result.
    async fn run_as<D>(&self, request: GraphQLRequest, credentials: &Credentials) -> eyre::Result<D>
    where
        D: DeserializeOwned,
    {
        let kind = request.kind;
        // transport errors go back to the caller untouched
        let data = self.transport.execute(request, credentials).await?;
        let data = match data {
            serde_json::Value::Null => serde_json::Value::Object(Variables::new()),
            data => data,
        };
        serde_json::from_value(data).with_context(|| format!("decode GraphQL {kind} response"))
    }
}

/// Builds `{ <name>: [..] }` for a bulk lookup.
fn identifier_variables<S: AsRef<str>>(name: &str, identifiers: &[S]) -> Variables {
    let list = identifiers
        .iter()
        .map(|id| serde_json::Value::from(id.as_ref()))
        .collect();
    let mut vars = Variables::new();
    vars.insert(name.into(), serde_json::Value::Array(list));
    vars
}
