//! Shared types and streaming infrastructure for the GraphQL client.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll, ready};
use tokio_stream::Stream;

/// Opaque continuation token handed out by a connection.
///
/// Pass the cursor of the last edge you consumed as `after` to resume from there.
pub type Cursor = String;

/// The variable mapping sent alongside a GraphQL document.
///
/// Keys are unique and their order carries no meaning.
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// Page size used whenever the requested `first` falls outside `[1, MAX_PAGE_SIZE]`.
pub const DEFAULT_PAGE_SIZE: i32 = 25;

/// The largest page the endpoint hands out.
pub const MAX_PAGE_SIZE: i32 = 100;

/// Returns the page size that is actually sent for a requested `first`.
///
/// Out-of-range values are replaced with [`DEFAULT_PAGE_SIZE`], never rejected.
pub fn effective_first(first: i32) -> i32 {
    if (1..=MAX_PAGE_SIZE).contains(&first) {
        first
    } else {
        DEFAULT_PAGE_SIZE
    }
}

/// Builds the `first`/`after` pair every paginated query takes.
pub(crate) fn page_variables(first: i32, after: Option<&Cursor>) -> Variables {
    let mut vars = Variables::new();
    vars.insert("first".into(), effective_first(first).into());
    vars.insert(
        "after".into(),
        after.map_or(serde_json::Value::Null, |c| c.as_str().into()),
    );
    vars
}

/// Decodes an explicit `null` as the type's default.
///
/// The schema leaves most scalars nullable, so `#[serde(default)]` alone is not enough: it only
/// covers a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Pagination details of a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether another page follows the one returned.
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_next_page: bool,
    /// Whether a page precedes the one returned.
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_previous_page: bool,
}

/// A connection edge that knows its own cursor.
pub trait Edge {
    fn cursor(&self) -> Option<&Cursor>;
}

/// The plain `{ cursor, node }` edge used by most connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<T> {
    #[serde(default)]
    pub cursor: Option<Cursor>,
    pub node: T,
}

impl<T> Edge for Node<T> {
    fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }
}

/// A page of edges plus the details needed to fetch the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "E: Deserialize<'de>")
)]
pub struct Connection<E> {
    /// The total size of the result set, for connections that report it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<E>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_info: PageInfo,
}

impl<E> Default for Connection<E> {
    fn default() -> Self {
        Self {
            total_count: None,
            edges: Vec::new(),
            page_info: PageInfo::default(),
        }
    }
}

impl<E: Edge> Connection<E> {
    /// The cursor to pass as `after` to fetch the next page, if there is one.
    pub fn next_cursor(&self) -> Option<&Cursor> {
        if !self.page_info.has_next_page {
            return None;
        }
        self.edges.last().and_then(Edge::cursor)
    }

    /// Splits the connection into its edges and the cursor of the following page.
    fn into_page(self) -> (VecDeque<E>, Option<Cursor>) {
        let next = self.next_cursor().cloned();
        (self.edges.into(), next)
    }
}

/// A page request in flight. The fetcher travels with it so it can be reused for the page
/// after.
type PendingPage<'a, F, E> =
    Pin<Box<dyn Future<Output = (F, eyre::Result<Connection<E>>)> + Send + 'a>>;

/// A stream over every edge of a connection, fetching one page at a time.
///
/// The fetcher is called with `None` for the first page and with the end cursor of the previous
/// page after that. The stream ends after a page without a next cursor, or right after
/// yielding the first error.
pub struct PagedStream<'a, E, F> {
    /// Edges of the last page that have not been yielded yet.
    buffered: VecDeque<E>,
    /// The next page, if one is still to come.
    next_page: Option<PendingPage<'a, F, E>>,
}

impl<'a, E, F, Fut> PagedStream<'a, E, F>
where
    E: Edge + Send + 'a,
    F: Fn(Option<Cursor>) -> Fut + Send + 'a,
    Fut: Future<Output = eyre::Result<Connection<E>>> + Send + 'a,
{
    /// Creates a stream that starts from the first page.
    pub fn new(fetcher: F) -> Self {
        Self {
            buffered: VecDeque::new(),
            next_page: Some(Self::fetch(fetcher, None)),
        }
    }

    fn fetch(fetcher: F, after: Option<Cursor>) -> PendingPage<'a, F, E> {
        Box::pin(async move {
            let page = fetcher(after).await;
            (fetcher, page)
        })
    }
}

// edges are only ever moved in and out of the buffer, never pinned
impl<E, F> Unpin for PagedStream<'_, E, F> {}

impl<'a, E, F, Fut> Stream for PagedStream<'a, E, F>
where
    E: Edge + Send + 'a,
    F: Fn(Option<Cursor>) -> Fut + Send + 'a,
    Fut: Future<Output = eyre::Result<Connection<E>>> + Send + 'a,
{
    type Item = eyre::Result<E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(edge) = this.buffered.pop_front() {
                return Poll::Ready(Some(Ok(edge)));
            }
            let Some(pending) = this.next_page.as_mut() else {
                return Poll::Ready(None);
            };
            let (fetcher, page) = ready!(pending.as_mut().poll(cx));
            this.next_page = None;

            let (edges, next) = match page {
                Ok(page) => page.into_page(),
                Err(e) => return Poll::Ready(Some(Err(e))),
            };
            tracing::trace!(
                returned_items = edges.len(),
                has_next_page = next.is_some(),
                "fetched page"
            );
            this.buffered = edges;
            if let Some(cursor) = next {
                this.next_page = Some(Self::fetch(fetcher, Some(cursor)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio_stream::StreamExt;

    #[test]
    fn first_is_clamped_to_default() {
        for first in [i32::MIN, -1, 0, 101, 1000, i32::MAX] {
            assert_eq!(effective_first(first), DEFAULT_PAGE_SIZE, "first = {first}");
        }
        for first in [1, 2, 25, 99, 100] {
            assert_eq!(effective_first(first), first);
        }
    }

    #[test]
    fn page_variables_send_null_without_cursor() {
        let vars = page_variables(0, None);
        assert_eq!(
            serde_json::Value::Object(vars),
            serde_json::json!({ "first": 25, "after": null })
        );

        let vars = page_variables(10, Some(&"abc".to_string()));
        assert_eq!(
            serde_json::Value::Object(vars),
            serde_json::json!({ "first": 10, "after": "abc" })
        );
    }

    #[test]
    fn next_cursor_requires_next_page() {
        let conn: Connection<Node<u32>> = serde_json::from_value(serde_json::json!({
            "edges": [{ "cursor": "a", "node": 1 }, { "cursor": "b", "node": 2 }],
            "pageInfo": { "hasNextPage": true }
        }))
        .unwrap();
        assert_eq!(conn.next_cursor(), Some(&"b".to_string()));

        let conn: Connection<Node<u32>> = serde_json::from_value(serde_json::json!({
            "edges": [{ "cursor": "a", "node": 1 }],
            "pageInfo": { "hasNextPage": false }
        }))
        .unwrap();
        assert_eq!(conn.next_cursor(), None);
    }

    /// A page of `(cursor, value)` edges.
    fn page(edges: &[(&str, u32)], has_next_page: bool) -> Connection<Node<u32>> {
        Connection {
            total_count: None,
            edges: edges
                .iter()
                .map(|&(cursor, node)| Node {
                    cursor: Some(cursor.to_string()),
                    node,
                })
                .collect(),
            page_info: PageInfo {
                has_next_page,
                has_previous_page: false,
            },
        }
    }

    /// An edge type without a `Default` impl.
    #[derive(Debug, PartialEq, Deserialize)]
    struct Named {
        cursor: Option<Cursor>,
        name: String,
    }

    impl Edge for Named {
        fn cursor(&self) -> Option<&Cursor> {
            self.cursor.as_ref()
        }
    }

    #[test]
    fn connection_of_edges_without_default() {
        let conn: Connection<Named> = serde_json::from_value(serde_json::json!({
            "totalCount": 7,
            "edges": [{ "cursor": "x", "name": "first" }],
            "pageInfo": { "hasNextPage": true, "hasPreviousPage": null }
        }))
        .unwrap();
        assert_eq!(conn.total_count, Some(7));
        assert_eq!(conn.edges[0].name, "first");
        assert_eq!(conn.next_cursor().map(String::as_str), Some("x"));

        let conn: Connection<Named> =
            serde_json::from_value(serde_json::json!({ "edges": null, "pageInfo": null }))
                .unwrap();
        assert!(conn.edges.is_empty());
        assert_eq!(conn.page_info, PageInfo::default());
    }

    #[test]
    fn null_scalars_become_defaults() {
        #[derive(Debug, Deserialize)]
        struct Counters {
            #[serde(default, deserialize_with = "null_as_default")]
            views: u64,
            #[serde(default, deserialize_with = "null_as_default")]
            seconds: f64,
        }

        let counters: Counters =
            serde_json::from_value(serde_json::json!({ "views": null, "seconds": null })).unwrap();
        assert_eq!((counters.views, counters.seconds), (0, 0.0));

        let counters: Counters = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(counters.views, 0);

        let counters: Counters =
            serde_json::from_value(serde_json::json!({ "views": 12, "seconds": 2.5 })).unwrap();
        assert_eq!((counters.views, counters.seconds), (12, 2.5));
    }

    #[tokio::test]
    async fn paged_stream_follows_cursors() {
        let stream = PagedStream::new(|cursor: Option<Cursor>| async move {
            Ok(match cursor.as_deref() {
                None => page(&[("a", 1), ("b", 2)], true),
                Some("b") => page(&[("c", 3)], true),
                Some(_) => page(&[("d", 4)], false),
            })
        });
        let items: Vec<u32> = stream.map(|r| r.unwrap().node).collect().await;
        assert_eq!(items, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn paged_stream_stops_without_cursor() {
        // claims another page but hands out no cursor to fetch it with
        let stream = PagedStream::new(|cursor: Option<Cursor>| async move {
            assert_eq!(cursor, None);
            let mut last = page(&[("a", 1)], true);
            last.edges[0].cursor = None;
            Ok(last)
        });
        let items: Vec<u32> = stream.map(|r| r.unwrap().node).collect().await;
        assert_eq!(items, vec![1]);
    }

    #[tokio::test]
    async fn paged_stream_stops_after_error() {
        let stream = PagedStream::new(|cursor: Option<Cursor>| async move {
            match cursor {
                None => Ok(page(&[("a", 1)], true)),
                Some(_) => Err(eyre::eyre!("boom")),
            }
        });
        let items: Vec<eyre::Result<Node<u32>>> = stream.collect().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap().node, 1);
        assert_eq!(items[1].as_ref().unwrap_err().to_string(), "boom");
    }
}
