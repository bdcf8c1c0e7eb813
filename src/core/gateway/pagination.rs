//! Cursor pagination over Hex API collections.
//!
//! [`pages`] turns a page-fetching closure into a lazy stream of pages. The
//! stream is finite, fetches strictly one page at a time (page N+1 needs the
//! cursor from page N) and can be restarted by calling [`pages`] again.
//! [`collect_all`] and [`collect_up_to`] are the two consumers tools use.

use std::future::Future;

use futures::stream::{self, Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::client::{ApiClient, ApiRequest, request_as};
use super::error::{GatewayError, GatewayResult};

/// Walks stop with `ProtocolViolation` after this many pages.
pub const MAX_PAGES: usize = 1_000;

/// One page of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// Wire shape of a paged Hex API collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
    #[serde(default)]
    pub pagination: PaginationInfo,
}

/// Pagination block of a [`PageEnvelope`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub after: Option<String>,
}

impl<T> From<PageEnvelope<T>> for Page<T> {
    fn from(envelope: PageEnvelope<T>) -> Self {
        Self {
            items: envelope.values,
            has_more: envelope.pagination.has_more,
            next_cursor: envelope.pagination.after,
        }
    }
}

/// Fetch one page of a paged endpoint, forwarding `cursor` as `after`.
///
/// An ApiError body becomes `GatewayError::Api` so that a walk aborts on it.
pub async fn fetch_page<T: DeserializeOwned>(
    client: &dyn ApiClient,
    request: ApiRequest,
    cursor: Option<String>,
) -> GatewayResult<Page<T>> {
    let request = request.query_opt("after", cursor);
    let envelope = request_as::<PageEnvelope<T>>(client, request)
        .await?
        .into_result()?;
    Ok(envelope.into())
}

struct WalkState<F> {
    fetch: F,
    cursor: Option<String>,
    fetched: usize,
    max_pages: usize,
    done: bool,
}

/// Lazily fetch pages until the server reports `has_more == false`.
///
/// `has_more` is the stop signal. A page that claims more results without
/// a cursor, or a walk longer than `max_pages`, ends the stream with
/// `ProtocolViolation`. Any error from `fetch` ends the stream with that
/// error.
pub fn pages<T, F, Fut>(fetch: F, max_pages: usize) -> impl Stream<Item = GatewayResult<Vec<T>>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = GatewayResult<Page<T>>>,
{
    let state = WalkState {
        fetch,
        cursor: None,
        fetched: 0,
        max_pages,
        done: false,
    };

    stream::try_unfold(state, |mut state| async move {
        if state.done {
            return Ok(None);
        }
        if state.fetched >= state.max_pages {
            warn!(pages = state.fetched, "Pagination did not terminate");
            return Err(GatewayError::protocol_violation(format!(
                "server still reported more results after {} pages",
                state.fetched
            )));
        }

        let page = (state.fetch)(state.cursor.take()).await?;
        state.fetched += 1;
        debug!(
            page = state.fetched,
            items = page.items.len(),
            has_more = page.has_more,
            "Fetched page"
        );

        match (page.has_more, page.next_cursor) {
            (false, _) => state.done = true,
            (true, Some(cursor)) => state.cursor = Some(cursor),
            (true, None) => {
                return Err(GatewayError::protocol_violation(format!(
                    "page {} reported more results but no cursor",
                    state.fetched
                )));
            }
        }

        Ok(Some((page.items, state)))
    })
}

/// Materialize the whole collection, in server order.
///
/// All or nothing: on any error the items gathered so far are dropped.
pub async fn collect_all<T, F, Fut>(fetch: F) -> GatewayResult<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = GatewayResult<Page<T>>>,
{
    pages(fetch, MAX_PAGES).try_concat().await
}

/// Collect at most `limit` items, fetching no more pages than needed.
pub async fn collect_up_to<T, F, Fut>(fetch: F, limit: usize) -> GatewayResult<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = GatewayResult<Page<T>>>,
{
    let mut items = Vec::new();
    if limit == 0 {
        return Ok(items);
    }

    let stream = pages(fetch, MAX_PAGES);
    futures::pin_mut!(stream);

    while let Some(page) = stream.try_next().await? {
        items.extend(page);
        if items.len() >= limit {
            items.truncate(limit);
            break;
        }
    }

    Ok(items)
}
