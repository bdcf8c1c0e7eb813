//! Paged listing shared by the workspace tools.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::gateway::{
    ApiClient, ApiRequest, GatewayResult, collect_all, collect_up_to, fetch_page,
};
use crate::domains::tools::definitions::common::validate_limit;

/// Parameters for a paged workspace listing.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListParams {
    #[schemars(description = "Items per page (default: 25, max: 100)")]
    pub limit: Option<u32>,

    #[schemars(description = "Cursor returned by a previous call, to continue listing")]
    pub after: Option<String>,

    #[schemars(
        description = "Follow every page and return the whole collection (from after, if given)"
    )]
    #[serde(default)]
    pub fetch_all: bool,

    #[schemars(description = "With fetch_all, stop once this many items were collected")]
    pub max_items: Option<u32>,
}

/// Items of one listing plus the cursor to continue from, if any.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Fetch one page, or walk the whole collection when `fetch_all` is set.
/// Either way the listing starts at `after` when one is given.
pub async fn list<T: DeserializeOwned>(
    client: &dyn ApiClient,
    endpoint: &str,
    params: &ListParams,
) -> GatewayResult<Listing<T>> {
    let request = ApiRequest::get(endpoint).query("limit", validate_limit(params.limit));

    let (items, next_cursor) = if params.fetch_all {
        let mut start = params.after.clone();
        let fetch = |cursor: Option<String>| {
            let cursor = cursor.or_else(|| start.take());
            fetch_page::<T>(client, request.clone(), cursor)
        };
        let items = match params.max_items {
            Some(max) => collect_up_to(fetch, max as usize).await?,
            None => collect_all(fetch).await?,
        };
        (items, None)
    } else {
        let page = fetch_page::<T>(client, request, params.after.clone()).await?;
        let next = if page.has_more { page.next_cursor } else { None };
        (page.items, next)
    };

    Ok(Listing {
        count: items.len(),
        items,
        next_cursor,
    })
}

impl<T> Listing<T> {
    /// Text rendering: one line per item and a hint for the next page.
    pub fn summary(&self, noun: &str, line: impl Fn(&T) -> String) -> String {
        if self.items.is_empty() {
            return format!("No {} found.", noun);
        }

        let mut out = format!("Found {} {}:\n", self.count, noun);
        for item in &self.items {
            out.push_str(&line(item));
            out.push('\n');
        }
        if let Some(cursor) = &self.next_cursor {
            out.push_str(&format!(
                "\nMore {} available. Call again with after=\"{}\" to continue.",
                noun, cursor
            ));
        }
        out.trim_end().to_string()
    }
}
