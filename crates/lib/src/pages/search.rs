//! Header search: live suggestions and submit.

use serde::Serialize;
use tracing::warn;

use crate::api::{SearchHit, StoreClient};

/// Queries shorter than this (after trimming) show no suggestions.
pub const MIN_QUERY_LEN: usize = 2;
pub const NO_RESULTS: &str = "No results found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "hits", rename_all = "snake_case")]
pub enum Suggestions {
  /// Nothing shown: query too short, or the lookup failed.
  Cleared,
  /// The lookup succeeded with zero hits.
  NoResults,
  Hits(Vec<SearchHit>),
}

/// Suggestions for the current contents of the search box.
pub async fn suggest(client: &StoreClient, input: &str) -> Suggestions {
  let query = input.trim();
  if query.chars().count() < MIN_QUERY_LEN {
    return Suggestions::Cleared;
  }

  match client.search(query).await {
    Ok(hits) if hits.is_empty() => Suggestions::NoResults,
    Ok(hits) => Suggestions::Hits(hits),
    Err(e) => {
      warn!(error = %e, query, "live search failed");
      Suggestions::Cleared
    }
  }
}

/// Where submitting the search form navigates; `None` for a blank query.
pub fn submit_location(input: &str) -> Option<String> {
  let query = input.trim();
  if query.is_empty() {
    return None;
  }
  Some(format!("/search/?q={}", urlencoding::encode(query)))
}
