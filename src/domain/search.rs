//! Link-only search results
//!
//! No catalog lookups happen here: the result of a search is the canonical
//! browse link, wrapped in a single "collection" item pointing at it.

use serde::Serialize;

use crate::domain::{filter::SearchFilter, url_builder::build_browse_url};

pub const BROWSE_TITLE: &str = "Browse Bandcamp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Album,
    Track,
    Collection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ItemKind>,
    /// Always the canonical link of the originating filter.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub items: Vec<ResultItem>,
    pub link: String,
}

pub fn search_link_only(filter: &SearchFilter) -> SearchResult {
    let link = build_browse_url(filter);

    let title = match filter.query_text() {
        Some(query) => format!("Search: {query}"),
        None => BROWSE_TITLE.to_string(),
    };

    let collection = ResultItem {
        title,
        artist: None,
        kind: Some(ItemKind::Collection),
        url: link.clone(),
        artwork: None,
        tags: filter.tags.clone(),
        price_text: filter
            .price
            .and_then(|price| price.label())
            .map(str::to_string),
    };

    SearchResult {
        items: vec![collection],
        link,
    }
}
