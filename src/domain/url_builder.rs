//! Canonical Bandcamp browse/search URL construction
//!
//! Genre and tags select the tag-browse path; otherwise the site-wide search
//! page is used. Only `q`, `sort` and `page` are encoded into the query
//! string, in that order. `format`, `price` and `location` are accepted by
//! the filter but the public browse pages have no parameters for them.

use urlencoding::encode;

use crate::domain::filter::SearchFilter;

pub const BANDCAMP_ORIGIN: &str = "https://bandcamp.com";
pub const SEARCH_PATH: &str = "/search";
pub const TAG_PATH_PREFIX: &str = "/tag/";

pub fn build_browse_url(filter: &SearchFilter) -> String {
    let path = tag_path(filter);
    let query = browse_query(filter);

    if path.is_empty() {
        return format!("{BANDCAMP_ORIGIN}{SEARCH_PATH}?{query}");
    }

    if query.is_empty() {
        format!("{BANDCAMP_ORIGIN}{path}")
    } else {
        format!("{BANDCAMP_ORIGIN}{path}?{query}")
    }
}

/// Genre first, then tags in their given order; empty values are skipped.
fn tag_path(filter: &SearchFilter) -> String {
    filter
        .genre_text()
        .into_iter()
        .chain(filter.tags.iter().flatten().map(String::as_str))
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("{TAG_PATH_PREFIX}{}", encode(segment)))
        .collect()
}

fn browse_query(filter: &SearchFilter) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::with_capacity(3);

    if let Some(query) = filter.query_text() {
        pairs.push(("q", encode(query).into_owned()));
    }
    if let Some(sort) = filter.sort {
        pairs.push(("sort", sort.as_str().to_string()));
    }
    // page 1 is the implicit default and stays out of the canonical form
    if let Some(page) = filter.page.filter(|page| *page > 1) {
        pairs.push(("page", page.to_string()));
    }

    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}
