//! Embedded post data extraction.
//!
//! Post pages carry their data as an inline script of the form
//! `window._sharedData = {...};`. The locator scans every script for that
//! assignment, so script order and count may change freely, but a change of
//! the assignment's own format surfaces as [`Error::PayloadNotFound`].

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::api::types::ShortcodeMedia;
use crate::error::{Error, Result};
use crate::media::PostMediaNode;

/// Path from the shared data root to the post media object.
const MEDIA_PATH: [&str; 5] = ["entry_data", "PostPage", "0", "graphql", "shortcode_media"];

static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("static selector is valid"));

/// Matches up to and including the opening brace of the assigned object.
static ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"window\._sharedData\s*=\s*\{").expect("static regex is valid"));

/// Extract and parse the `window._sharedData` payload from a page.
///
/// Only the first JSON value after the assignment is read, so statements
/// following it in the same script are ignored.
pub fn extract_shared_data(document: &Html) -> Result<Value> {
    let payload = document
        .select(&SCRIPT_SELECTOR)
        .find_map(|script| {
            let text: String = script.text().collect();
            let start = ASSIGNMENT.find(&text)?.end() - 1;
            Some(text[start..].to_string())
        })
        .ok_or(Error::PayloadNotFound)?;

    tracing::debug!("Found shared data script ({} bytes from assignment)", payload.len());

    match serde_json::Deserializer::from_str(&payload)
        .into_iter::<Value>()
        .next()
    {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(Error::PayloadParse(e)),
        None => Err(Error::PayloadNotFound),
    }
}

/// Walk the fixed path down to `shortcode_media`.
pub fn find_shortcode_media(shared_data: &Value) -> Result<&Value> {
    let mut current = shared_data;

    for segment in MEDIA_PATH {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };

        current = match next {
            Some(value) if !value.is_null() => value,
            _ => {
                return Err(Error::PayloadShape(format!(
                    "'{}' is missing from entry_data.PostPage[0].graphql.shortcode_media \
                     (post removed, login wall or changed page layout)",
                    segment
                )))
            }
        };
    }

    Ok(current)
}

/// Locate the post media in a parsed page.
pub fn locate_post_media(document: &Html) -> Result<PostMediaNode> {
    let shared_data = extract_shared_data(document)?;
    let media_value = find_shortcode_media(&shared_data)?;

    let media: ShortcodeMedia = serde_json::from_value(media_value.clone())
        .map_err(|e| Error::PayloadShape(format!("unexpected shortcode_media layout: {}", e)))?;

    tracing::debug!(
        "Post media type: {}",
        media.node.typename.as_deref().unwrap_or("unknown")
    );

    PostMediaNode::try_from(media)
}
