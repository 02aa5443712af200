//! Embedded payload type definitions.
//!
//! These mirror the `shortcode_media` object of the page's shared data. Every
//! field is optional: the payload is produced by a third party and its shape
//! drifts, so missing or mistyped values must not fail deserialization. A
//! list element that is not an object becomes an empty (default) entry.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The post-level media object (`entry_data.PostPage[0].graphql.shortcode_media`).
#[derive(Debug, Clone, Deserialize)]
pub struct ShortcodeMedia {
    #[serde(flatten)]
    pub node: MediaNode,

    /// Present only on multi-item (carousel) posts.
    #[serde(default)]
    pub edge_sidecar_to_children: Option<SidecarChildren>,
}

/// Fields shared by the post object and each carousel child.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaNode {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(rename = "__typename", default, deserialize_with = "lenient_string")]
    pub typename: Option<String>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_video: Option<bool>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub video_url: Option<String>,

    #[serde(default, deserialize_with = "lenient_items")]
    pub display_resources: Vec<DisplayResource>,
}

/// One rendition of an image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayResource {
    #[serde(default, deserialize_with = "lenient_string")]
    pub src: Option<String>,

    #[serde(default, deserialize_with = "lenient_width")]
    pub config_width: Option<u64>,
}

/// Carousel children wrapper.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SidecarChildren {
    #[serde(default, deserialize_with = "lenient_items")]
    pub edges: Vec<SidecarEdge>,
}

/// A single carousel child, `None` when the node is missing or not an object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SidecarEdge {
    #[serde(default)]
    pub node: Option<MediaNode>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool())
}

fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_width<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_u64())
}
