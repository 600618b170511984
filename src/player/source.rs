//! Where the track list comes from.

use crate::error::PlayerResult;

use super::track::{parse_manifest, Track};

#[cfg(target_arch = "wasm32")]
use crate::error::PlayerError;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, Element};

pub trait TrackSource {
    fn tracks(&self) -> PlayerResult<Vec<Track>>;
}

/// A JSON manifest, usually embedded from `assets/topics.json`.
pub struct ManifestSource<'a> {
    raw: &'a str,
}

impl<'a> ManifestSource<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }
}

impl TrackSource for ManifestSource<'_> {
    fn tracks(&self) -> PlayerResult<Vec<Track>> {
        parse_manifest(self.raw)
    }
}

/// Builds tracks from `(data-src, data-title)` attribute pairs, skipping
/// entries that lack either one.
pub fn tracks_from_attributes<I>(items: I) -> Vec<Track>
where
    I: IntoIterator<Item = (Option<String>, Option<String>)>,
{
    items
        .into_iter()
        .enumerate()
        .filter_map(|(position, (src, title))| match (src, title) {
            (Some(src), Some(title)) if !src.trim().is_empty() => Some(Track::new(src, title)),
            _ => {
                tracing::warn!(position, "skipping list item without data-src/data-title");
                None
            }
        })
        .collect()
}

/// List items already present in the host page, e.g. `#topic-list li`.
#[cfg(target_arch = "wasm32")]
pub struct MarkupSource<'a> {
    selector: &'a str,
}

#[cfg(target_arch = "wasm32")]
impl<'a> MarkupSource<'a> {
    pub fn new(selector: &'a str) -> Self {
        Self { selector }
    }
}

#[cfg(target_arch = "wasm32")]
impl TrackSource for MarkupSource<'_> {
    fn tracks(&self) -> PlayerResult<Vec<Track>> {
        let Some(document) = window().and_then(|w| w.document()) else {
            return Ok(Vec::new());
        };
        let nodes = document
            .query_selector_all(self.selector)
            .map_err(|err| PlayerError::Dom(format!("{err:?}")))?;

        let mut items = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            items.push((
                element.get_attribute("data-src"),
                element.get_attribute("data-title"),
            ));
        }
        Ok(tracks_from_attributes(items))
    }
}

/// Tracks from the manifest, or from host markup when the manifest lists none.
pub fn load_tracks(manifest: &str, markup_selector: &str) -> Vec<Track> {
    match ManifestSource::new(manifest).tracks() {
        Ok(tracks) if !tracks.is_empty() => return tracks,
        Ok(_) => {}
        Err(err) => tracing::warn!("topic manifest unreadable: {err}"),
    }
    markup_tracks(markup_selector)
}

#[cfg(target_arch = "wasm32")]
fn markup_tracks(selector: &str) -> Vec<Track> {
    MarkupSource::new(selector).tracks().unwrap_or_else(|err| {
        tracing::warn!("could not read topic markup: {err}");
        Vec::new()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn markup_tracks(_selector: &str) -> Vec<Track> {
    Vec::new()
}
