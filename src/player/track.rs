use serde::Deserialize;

use crate::error::PlayerResult;

/// One selectable topic: where the audio lives and what to call it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    #[serde(alias = "src", alias = "data-src")]
    pub source_url: String,
    #[serde(alias = "data-title")]
    pub title: String,
}

impl Track {
    pub fn new(source_url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            title: title.into(),
        }
    }
}

/// Position of a track in the list it was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackIndex(pub usize);

/// Parse a JSON array of `{ "src": ..., "title": ... }` objects.
pub fn parse_manifest(raw: &str) -> PlayerResult<Vec<Track>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let tracks: Vec<Track> = serde_json::from_str(raw)?;
    Ok(tracks)
}
