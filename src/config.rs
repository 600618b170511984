//! Player configuration, embedded at build time from `assets/player.json`.

use once_cell::sync::Lazy;
use serde::Deserialize;

const EMBEDDED_CONFIG: &str = include_str!("../assets/player.json");

static PLAYER_CONFIG: Lazy<PlayerConfig> = Lazy::new(|| PlayerConfig::parse(EMBEDDED_CONFIG));

/// Settings the widget reads once at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Slider colour for the played portion.
    pub played_color: String,
    /// Slider colour for the remainder.
    pub remaining_color: String,
    /// Extension appended to the title for the suggested download filename.
    pub download_extension: String,
    /// Id given to the shared `<audio>` element.
    pub audio_element_id: String,
    /// Selector for host-page markup that lists `li[data-src][data-title]` items.
    pub markup_list_selector: String,
    pub keyboard_shortcuts: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            played_color: "#374151".to_string(),
            remaining_color: "#d1d5db".to_string(),
            download_extension: "mp3".to_string(),
            audio_element_id: "audio-element".to_string(),
            markup_list_selector: "#topic-source li".to_string(),
            keyboard_shortcuts: true,
        }
    }
}

impl PlayerConfig {
    /// Parse a JSON config, falling back to defaults on malformed input.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<PlayerConfig>(raw) {
            Ok(config) => config.normalized(),
            Err(err) => {
                tracing::warn!("invalid player config, using defaults: {err}");
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> Self {
        let ext = self.download_extension.trim().trim_start_matches('.');
        self.download_extension = if ext.is_empty() {
            Self::default().download_extension
        } else {
            ext.to_string()
        };
        if self.audio_element_id.trim().is_empty() {
            self.audio_element_id = Self::default().audio_element_id;
        }
        self
    }
}

pub fn player_config() -> &'static PlayerConfig {
    &PLAYER_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(PlayerConfig::parse(""), PlayerConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = PlayerConfig::parse(r#"{ "download_extension": ".ogg" }"#);
        assert_eq!(config.download_extension, "ogg");
        assert_eq!(config.played_color, "#374151");
    }

    #[test]
    fn malformed_config_falls_back() {
        let config = PlayerConfig::parse("{ not json");
        assert_eq!(config, PlayerConfig::default());
    }

    #[test]
    fn embedded_config_parses() {
        assert_eq!(player_config().download_extension, "mp3");
    }
}
