use tracing::{debug, warn};

use crate::config::PlayerConfig;

use super::dropdown::Dropdown;
use super::format::{download_filename, format_time, known_duration, slider_fill, slider_percent};
use super::media::{media_error_message, MediaElement, MediaEvent, PlayAttempt, ReadyToken};
use super::track::{Track, TrackIndex};

const REJECTED_NOTICE: &str = "Playback was blocked by the browser. Press play to start.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub filename: String,
}

/// Everything the widget renders, kept in sync by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub playing: bool,
    pub slider_percent: f64,
    pub slider_fill: String,
    pub elapsed_text: String,
    pub duration_text: String,
    pub title: Option<String>,
    pub download: Option<DownloadLink>,
    pub dropdown_open: bool,
    pub notice: Option<String>,
    pub current: Option<TrackIndex>,
}

impl PlayerView {
    fn new(config: &PlayerConfig) -> Self {
        Self {
            playing: false,
            slider_percent: 0.0,
            slider_fill: slider_fill(0.0, &config.played_color, &config.remaining_color),
            elapsed_text: format_time(0.0),
            duration_text: format_time(f64::NAN),
            title: None,
            download: None,
            dropdown_open: false,
            notice: None,
            current: None,
        }
    }
}

/// Keyboard intents the widget understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePlay,
}

/// Maps a key press to a player shortcut. Modified presses are ignored so
/// browser and OS bindings keep working.
pub fn shortcut_from_key(key: &str, code: &str, modified: bool) -> Option<Shortcut> {
    if key == "MediaPlayPause" || code == "MediaPlayPause" {
        return Some(Shortcut::TogglePlay);
    }
    if !modified && (key == " " || key == "Spacebar" || code == "Space") {
        return Some(Shortcut::TogglePlay);
    }
    None
}

/// Owns the playing/paused state for one media element and translates user
/// intents and media notifications into media commands and a [`PlayerView`].
pub struct PlayerController<M: MediaElement> {
    media: M,
    config: PlayerConfig,
    tracks: Vec<Track>,
    state: PlaybackState,
    current: Option<TrackIndex>,
    current_time: f64,
    duration: Option<f64>,
    dropdown: Dropdown,
    pending_ready: Option<ReadyToken>,
    next_ready: u64,
    last_attempt: Option<PlayAttempt>,
    next_attempt: u64,
    view: PlayerView,
}

impl<M: MediaElement> PlayerController<M> {
    pub fn new(media: M, config: PlayerConfig) -> Self {
        let view = PlayerView::new(&config);
        Self {
            media,
            config,
            tracks: Vec::new(),
            state: PlaybackState::Paused,
            current: None,
            current_time: 0.0,
            duration: None,
            dropdown: Dropdown::default(),
            pending_ready: None,
            next_ready: 0,
            last_attempt: None,
            next_attempt: 0,
            view,
        }
    }

    pub fn view(&self) -> &PlayerView {
        &self.view
    }

    #[cfg(test)]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[cfg(test)]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    #[cfg(test)]
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    #[cfg(test)]
    pub fn pending_ready(&self) -> Option<ReadyToken> {
        self.pending_ready
    }

    /// The slider only accepts input once the duration is known.
    pub fn seek_enabled(&self) -> bool {
        self.duration.is_some()
    }

    #[cfg(test)]
    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Store the track list and point the player at the first entry without
    /// starting playback. An empty list leaves everything unset.
    pub fn initialize(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        let Some(first) = self.tracks.first().cloned() else {
            warn!("no tracks available, player left empty");
            return;
        };
        self.apply_track(TrackIndex(0), &first);
        debug!(title = %first.title, "player initialized");
    }

    pub fn toggle_play_pause(&mut self) {
        if self.current.is_none() {
            debug!("toggle ignored, no track loaded");
            return;
        }
        // An explicit toggle overrides any pending auto-play.
        self.revoke_pending_ready();
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.play(),
        }
    }

    pub fn on_time_update(&mut self, current_time: f64) {
        // Still loading a newly selected track; the position belongs to the old one.
        if self.pending_ready.is_some() && self.duration.is_none() {
            return;
        }
        let mut time = if current_time.is_finite() {
            current_time.max(0.0)
        } else {
            0.0
        };
        if let Some(duration) = self.duration {
            time = time.min(duration);
        }
        self.current_time = time;
        self.view.elapsed_text = format_time(time);
        if let Some(percent) = slider_percent(time, self.duration) {
            self.set_slider(percent);
        }
    }

    pub fn on_metadata_loaded(&mut self, duration: f64) {
        self.duration = known_duration(duration);
        self.view.duration_text = format_time(duration);
        self.set_slider(0.0);
        debug!(duration = ?self.duration, "metadata loaded");
    }

    /// `fraction` is the slider position in `[0, 1]`.
    pub fn on_seek_input(&mut self, fraction: f64) {
        let Some(duration) = self.duration else {
            return;
        };
        if !fraction.is_finite() {
            return;
        }
        let target = fraction.clamp(0.0, 1.0) * duration;
        self.media.set_current_time(target);
        self.on_time_update(target);
    }

    pub fn on_playback_ended(&mut self) {
        self.pause();
        self.media.set_current_time(0.0);
        self.current_time = 0.0;
        self.view.elapsed_text = format_time(0.0);
        self.set_slider(0.0);
        debug!("playback ended");
    }

    /// Switch to the track at `index` and play it once it can play through.
    pub fn select_track(&mut self, index: TrackIndex) {
        let Some(track) = self.tracks.get(index.0).cloned() else {
            warn!(index = index.0, "track selection out of range");
            return;
        };

        self.pause();
        self.revoke_pending_ready();
        self.media.set_current_time(0.0);
        self.apply_track(index, &track);
        self.media.load();

        let token = ReadyToken(self.next_ready);
        self.next_ready += 1;
        self.pending_ready = Some(token);
        self.media.arm_ready(token);

        self.dropdown.close();
        self.view.dropdown_open = false;
        debug!(title = %track.title, ?token, "track selected");
    }

    /// The host paused on its own. Only the displayed state follows it.
    pub fn on_host_paused(&mut self) {
        if self.is_playing() {
            debug!("host paused playback");
            self.set_state(PlaybackState::Paused);
        }
    }

    /// The host started playback on its own.
    pub fn on_host_playing(&mut self) {
        if !self.is_playing() {
            debug!("host resumed playback");
            self.set_state(PlaybackState::Playing);
        }
    }

    /// The media element can play through the source loaded with `token`.
    pub fn on_ready(&mut self, token: ReadyToken) {
        if self.pending_ready != Some(token) {
            debug!(?token, "ignoring stale ready notification");
            return;
        }
        self.pending_ready = None;
        if !self.is_playing() {
            self.play();
        }
    }

    pub fn on_play_rejected(&mut self, attempt: PlayAttempt, reason: &str) {
        if self.last_attempt != Some(attempt) || !self.is_playing() {
            return;
        }
        warn!(%reason, "play request rejected");
        self.set_state(PlaybackState::Paused);
        self.view.notice = Some(REJECTED_NOTICE.to_string());
    }

    pub fn on_media_error(&mut self, code: u16) {
        warn!(code, "media element reported an error");
        self.revoke_pending_ready();
        self.pause();
        self.view.notice = Some(media_error_message(code).to_string());
    }

    pub fn dismiss_notice(&mut self) {
        self.view.notice = None;
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(time) => self.on_time_update(time),
            MediaEvent::MetadataLoaded(duration) => self.on_metadata_loaded(duration),
            MediaEvent::Ended => self.on_playback_ended(),
            MediaEvent::Paused => self.on_host_paused(),
            MediaEvent::Playing => self.on_host_playing(),
            MediaEvent::Ready(token) => self.on_ready(token),
            MediaEvent::PlayRejected { attempt, reason } => self.on_play_rejected(attempt, &reason),
            MediaEvent::Error(code) => self.on_media_error(code),
        }
    }

    pub fn handle_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::TogglePlay => self.toggle_play_pause(),
        }
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown.toggle();
        self.view.dropdown_open = self.dropdown.is_open();
    }

    pub fn on_document_click(&mut self, inside: bool) {
        self.dropdown.on_document_click(inside);
        self.view.dropdown_open = self.dropdown.is_open();
    }

    fn play(&mut self) {
        let attempt = PlayAttempt(self.next_attempt);
        self.next_attempt += 1;
        self.last_attempt = Some(attempt);
        self.view.notice = None;
        self.set_state(PlaybackState::Playing);
        self.media.play(attempt);
    }

    fn pause(&mut self) {
        self.set_state(PlaybackState::Paused);
        self.media.pause();
    }

    fn set_state(&mut self, state: PlaybackState) {
        self.state = state;
        self.view.playing = state == PlaybackState::Playing;
    }

    fn set_slider(&mut self, percent: f64) {
        self.view.slider_percent = percent;
        self.view.slider_fill = slider_fill(
            percent,
            &self.config.played_color,
            &self.config.remaining_color,
        );
    }

    fn revoke_pending_ready(&mut self) {
        if let Some(token) = self.pending_ready.take() {
            self.media.revoke_ready(token);
        }
    }

    fn apply_track(&mut self, index: TrackIndex, track: &Track) {
        self.media.set_source(&track.source_url);
        self.current = Some(index);
        self.current_time = 0.0;
        self.duration = None;
        self.view.current = Some(index);
        self.view.title = Some(track.title.clone());
        self.view.download = Some(DownloadLink {
            href: track.source_url.clone(),
            filename: download_filename(&track.title, &self.config.download_extension),
        });
        self.view.elapsed_text = format_time(0.0);
        self.view.duration_text = format_time(f64::NAN);
        self.set_slider(0.0);
    }
}
