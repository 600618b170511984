//! The media playback primitive the controller drives, and the notifications
//! it reports back.

/// Single-shot subscription for "ready to play through" on one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadyToken(pub u64);

/// Identifies one `play()` request so a late rejection can be matched to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayAttempt(pub u64);

/// Operations the controller issues against the host media element.
///
/// Implementations must not call back into the controller synchronously;
/// notifications are delivered later as [`MediaEvent`]s.
pub trait MediaElement {
    /// Request playback. A host that refuses (autoplay policy) reports
    /// [`MediaEvent::PlayRejected`] with the same attempt.
    fn play(&mut self, attempt: PlayAttempt);
    fn pause(&mut self);
    fn load(&mut self);
    fn set_source(&mut self, url: &str);
    fn set_current_time(&mut self, seconds: f64);
    /// Register a one-shot ready listener that reports [`MediaEvent::Ready`]
    /// carrying `token`.
    fn arm_ready(&mut self, token: ReadyToken);
    /// Deregister the listener armed with `token`, if it has not fired.
    fn revoke_ready(&mut self, token: ReadyToken);
}

/// Asynchronous notifications from the media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    TimeUpdate(f64),
    MetadataLoaded(f64),
    Ended,
    /// The host paused playback on its own (system media controls, another
    /// tab taking audio focus, a detached output device).
    Paused,
    /// The host resumed or started playback.
    Playing,
    Ready(ReadyToken),
    PlayRejected { attempt: PlayAttempt, reason: String },
    Error(u16),
}

/// User-facing text for a `MediaError.code`.
pub fn media_error_message(code: u16) -> &'static str {
    match code {
        1 => "Playback was aborted before the audio loaded.",
        2 => "Network error while loading this track.",
        3 => "Audio playback failed due to a decode error.",
        4 => "Failed to load audio because no supported source was found.",
        _ => "Unable to load this audio source.",
    }
}
