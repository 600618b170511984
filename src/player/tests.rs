use super::*;
use crate::config::PlayerConfig;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Play(PlayAttempt),
    Pause,
    Load,
    Source(String),
    Seek(f64),
    Arm(ReadyToken),
    Revoke(ReadyToken),
}

/// Records every command and keeps just enough state to answer reads.
#[derive(Default)]
struct FakeMedia {
    calls: Vec<Call>,
    source: Option<String>,
    time: f64,
    armed: Vec<ReadyToken>,
    /// Source that was active whenever `play` was issued.
    played_sources: Vec<Option<String>>,
}

impl MediaElement for FakeMedia {
    fn play(&mut self, attempt: PlayAttempt) {
        self.calls.push(Call::Play(attempt));
        self.played_sources.push(self.source.clone());
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn load(&mut self) {
        self.calls.push(Call::Load);
    }

    fn set_source(&mut self, url: &str) {
        self.calls.push(Call::Source(url.to_string()));
        self.source = Some(url.to_string());
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.calls.push(Call::Seek(seconds));
        self.time = seconds;
    }

    fn arm_ready(&mut self, token: ReadyToken) {
        self.calls.push(Call::Arm(token));
        self.armed.push(token);
    }

    fn revoke_ready(&mut self, token: ReadyToken) {
        self.calls.push(Call::Revoke(token));
        self.armed.retain(|armed| *armed != token);
    }
}

impl FakeMedia {
    fn play_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Play(_)))
            .count()
    }

    fn last_attempt(&self) -> Option<PlayAttempt> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Play(attempt) => Some(*attempt),
            _ => None,
        })
    }
}

fn topics() -> Vec<Track> {
    vec![
        Track::new("/audio/a.mp3", "Topic A"),
        Track::new("/audio/b.mp3", "Topic B"),
        Track::new("/audio/c.mp3", "Topic C"),
    ]
}

fn controller() -> PlayerController<FakeMedia> {
    let mut controller = PlayerController::new(FakeMedia::default(), PlayerConfig::default());
    controller.initialize(topics());
    controller
}

/// Delivers a ready notification for every listener still registered,
/// the way the host would once the current source can play through.
fn fire_armed_ready(controller: &mut PlayerController<FakeMedia>) {
    let armed = std::mem::take(&mut controller.media_mut().armed);
    for token in armed {
        controller.handle_media_event(MediaEvent::Ready(token));
    }
}

#[test]
fn initialize_points_at_first_track_without_playing() {
    let controller = controller();
    let view = controller.view();

    assert_eq!(view.title.as_deref(), Some("Topic A"));
    assert_eq!(
        view.download,
        Some(DownloadLink {
            href: "/audio/a.mp3".to_string(),
            filename: "Topic A.mp3".to_string(),
        })
    );
    assert_eq!(controller.media().source.as_deref(), Some("/audio/a.mp3"));
    assert!(!controller.is_playing());
    assert_eq!(controller.media().play_count(), 0);
    assert_eq!(view.duration_text, "00:00");
}

#[test]
fn initialize_with_empty_list_leaves_everything_unset() {
    let mut controller = PlayerController::new(FakeMedia::default(), PlayerConfig::default());
    controller.initialize(Vec::new());

    assert!(controller.view().title.is_none());
    assert!(controller.view().download.is_none());
    assert!(controller.media().source.is_none());
    assert!(controller.media().calls.is_empty());

    // Nothing to play yet.
    controller.toggle_play_pause();
    assert!(!controller.is_playing());
}

#[test]
fn toggle_twice_restores_state_from_either_side() {
    let mut controller = controller();
    let before = controller.view().clone();
    controller.toggle_play_pause();
    assert!(controller.is_playing());
    assert!(controller.view().playing);
    controller.toggle_play_pause();
    assert_eq!(controller.state(), PlaybackState::Paused);
    assert_eq!(controller.view(), &before);

    controller.toggle_play_pause();
    let playing = controller.view().clone();
    controller.toggle_play_pause();
    controller.toggle_play_pause();
    assert!(controller.is_playing());
    assert_eq!(controller.view(), &playing);
}

#[test]
fn time_updates_drive_slider_once_duration_known() {
    let mut controller = controller();

    controller.on_time_update(3.0);
    assert_eq!(controller.view().elapsed_text, "00:03");
    assert_eq!(controller.view().slider_percent, 0.0);

    controller.on_metadata_loaded(200.0);
    assert_eq!(controller.view().duration_text, "03:20");
    controller.on_time_update(50.0);
    assert_eq!(controller.view().slider_percent, 25.0);
    assert_eq!(
        controller.view().slider_fill,
        "linear-gradient(to right, #374151 25%, #d1d5db 25%)"
    );

    controller.on_time_update(500.0);
    assert_eq!(controller.current_time(), 200.0);
    assert_eq!(controller.view().slider_percent, 100.0);
}

#[test]
fn metadata_resets_slider_and_handles_nan() {
    let mut controller = controller();
    controller.on_metadata_loaded(100.0);
    controller.on_time_update(40.0);

    controller.on_metadata_loaded(f64::NAN);
    assert_eq!(controller.view().duration_text, "00:00");
    assert_eq!(controller.view().slider_percent, 0.0);
    assert!(!controller.seek_enabled());
}

#[test]
fn seek_maps_fraction_to_time() {
    let mut controller = controller();
    controller.on_metadata_loaded(120.0);

    controller.on_seek_input(0.5);
    assert_eq!(controller.media().time, 60.0);
    assert_eq!(controller.view().elapsed_text, "01:00");
    assert_eq!(controller.view().slider_percent, 50.0);

    controller.on_seek_input(1.7);
    assert_eq!(controller.media().time, 120.0);
}

#[test]
fn seek_without_duration_is_a_noop() {
    let mut controller = controller();
    let calls = controller.media().calls.len();

    controller.on_seek_input(0.5);
    controller.on_metadata_loaded(60.0);
    controller.on_seek_input(f64::NAN);

    assert_eq!(controller.media().calls.len(), calls);
}

#[test]
fn ended_resets_to_paused_at_zero() {
    for start_playing in [false, true] {
        let mut controller = controller();
        controller.on_metadata_loaded(30.0);
        controller.on_time_update(29.0);
        if start_playing {
            controller.toggle_play_pause();
        }

        controller.handle_media_event(MediaEvent::Ended);

        assert_eq!(controller.state(), PlaybackState::Paused);
        assert_eq!(controller.current_time(), 0.0);
        assert_eq!(controller.media().time, 0.0);
        assert!(!controller.view().playing);
        assert_eq!(controller.view().elapsed_text, "00:00");
    }
}

#[test]
fn host_pause_syncs_state_without_media_commands() {
    let mut controller = controller();
    controller.toggle_play_pause();
    let calls = controller.media().calls.len();

    controller.handle_media_event(MediaEvent::Paused);

    assert!(!controller.is_playing());
    assert!(!controller.view().playing);
    assert_eq!(controller.media().calls.len(), calls);

    controller.toggle_play_pause();
    assert!(controller.is_playing());
    assert!(matches!(controller.media().calls.last(), Some(Call::Play(_))));
}

#[test]
fn host_playing_syncs_state_and_next_toggle_pauses() {
    let mut controller = controller();
    let calls = controller.media().calls.len();

    controller.handle_media_event(MediaEvent::Playing);

    assert!(controller.is_playing());
    assert!(controller.view().playing);
    assert_eq!(controller.media().calls.len(), calls);

    controller.toggle_play_pause();
    assert!(!controller.is_playing());
    assert_eq!(controller.media().calls.last(), Some(&Call::Pause));
}

#[test]
fn time_update_from_previous_track_is_ignored_while_loading() {
    let mut controller = controller();
    controller.on_metadata_loaded(120.0);
    controller.on_time_update(42.0);

    controller.select_track(TrackIndex(1));
    controller.handle_media_event(MediaEvent::TimeUpdate(42.0));

    assert_eq!(controller.current_time(), 0.0);
    assert_eq!(controller.view().elapsed_text, "00:00");
    assert_eq!(controller.view().slider_percent, 0.0);

    controller.handle_media_event(MediaEvent::MetadataLoaded(90.0));
    controller.handle_media_event(MediaEvent::TimeUpdate(9.0));
    assert_eq!(controller.view().elapsed_text, "00:09");
    assert_eq!(controller.view().slider_percent, 10.0);
}

#[test]
fn select_track_loads_then_autoplays_once_ready() {
    let mut controller = controller();
    controller.toggle_dropdown();
    controller.toggle_play_pause();

    controller.select_track(TrackIndex(1));

    assert!(!controller.is_playing());
    assert_eq!(controller.view().title.as_deref(), Some("Topic B"));
    assert_eq!(
        controller.view().download.as_ref().map(|d| d.filename.as_str()),
        Some("Topic B.mp3")
    );
    assert!(!controller.view().dropdown_open);
    assert!(controller.media().calls.contains(&Call::Load));

    fire_armed_ready(&mut controller);
    assert!(controller.is_playing());
    assert_eq!(
        controller.media().played_sources.last(),
        Some(&Some("/audio/b.mp3".to_string()))
    );
}

#[test]
fn rapid_reselection_autoplays_exactly_once_for_latest_track() {
    let mut controller = controller();

    controller.select_track(TrackIndex(0));
    let stale = controller.pending_ready().expect("armed for A");
    controller.select_track(TrackIndex(1));

    assert!(controller.media().calls.contains(&Call::Revoke(stale)));
    assert_eq!(controller.media().armed.len(), 1);

    // A stale listener that slipped through still must not start playback.
    controller.handle_media_event(MediaEvent::Ready(stale));
    assert_eq!(controller.media().play_count(), 0);

    fire_armed_ready(&mut controller);
    fire_armed_ready(&mut controller);

    assert_eq!(controller.media().play_count(), 1);
    assert_eq!(
        controller.media().played_sources,
        vec![Some("/audio/b.mp3".to_string())]
    );
}

#[test]
fn ready_token_is_single_shot() {
    let mut controller = controller();
    controller.select_track(TrackIndex(2));
    let token = controller.pending_ready().expect("armed");

    controller.on_ready(token);
    controller.toggle_play_pause();
    controller.on_ready(token);

    assert!(!controller.is_playing());
    assert_eq!(controller.media().play_count(), 1);
}

#[test]
fn toggle_during_load_cancels_autoplay() {
    let mut controller = controller();
    controller.select_track(TrackIndex(1));
    let token = controller.pending_ready().expect("armed");

    controller.toggle_play_pause();
    controller.toggle_play_pause();
    controller.on_ready(token);

    assert!(!controller.is_playing());
    assert_eq!(controller.media().play_count(), 1);
}

#[test]
fn out_of_range_selection_is_ignored() {
    let mut controller = controller();
    let calls = controller.media().calls.len();
    controller.select_track(TrackIndex(9));
    assert_eq!(controller.media().calls.len(), calls);
    assert_eq!(controller.view().title.as_deref(), Some("Topic A"));
}

#[test]
fn rejected_play_reverts_to_paused() {
    let mut controller = controller();
    controller.toggle_play_pause();
    let attempt = controller.media().last_attempt().expect("play issued");

    controller.handle_media_event(MediaEvent::PlayRejected {
        attempt,
        reason: "NotAllowedError".to_string(),
    });

    assert!(!controller.is_playing());
    assert!(!controller.view().playing);
    assert!(controller.view().notice.is_some());

    controller.toggle_play_pause();
    assert!(controller.view().notice.is_none());
}

#[test]
fn stale_rejection_is_ignored() {
    let mut controller = controller();
    controller.toggle_play_pause();
    let first = controller.media().last_attempt().expect("play issued");
    controller.toggle_play_pause();
    controller.toggle_play_pause();

    controller.on_play_rejected(first, "NotAllowedError");

    assert!(controller.is_playing());
    assert!(controller.view().notice.is_none());
}

#[test]
fn media_error_pauses_and_drops_pending_autoplay() {
    let mut controller = controller();
    controller.select_track(TrackIndex(1));
    let token = controller.pending_ready().expect("armed");

    controller.handle_media_event(MediaEvent::Error(4));
    controller.on_ready(token);

    assert!(!controller.is_playing());
    assert_eq!(
        controller.view().notice.as_deref(),
        Some(media_error_message(4))
    );
    controller.dismiss_notice();
    assert!(controller.view().notice.is_none());
}

#[test]
fn dropdown_closes_on_outside_click_only() {
    let mut controller = controller();

    controller.toggle_dropdown();
    controller.on_document_click(true);
    assert!(controller.view().dropdown_open);

    controller.on_document_click(false);
    assert!(!controller.view().dropdown_open);

    controller.on_document_click(false);
    assert!(!controller.view().dropdown_open);

    controller.toggle_dropdown();
    controller.select_track(TrackIndex(2));
    assert!(!controller.view().dropdown_open);
}

#[test]
fn dropdown_header_toggles() {
    let mut dropdown = Dropdown::default();
    dropdown.toggle();
    assert!(dropdown.is_open());
    dropdown.toggle();
    assert!(!dropdown.is_open());
}

#[test]
fn space_and_media_key_toggle_play() {
    assert_eq!(shortcut_from_key(" ", "Space", false), Some(Shortcut::TogglePlay));
    assert_eq!(
        shortcut_from_key("MediaPlayPause", "", true),
        Some(Shortcut::TogglePlay)
    );
    assert_eq!(shortcut_from_key(" ", "Space", true), None);
    assert_eq!(shortcut_from_key("a", "KeyA", false), None);

    let mut controller = controller();
    controller.handle_shortcut(Shortcut::TogglePlay);
    assert!(controller.is_playing());
}

#[test]
fn manifest_source_reads_src_and_title() {
    let raw = r#"[
        { "src": "/audio/one.mp3", "title": "One" },
        { "source_url": "/audio/two.mp3", "title": "Two" }
    ]"#;
    let tracks = ManifestSource::new(raw).tracks().expect("valid manifest");
    assert_eq!(
        tracks,
        vec![
            Track::new("/audio/one.mp3", "One"),
            Track::new("/audio/two.mp3", "Two"),
        ]
    );

    assert!(ManifestSource::new("").tracks().expect("empty").is_empty());
    assert!(ManifestSource::new("{").tracks().is_err());
}

#[test]
fn attribute_pairs_skip_incomplete_items() {
    let tracks = tracks_from_attributes(vec![
        (Some("/a.mp3".to_string()), Some("A".to_string())),
        (None, Some("Missing src".to_string())),
        (Some("/c.mp3".to_string()), None),
        (Some("  ".to_string()), Some("Blank".to_string())),
    ]);
    assert_eq!(tracks, vec![Track::new("/a.mp3", "A")]);
}

#[test]
fn load_tracks_prefers_manifest_and_survives_bad_input() {
    let tracks = load_tracks(r#"[{ "src": "/x.mp3", "title": "X" }]"#, "#topic-source li");
    assert_eq!(tracks, vec![Track::new("/x.mp3", "X")]);

    assert!(load_tracks("not json", "#topic-source li").is_empty());
    assert!(load_tracks("[]", "#topic-source li").is_empty());
}
