use crate::components::{controller_sink, install_document_listeners, Player, SharedController, WebMedia};
use crate::config::player_config;
use crate::player::{load_tracks, PlayerController};
use dioxus::prelude::*;

const TOPIC_MANIFEST: &str = include_str!("../../assets/topics.json");

#[component]
pub fn AppShell() -> Element {
    let config = player_config();
    let controller: SharedController =
        use_signal(|| PlayerController::new(WebMedia::default(), config.clone()));

    // Provide state via context
    use_context_provider(|| controller);

    // One-time setup: bind the audio element, load topics, wire document listeners.
    use_effect(move || {
        let mut controller = controller;
        let sink = controller_sink(controller);
        if let Err(err) = controller
            .write()
            .media_mut()
            .attach(&config.audio_element_id, sink)
        {
            tracing::warn!("player is inert: {err}");
        }

        let tracks = load_tracks(TOPIC_MANIFEST, &config.markup_list_selector);
        tracing::info!(count = tracks.len(), "topics loaded");
        controller.write().initialize(tracks);

        install_document_listeners(controller, config.keyboard_shortcuts);
    });

    rsx! {
        main { class: "player-page",
            Player {}
        }
    }
}
