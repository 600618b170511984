use crate::components::{Icon, SharedController, TOPIC_SELECTOR_ID};
use crate::player::TrackIndex;
use dioxus::prelude::*;

/// Dropdown listing every topic. Outside clicks are handled by the document
/// listener in the audio manager.
#[component]
pub fn TopicSelector() -> Element {
    let mut controller = use_context::<SharedController>();
    let (tracks, current, open) = {
        let controller = controller.read();
        let view = controller.view();
        (controller.tracks().to_vec(), view.current, view.dropdown_open)
    };

    rsx! {
        div { id: TOPIC_SELECTOR_ID, class: "topic-selector",
            div {
                id: "topic-selector-header",
                class: "topic-selector-header",
                onclick: move |_| controller.write().toggle_dropdown(),
                span { class: "topic-label", "Choose a topic" }
                button {
                    id: "topic-dropdown-btn",
                    r#type: "button",
                    class: "topic-dropdown-btn",
                    Icon {
                        name: "chevron-down".to_string(),
                        class: if open { "w-5 h-5 rotate-180".to_string() } else { "w-5 h-5".to_string() },
                    }
                }
            }
            ul {
                id: "topic-list",
                class: if open { "topic-list show" } else { "topic-list" },
                for (index, track) in tracks.into_iter().enumerate() {
                    li {
                        key: "{index}",
                        class: if current == Some(TrackIndex(index)) { "topic-item active" } else { "topic-item" },
                        "data-src": "{track.source_url}",
                        "data-title": "{track.title}",
                        onclick: move |_| controller.write().select_track(TrackIndex(index)),
                        "{track.title}"
                    }
                }
            }
        }
    }
}
