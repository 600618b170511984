use crate::components::{SharedController, TopicSelector};
use dioxus::prelude::*;

mod controls;

use controls::{DownloadButton, PlayPauseButton, SeekBar};

#[component]
pub fn Player() -> Element {
    let mut controller = use_context::<SharedController>();
    let (title, notice) = {
        let controller = controller.read();
        let view = controller.view();
        (view.title.clone(), view.notice.clone())
    };

    rsx! {
        if let Some(message) = notice {
            div { class: "player-notice", role: "status",
                span { "{message}" }
                button {
                    r#type: "button",
                    class: "player-notice-dismiss",
                    onclick: move |_| controller.write().dismiss_notice(),
                    "Dismiss"
                }
            }
        }
        div { class: "player-card",
            TopicSelector {}
            h2 { id: "track-title", class: "track-title",
                {title.unwrap_or_else(|| "No topic available".to_string())}
            }
            div { class: "player-controls",
                PlayPauseButton {}
                SeekBar {}
            }
            DownloadButton {}
        }
    }
}
