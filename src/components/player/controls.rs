use crate::components::{Icon, SharedController};
use dioxus::prelude::*;

/// Play/Pause button - both icons stay mounted, one is hidden
#[component]
pub(super) fn PlayPauseButton() -> Element {
    let mut controller = use_context::<SharedController>();
    let playing = controller.read().view().playing;

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            class: "play-pause-btn",
            onclick: move |_| controller.write().toggle_play_pause(),
            Icon {
                name: "play".to_string(),
                class: if playing { "w-6 h-6 hidden".to_string() } else { "w-6 h-6".to_string() },
            }
            Icon {
                name: "pause".to_string(),
                class: if playing { "w-6 h-6".to_string() } else { "w-6 h-6 hidden".to_string() },
            }
        }
    }
}

#[component]
pub(super) fn SeekBar() -> Element {
    let mut controller = use_context::<SharedController>();
    let (percent, fill, elapsed, total, enabled) = {
        let controller = controller.read();
        let view = controller.view();
        (
            view.slider_percent,
            view.slider_fill.clone(),
            view.elapsed_text.clone(),
            view.duration_text.clone(),
            controller.seek_enabled(),
        )
    };

    let on_seek_input = move |e: Event<FormData>| {
        if let Ok(percent) = e.value().parse::<f64>() {
            controller.write().on_seek_input(percent / 100.0);
        }
    };

    rsx! {
        div { class: "seek-row",
            span { id: "current-time", class: "time-label", "{elapsed}" }
            input {
                id: "seek-slider",
                r#type: "range",
                min: "0",
                max: "100",
                step: "0.1",
                value: "{percent}",
                disabled: !enabled,
                class: "seek-slider",
                style: "background: {fill}",
                oninput: on_seek_input,
            }
            span { id: "duration", class: "time-label", "{total}" }
        }
    }
}

#[component]
pub(super) fn DownloadButton() -> Element {
    let controller = use_context::<SharedController>();
    let download = controller.read().view().download.clone();

    rsx! {
        {
            match download {
                Some(link) => rsx! {
                    a {
                        id: "download-btn",
                        class: "download-btn",
                        href: "{link.href}",
                        download: "{link.filename}",
                        Icon { name: "download".to_string(), class: "w-5 h-5".to_string() }
                        span { "Download" }
                    }
                },
                None => rsx! {
                    span { class: "download-btn disabled",
                        Icon { name: "download".to_string(), class: "w-5 h-5".to_string() }
                        span { "Download" }
                    }
                },
            }
        }
    }
}
