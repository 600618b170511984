use dioxus::prelude::*;

mod components;
mod config;
mod error;
mod player;

use components::AppShell;

const FAVICON: Asset = asset!("/assets/favicon.svg");
const PLAYER_CSS: Asset = asset!("/assets/styling/player.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Meta { name: "theme-color", content: "#374151" }
        document::Title { "Topic Player" }

        document::Stylesheet { href: PLAYER_CSS }

        AppShell {}
    }
}
