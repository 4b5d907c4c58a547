use dioxus::prelude::*;

mod api;
mod components;
mod db;
mod utils;

use components::AppView;

const FAVICON: Asset = asset!("/assets/favicon.ico");
const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Meta { name: "theme-color", content: "#8257e5" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-title", content: "Podplayer" }

        document::Stylesheet { href: APP_CSS }

        Router::<AppView> {}
    }
}
