use crate::components::{AppView, Icon};
use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    let today = chrono::Local::now().format("%a, %-d %B").to_string();

    rsx! {
        header { class: "app-header",
            Link { to: AppView::HomeView {}, class: "brand",
                Icon { name: "music".to_string(), class: "icon-lg".to_string() }
                span { "Podplayer" }
            }
            p { class: "tagline", "The best for you to listen, always" }
            nav { class: "header-nav",
                Link { to: AppView::HomeView {}, class: "nav-link",
                    Icon { name: "home".to_string(), class: "icon".to_string() }
                }
                Link { to: AppView::SettingsView {}, class: "nav-link",
                    Icon { name: "settings".to_string(), class: "icon".to_string() }
                }
            }
            span { class: "today", "{today}" }
        }
    }
}
