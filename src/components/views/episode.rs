use crate::api::*;
use crate::components::{AppView, Icon, PlayerController};
use crate::db::AppSettings;
use crate::utils::format_duration;
use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

#[component]
pub fn EpisodeView(id: ReadSignal<String>) -> Element {
    let app_settings = use_context::<Signal<AppSettings>>();
    let player = use_context::<PlayerController>();

    let episode = use_resource(move || async move {
        let id = id();
        let settings = app_settings();
        FeedClient::from_settings(&settings)
            .episode(&id)
            .await
            .inspect_err(|e| warn!(episode = %id, "episode unavailable: {e}"))
    });

    let content = match &*episode.read() {
        None => rsx! {
            div { class: "status-line",
                Icon { name: "loader".to_string(), class: "icon".to_string() }
                "Loading episode..."
            }
        },
        Some(Err(e)) => rsx! {
            div { class: "status-line error", "{e}" }
        },
        Some(Ok(episode)) => {
            let to_play = episode.clone();
            rsx! {
                div { class: "episode-thumbnail",
                    Link { to: AppView::HomeView {}, class: "episode-back",
                        Icon { name: "arrow-left".to_string(), class: "icon".to_string() }
                    }
                    img {
                        src: "{episode.thumbnail}",
                        alt: "{episode.title}",
                        width: "700",
                        height: "160",
                    }
                    button {
                        r#type: "button",
                        class: "episode-play",
                        aria_label: "Play episode",
                        onclick: move |_| player.play(to_play.clone()),
                        Icon { name: "play".to_string(), class: "icon".to_string() }
                    }
                }
                header { class: "episode-header",
                    h1 { "{episode.title}" }
                    span { "{episode.members}" }
                    span { "{episode.published_label()}" }
                    span {
                        Icon { name: "clock".to_string(), class: "icon-sm".to_string() }
                        "{format_duration(episode.duration)}"
                    }
                }
                // Descriptions are HTML from the configured feed, which is trusted.
                div {
                    class: "episode-description",
                    dangerous_inner_html: "{episode.description}",
                }
            }
        }
    };

    rsx! {
        div { class: "episode-page", {content} }
    }
}
