use crate::api::*;
use crate::components::{AppView, Icon, PlayerController};
use crate::db::AppSettings;
use crate::utils::format_duration;
use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

const LATEST_EPISODE_COUNT: usize = 2;

/// Splits the feed into the highlighted cards and the table below them.
fn split_latest(episodes: &[Episode]) -> (&[Episode], &[Episode]) {
    episodes.split_at(LATEST_EPISODE_COUNT.min(episodes.len()))
}

#[component]
pub fn HomeView() -> Element {
    let app_settings = use_context::<Signal<AppSettings>>();

    let episodes = use_resource(move || async move {
        let settings = app_settings();
        FeedClient::from_settings(&settings)
            .latest_episodes(settings.episode_limit)
            .await
            .inspect_err(|e| warn!("episode feed unavailable: {e}"))
    });

    let content = match &*episodes.read() {
        None => rsx! {
            div { class: "status-line",
                Icon { name: "loader".to_string(), class: "icon".to_string() }
                "Loading episodes..."
            }
        },
        Some(Err(e)) => rsx! {
            div { class: "status-line error",
                "Could not load episodes: {e}"
            }
        },
        Some(Ok(list)) if list.is_empty() => rsx! {
            div { class: "status-line", "No episodes published yet." }
        },
        Some(Ok(list)) => {
            let (latest, rest) = split_latest(list);
            rsx! {
                section { class: "latest-episodes",
                    h2 { "Latest releases" }
                    ul {
                        for (index, episode) in latest.iter().enumerate() {
                            EpisodeCard {
                                key: "{episode.id}",
                                episode: episode.clone(),
                                episodes: list.clone(),
                                index,
                            }
                        }
                    }
                }
                if !rest.is_empty() {
                    section { class: "all-episodes",
                        h2 { "All episodes" }
                        table {
                            thead {
                                tr {
                                    th {}
                                    th { "Podcast" }
                                    th { "Members" }
                                    th { style: "width: 100px", "Date" }
                                    th { "Duration" }
                                    th {}
                                }
                            }
                            tbody {
                                for (offset, episode) in rest.iter().enumerate() {
                                    EpisodeRow {
                                        key: "{episode.id}",
                                        episode: episode.clone(),
                                        episodes: list.clone(),
                                        index: offset + latest.len(),
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "home-page", {content} }
    }
}

#[component]
fn EpisodeCard(episode: Episode, episodes: Vec<Episode>, index: usize) -> Element {
    let player = use_context::<PlayerController>();

    rsx! {
        li { class: "episode-card",
            img {
                src: "{episode.thumbnail}",
                alt: "{episode.title}",
                width: "192",
                height: "192",
                loading: "lazy",
            }
            div { class: "episode-details",
                Link { to: AppView::EpisodeView { id: episode.id.clone() }, "{episode.title}" }
                p { "{episode.members}" }
                span { "{episode.published_label()}" }
                span { "{format_duration(episode.duration)}" }
            }
            button {
                r#type: "button",
                class: "play-episode-btn",
                aria_label: "Play episode",
                onclick: move |_| player.play_list(episodes.clone(), index),
                Icon { name: "play".to_string(), class: "icon".to_string() }
            }
        }
    }
}

#[component]
fn EpisodeRow(episode: Episode, episodes: Vec<Episode>, index: usize) -> Element {
    let player = use_context::<PlayerController>();

    rsx! {
        tr {
            td { style: "width: 72px",
                img {
                    src: "{episode.thumbnail}",
                    alt: "{episode.title}",
                    width: "120",
                    height: "120",
                    loading: "lazy",
                }
            }
            td {
                Link { to: AppView::EpisodeView { id: episode.id.clone() }, "{episode.title}" }
            }
            td { "{episode.members}" }
            td { style: "width: 100px", "{episode.published_label()}" }
            td { "{format_duration(episode.duration)}" }
            td {
                button {
                    r#type: "button",
                    class: "play-episode-btn",
                    aria_label: "Play episode",
                    onclick: move |_| player.play_list(episodes.clone(), index),
                    Icon { name: "play".to_string(), class: "icon".to_string() }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episodes(count: usize) -> Vec<Episode> {
        (0..count)
            .map(|i| Episode {
                id: format!("ep-{i}"),
                ..Episode::default()
            })
            .collect()
    }

    #[test]
    fn latest_takes_two_and_keeps_the_rest() {
        let list = episodes(5);
        let (latest, rest) = split_latest(&list);
        assert_eq!(latest.len(), 2);
        assert_eq!(rest.len(), 3);
        assert_eq!(rest[0].id, "ep-2");
    }

    #[test]
    fn short_feeds_have_no_table() {
        let list = episodes(1);
        let (latest, rest) = split_latest(&list);
        assert_eq!(latest.len(), 1);
        assert!(rest.is_empty());
    }
}
