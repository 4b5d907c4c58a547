use crate::components::{
    finish_media, seek_media, sync_playing, AudioElement, Icon, MediaTransport, PlayerController,
    PositionGate,
};
use crate::utils::format_position;
use dioxus::prelude::*;

mod controls;

use controls::{LoopButton, NextButton, PlayPauseButton, PrevButton, ShuffleButton};

#[component]
pub fn Player() -> Element {
    let player = use_context::<PlayerController>();
    let transport = AudioElement::default();
    let mut gate = use_signal(PositionGate::default);

    let state = player.current();
    let episode = state.current_episode().cloned();
    let progress = state.progress();

    let episode_url = use_memo(move || player.current_episode_url());
    let playing = use_memo(move || player.is_playing());
    let looping = use_memo(move || player.is_looping());

    // The `<source>` child changed; the element only picks it up on load().
    use_effect(move || {
        if episode_url().is_some() {
            gate.with_mut(PositionGate::source_changed);
            transport.load();
        }
    });

    // Handle play/pause state changes; also re-applied when the source changes.
    use_effect(move || {
        let playing = playing();
        if episode_url().is_some() {
            sync_playing(&transport, playing);
        }
    });

    use_effect(move || {
        let looping = looping();
        if episode_url().is_some() {
            transport.set_looping(looping);
        }
    });

    let on_loaded_metadata = move |_| {
        player.update(|state| gate.with_mut(|g| g.metadata_loaded(state)));
    };

    let on_time_update = move |_| {
        if !gate.peek().accepts_positions() {
            return;
        }
        spawn(async move {
            let time = transport.current_time().await;
            if gate.peek().accepts_positions() {
                player.set_progress(time);
            }
        });
    };

    let on_seek = move |e: Event<FormData>| {
        if let Ok(value) = e.value().parse::<f64>() {
            player.update(|state| seek_media(state, &transport, value));
        }
    };

    let on_ended = move |_| {
        player.update(|state| finish_media(state, &transport));
    };

    let duration = episode.as_ref().map(|e| f64::from(e.duration)).unwrap_or(0.0);
    let elapsed_label = format_position(progress);
    let remaining_label = format_position(duration - progress);

    rsx! {
        div { class: "player-shell",
            header { class: "player-header",
                Icon { name: "music".to_string(), class: "icon-lg".to_string() }
                strong { "Playing now" }
            }

            {
                match &episode {
                    Some(episode) => rsx! {
                        div { class: "current-episode",
                            img {
                                src: "{episode.thumbnail}",
                                alt: "{episode.title}",
                                width: "292",
                                height: "292",
                                class: "current-episode-art",
                            }
                            strong { "{episode.title}" }
                            span { "{episode.members}" }
                        }
                    },
                    None => rsx! {
                        div { class: "empty-player",
                            strong { "Select a podcast to listen" }
                        }
                    },
                }
            }

            footer { class: if episode.is_none() { "player-footer empty" } else { "player-footer" },
                div { class: "player-progress",
                    span { class: "time-label", "{elapsed_label}" }
                    div { class: "player-slider",
                        if episode.is_some() {
                            input {
                                r#type: "range",
                                min: "0",
                                max: "{duration}",
                                step: "any",
                                value: "{progress}",
                                aria_label: "Playback position",
                                oninput: on_seek,
                            }
                        } else {
                            div { class: "empty-slider" }
                        }
                    }
                    span { class: "time-label", "-{remaining_label}" }
                }

                if let Some(episode) = &episode {
                    audio {
                        id: transport.id(),
                        preload: "metadata",
                        autoplay: true,
                        onplay: move |_| player.set_playing_state(true),
                        onpause: move |_| player.set_playing_state(false),
                        onloadedmetadata: on_loaded_metadata,
                        ontimeupdate: on_time_update,
                        onended: on_ended,
                        source {
                            src: "{episode.url}",
                            r#type: episode.media_type.clone(),
                        }
                    }
                }

                div { class: "player-buttons",
                    ShuffleButton {}
                    PrevButton {}
                    PlayPauseButton {}
                    NextButton {}
                    LoopButton {}
                }
            }
        }
    }
}
