use crate::components::{Icon, PlayerController};
use dioxus::prelude::*;

fn toggle_class(active: bool) -> &'static str {
    if active {
        "control-btn active"
    } else {
        "control-btn"
    }
}

/// Shuffle button - needs at least two episodes to pick from
#[component]
pub(super) fn ShuffleButton() -> Element {
    let player = use_context::<PlayerController>();
    let disabled = use_memo(move || player.read_with(|s| s.episodes().len() < 2));
    let enabled = use_memo(move || player.read_with(|s| s.is_shuffling()));

    rsx! {
        button {
            id: "shuffle-btn",
            r#type: "button",
            disabled: disabled(),
            class: toggle_class(enabled()),
            aria_pressed: enabled(),
            onclick: move |_| player.toggle_shuffle(),
            Icon { name: "shuffle".to_string(), class: "icon".to_string() }
        }
    }
}

/// Previous button - completely isolated component
#[component]
pub(super) fn PrevButton() -> Element {
    let player = use_context::<PlayerController>();
    let can_go_back = use_memo(move || player.read_with(|s| s.has_previous()));

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            disabled: !can_go_back(),
            class: "control-btn",
            onclick: move |_| player.play_previous(),
            Icon { name: "prev".to_string(), class: "icon".to_string() }
        }
    }
}

/// Play/Pause button - completely isolated component
#[component]
pub(super) fn PlayPauseButton() -> Element {
    let player = use_context::<PlayerController>();
    let has_episode = use_memo(move || player.read_with(|s| s.current_episode().is_some()));
    let playing = use_memo(move || player.is_playing());

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            disabled: !has_episode(),
            class: "play-btn",
            onclick: move |_| player.toggle_play(),
            if playing() {
                Icon { name: "pause".to_string(), class: "icon".to_string() }
            } else {
                Icon { name: "play".to_string(), class: "icon".to_string() }
            }
        }
    }
}

/// Next button - completely isolated component
#[component]
pub(super) fn NextButton() -> Element {
    let player = use_context::<PlayerController>();
    let can_advance = use_memo(move || player.read_with(|s| s.has_next()));

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            disabled: !can_advance(),
            class: "control-btn",
            onclick: move |_| player.play_next(),
            Icon { name: "next".to_string(), class: "icon".to_string() }
        }
    }
}

/// Loop button - replays the current episode when it ends
#[component]
pub(super) fn LoopButton() -> Element {
    let player = use_context::<PlayerController>();
    let has_episode = use_memo(move || player.read_with(|s| s.current_episode().is_some()));
    let enabled = use_memo(move || player.is_looping());

    rsx! {
        button {
            id: "loop-btn",
            r#type: "button",
            disabled: !has_episode(),
            class: toggle_class(enabled()),
            aria_pressed: enabled(),
            onclick: move |_| player.toggle_loop(),
            Icon { name: "repeat".to_string(), class: "icon".to_string() }
        }
    }
}
