//! Audio Manager - the boundary between the player panel and the audio element.
//! The panel renders the element; everything imperative goes through `MediaTransport`.

use crate::components::{EndedOutcome, PlayerState};
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

pub const AUDIO_ELEMENT_ID: &str = "podplayer-audio";

/// Imperative controls of the audio primitive.
pub trait MediaTransport {
    /// Re-reads the element's `<source>` children.
    fn load(&self);
    fn play(&self);
    fn pause(&self);
    fn seek(&self, position: f64);
    fn set_looping(&self, looping: bool);
}

/// Makes the element's play/pause state follow the context flag.
pub fn sync_playing<T: MediaTransport + ?Sized>(transport: &T, playing: bool) {
    if playing {
        transport.play();
    } else {
        transport.pause();
    }
}

/// Applies the transport side of an ended-media transition.
/// Advancing swaps the source; the reload autoplays on its own.
pub fn apply_ended_outcome<T: MediaTransport + ?Sized>(transport: &T, outcome: EndedOutcome) {
    match outcome {
        EndedOutcome::Replayed => {
            transport.seek(0.0);
            transport.play();
        }
        EndedOutcome::Advanced => {}
        EndedOutcome::Cleared => transport.pause(),
    }
}

/// Seeks the state and hands the clamped position to the element.
pub fn seek_media<T: MediaTransport + ?Sized>(
    state: &mut PlayerState,
    transport: &T,
    seconds: f64,
) -> f64 {
    let target = state.seek(seconds);
    transport.seek(target);
    target
}

/// Runs the ended transition on the state, then on the element.
pub fn finish_media<T: MediaTransport + ?Sized>(
    state: &mut PlayerState,
    transport: &T,
) -> EndedOutcome {
    let outcome = state.handle_media_ended();
    debug!(?outcome, "media ended");
    apply_ended_outcome(transport, outcome);
    outcome
}

/// Position updates only count once the current source reported its
/// metadata; until then the element may still report the previous source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionGate {
    ready: bool,
}

impl PositionGate {
    pub fn source_changed(&mut self) {
        self.ready = false;
    }

    pub fn metadata_loaded(&mut self, state: &mut PlayerState) {
        state.reset_progress();
        self.ready = true;
    }

    pub fn accepts_positions(&self) -> bool {
        self.ready
    }
}

/// Handle to the `<audio>` element rendered by the player panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioElement {
    id: &'static str,
}

impl Default for AudioElement {
    fn default() -> Self {
        Self {
            id: AUDIO_ELEMENT_ID,
        }
    }
}

impl AudioElement {
    pub fn id(&self) -> &'static str {
        self.id
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioElement {
    fn element(&self) -> Option<HtmlAudioElement> {
        window()?
            .document()?
            .get_element_by_id(self.id)?
            .dyn_into::<HtmlAudioElement>()
            .ok()
    }

    /// Current position in seconds.
    pub async fn current_time(&self) -> f64 {
        self.element()
            .map(|audio| audio.current_time())
            .filter(|time| time.is_finite())
            .unwrap_or(0.0)
    }
}

#[cfg(target_arch = "wasm32")]
impl MediaTransport for AudioElement {
    fn load(&self) {
        if let Some(audio) = self.element() {
            audio.load();
        }
    }

    fn play(&self) {
        let Some(audio) = self.element() else {
            return;
        };
        if !audio.paused() {
            return;
        }
        if let Ok(promise) = audio.play() {
            spawn(async move {
                // Autoplay rejections surface as a pause event; nothing to do here.
                let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
            });
        }
    }

    fn pause(&self) {
        if let Some(audio) = self.element() {
            if !audio.paused() {
                let _ = audio.pause();
            }
        }
    }

    fn seek(&self, position: f64) {
        if let Some(audio) = self.element() {
            audio.set_current_time(position.max(0.0));
        }
    }

    fn set_looping(&self, looping: bool) {
        if let Some(audio) = self.element() {
            audio.set_loop(looping);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioElement {
    fn command(&self, value: serde_json::Value) {
        let payload = serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string());
        let id = serde_json::to_string(self.id).unwrap_or_else(|_| "\"\"".to_string());
        let script = format!(
            r#"(function () {{
                const el = document.getElementById({id});
                if (!el) return false;
                const cmd = {payload};
                switch (cmd.type) {{
                    case "load": el.load(); break;
                    case "play": if (el.paused) el.play().catch(() => {{}}); break;
                    case "pause": if (!el.paused) el.pause(); break;
                    case "seek": el.currentTime = cmd.position; break;
                    case "loop": el.loop = !!cmd.enabled; break;
                }}
                return true;
            }})();"#
        );
        let _ = document::eval(&script);
    }

    /// Current position in seconds.
    pub async fn current_time(&self) -> f64 {
        let id = serde_json::to_string(self.id).unwrap_or_else(|_| "\"\"".to_string());
        let eval = document::eval(&format!(
            r#"const el = document.getElementById({id});
            const t = el ? el.currentTime : 0;
            return Number.isFinite(t) ? t : 0;"#
        ));
        eval.join::<f64>().await.unwrap_or(0.0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl MediaTransport for AudioElement {
    fn load(&self) {
        self.command(serde_json::json!({ "type": "load" }));
    }

    fn play(&self) {
        self.command(serde_json::json!({ "type": "play" }));
    }

    fn pause(&self) {
        self.command(serde_json::json!({ "type": "pause" }));
    }

    fn seek(&self, position: f64) {
        self.command(serde_json::json!({
            "type": "seek",
            "position": position.max(0.0),
        }));
    }

    fn set_looping(&self, looping: bool) {
        self.command(serde_json::json!({ "type": "loop", "enabled": looping }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Episode;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Load,
        Play,
        Pause,
        Seek(f64),
        Loop(bool),
    }

    #[derive(Default)]
    struct RecordingTransport {
        calls: RefCell<Vec<Call>>,
    }

    impl MediaTransport for RecordingTransport {
        fn load(&self) {
            self.calls.borrow_mut().push(Call::Load);
        }
        fn play(&self) {
            self.calls.borrow_mut().push(Call::Play);
        }
        fn pause(&self) {
            self.calls.borrow_mut().push(Call::Pause);
        }
        fn seek(&self, position: f64) {
            self.calls.borrow_mut().push(Call::Seek(position));
        }
        fn set_looping(&self, looping: bool) {
            self.calls.borrow_mut().push(Call::Loop(looping));
        }
    }

    #[test]
    fn playing_flag_drives_transport() {
        let transport = RecordingTransport::default();
        sync_playing(&transport, true);
        sync_playing(&transport, false);
        assert_eq!(*transport.calls.borrow(), vec![Call::Play, Call::Pause]);
    }

    #[test]
    fn replay_rewinds_then_plays() {
        let transport = RecordingTransport::default();
        apply_ended_outcome(&transport, EndedOutcome::Replayed);
        assert_eq!(
            *transport.calls.borrow(),
            vec![Call::Seek(0.0), Call::Play]
        );
    }

    #[test]
    fn advance_leaves_transport_alone_and_clear_pauses() {
        let transport = RecordingTransport::default();
        apply_ended_outcome(&transport, EndedOutcome::Advanced);
        assert!(transport.calls.borrow().is_empty());

        apply_ended_outcome(&transport, EndedOutcome::Cleared);
        assert_eq!(*transport.calls.borrow(), vec![Call::Pause]);
    }

    #[test]
    fn transport_is_object_safe() {
        let transport = RecordingTransport::default();
        let dynamic: &dyn MediaTransport = &transport;
        dynamic.set_looping(true);
        sync_playing(dynamic, true);
        assert_eq!(
            *transport.calls.borrow(),
            vec![Call::Loop(true), Call::Play]
        );
    }

    fn episode(id: &str, duration: u32) -> Episode {
        Episode {
            id: id.to_string(),
            url: format!("https://cdn.example.com/{id}.mp3"),
            duration,
            ..Episode::default()
        }
    }

    #[test]
    fn seek_forwards_the_clamped_target() {
        let transport = RecordingTransport::default();
        let mut state = PlayerState::default();
        state.play(episode("a", 300));

        assert_eq!(seek_media(&mut state, &transport, 120.5), 120.5);
        assert_eq!(seek_media(&mut state, &transport, 999.0), 300.0);
        assert_eq!(state.progress(), 300.0);
        assert_eq!(
            *transport.calls.borrow(),
            vec![Call::Seek(120.5), Call::Seek(300.0)]
        );
    }

    #[test]
    fn finishing_the_last_episode_clears_and_pauses() {
        let transport = RecordingTransport::default();
        let mut state = PlayerState::default();
        state.play(episode("a", 300));

        assert_eq!(finish_media(&mut state, &transport), EndedOutcome::Cleared);
        assert!(state.current_episode().is_none());
        assert_eq!(*transport.calls.borrow(), vec![Call::Pause]);
    }

    #[test]
    fn finishing_with_loop_rewinds_the_element() {
        let transport = RecordingTransport::default();
        let mut state = PlayerState::default();
        state.play(episode("a", 300));
        state.toggle_loop();
        state.set_progress(299.0);

        assert_eq!(finish_media(&mut state, &transport), EndedOutcome::Replayed);
        assert_eq!(state.progress(), 0.0);
        assert_eq!(
            *transport.calls.borrow(),
            vec![Call::Seek(0.0), Call::Play]
        );
    }

    #[test]
    fn positions_wait_for_metadata() {
        let mut gate = PositionGate::default();
        let mut state = PlayerState::default();
        state.play(episode("a", 300));
        state.set_progress(80.0);
        assert!(!gate.accepts_positions());

        gate.metadata_loaded(&mut state);
        assert!(gate.accepts_positions());
        assert_eq!(state.progress(), 0.0);

        gate.source_changed();
        assert!(!gate.accepts_positions());
    }
}
