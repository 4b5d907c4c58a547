//! Playback context: the episode list, the current selection and the transport flags.
//! `PlayerState` holds the rules; `PlayerController` shares it through a signal.

use crate::api::Episode;
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use rand::Rng;

/// What the context did in response to the end of the current media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndedOutcome {
    /// Loop is on; the same episode starts over.
    Replayed,
    /// Moved to the next episode and kept playing.
    Advanced,
    /// Nothing left to play; the selection was cleared.
    Cleared,
}

/// Invariant: `current_index` is `Some(i)` with `i < episodes.len()`, or the
/// list is empty and nothing is selected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerState {
    episodes: Vec<Episode>,
    current_index: Option<usize>,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
    progress: f64,
}

impl PlayerState {
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.current_index.and_then(|idx| self.episodes.get(idx))
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    /// Seconds elapsed in the current episode.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// With shuffle on any other episode counts as "next".
    pub fn has_next(&self) -> bool {
        let len = self.episodes.len();
        match self.current_index {
            Some(idx) if len > 1 => self.is_shuffling || idx + 1 < len,
            _ => false,
        }
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.current_index, Some(idx) if idx > 0)
    }

    /// Replaces the list with a single episode and starts it.
    pub fn play(&mut self, episode: Episode) {
        self.play_list(vec![episode], 0);
    }

    /// Replaces the list and starts at `index`, clamped into the list.
    pub fn play_list(&mut self, episodes: Vec<Episode>, index: usize) {
        if episodes.is_empty() {
            self.clear();
            return;
        }
        let index = index.min(episodes.len() - 1);
        let previous_url = self.current_url().map(str::to_owned);
        self.episodes = episodes;
        self.select(index, previous_url);
        self.is_playing = true;
    }

    pub fn toggle_play(&mut self) {
        self.set_playing_state(!self.is_playing);
    }

    /// Playing requires a selected episode.
    pub fn set_playing_state(&mut self, playing: bool) {
        self.is_playing = self.resolve_playing(playing);
    }

    /// Whether `set_playing_state(playing)` would change anything.
    pub fn playing_state_changes(&self, playing: bool) -> bool {
        self.resolve_playing(playing) != self.is_playing
    }

    fn resolve_playing(&self, playing: bool) -> bool {
        playing && self.current_index.is_some()
    }

    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
    }

    pub fn toggle_shuffle(&mut self) {
        self.is_shuffling = !self.is_shuffling;
    }

    pub fn play_next(&mut self) -> bool {
        self.play_next_with(&mut rand::thread_rng())
    }

    /// Returns whether the selection moved.
    pub fn play_next_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.has_next() {
            return false;
        }
        let Some(idx) = self.current_index else {
            return false;
        };
        let len = self.episodes.len();
        let next = if self.is_shuffling {
            // Offset in 1..len never lands back on the current index.
            (idx + rng.gen_range(1..len)) % len
        } else {
            idx + 1
        };
        let previous_url = self.current_url().map(str::to_owned);
        self.select(next, previous_url);
        true
    }

    pub fn play_previous(&mut self) -> bool {
        match self.current_index {
            Some(idx) if idx > 0 => {
                let previous_url = self.current_url().map(str::to_owned);
                self.select(idx - 1, previous_url);
                true
            }
            _ => false,
        }
    }

    /// Drops the list and the selection; playback stops.
    pub fn clear(&mut self) {
        self.episodes.clear();
        self.current_index = None;
        self.is_playing = false;
        self.progress = 0.0;
    }

    pub fn reset_progress(&mut self) {
        self.progress = 0.0;
    }

    pub fn set_progress(&mut self, seconds: f64) {
        if seconds.is_finite() {
            self.progress = seconds.max(0.0);
        }
    }

    /// Moves the displayed position. Values inside `[0, duration]` are kept
    /// exactly; anything else is clamped. An episode the feed published
    /// without a duration stays at 0. Returns the stored position.
    pub fn seek(&mut self, seconds: f64) -> f64 {
        let Some(episode) = self.current_episode() else {
            return self.progress;
        };
        let duration = f64::from(episode.duration);
        let target = if seconds.is_nan() {
            0.0
        } else {
            seconds.clamp(0.0, duration)
        };
        self.progress = target;
        target
    }

    pub fn handle_media_ended(&mut self) -> EndedOutcome {
        self.handle_media_ended_with(&mut rand::thread_rng())
    }

    pub fn handle_media_ended_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EndedOutcome {
        if self.is_looping && self.current_index.is_some() {
            self.progress = 0.0;
            self.is_playing = true;
            return EndedOutcome::Replayed;
        }
        if self.play_next_with(rng) {
            self.is_playing = true;
            return EndedOutcome::Advanced;
        }
        self.clear();
        EndedOutcome::Cleared
    }

    fn current_url(&self) -> Option<&str> {
        self.current_episode().map(|e| e.url.as_str())
    }

    /// The element keeps its position while the source stays the same.
    fn select(&mut self, index: usize, previous_url: Option<String>) {
        self.current_index = Some(index);
        if self.current_url() != previous_url.as_deref() {
            self.progress = 0.0;
        }
    }
}

/// Shared handle to the playback context, provided at the app shell.
#[derive(Clone, Copy, PartialEq)]
pub struct PlayerController {
    state: Signal<PlayerState>,
}

impl PlayerController {
    pub fn new(state: Signal<PlayerState>) -> Self {
        Self { state }
    }

    /// Subscribes the caller to every change.
    pub fn current(&self) -> PlayerState {
        (self.state)()
    }

    /// Borrows the state for a derived value; subscribes like `current`.
    pub fn read_with<R>(&self, f: impl FnOnce(&PlayerState) -> R) -> R {
        f(&self.state.read())
    }

    pub fn is_playing(&self) -> bool {
        self.read_with(PlayerState::is_playing)
    }

    pub fn is_looping(&self) -> bool {
        self.read_with(PlayerState::is_looping)
    }

    pub fn current_episode_url(&self) -> Option<String> {
        self.read_with(|state| state.current_episode().map(|e| e.url.clone()))
    }

    pub fn play(&self, episode: Episode) {
        debug!(episode = %episode.id, "play episode");
        self.update(|state| state.play(episode));
    }

    pub fn play_list(&self, episodes: Vec<Episode>, index: usize) {
        debug!(len = episodes.len(), index, "play list");
        self.update(|state| state.play_list(episodes, index));
    }

    pub fn toggle_play(&self) {
        self.update(PlayerState::toggle_play);
    }

    /// Element play/pause notifications land here; echoes of the current
    /// value skip the write.
    pub fn set_playing_state(&self, playing: bool) {
        if !self.state.peek().playing_state_changes(playing) {
            return;
        }
        self.update(|state| state.set_playing_state(playing));
    }

    pub fn toggle_loop(&self) {
        self.update(PlayerState::toggle_loop);
    }

    pub fn toggle_shuffle(&self) {
        self.update(PlayerState::toggle_shuffle);
    }

    pub fn play_next(&self) {
        self.update(|state| {
            state.play_next();
        });
    }

    pub fn play_previous(&self) {
        self.update(|state| {
            state.play_previous();
        });
    }

    pub fn reset_progress(&self) {
        self.update(PlayerState::reset_progress);
    }

    pub fn set_progress(&self, seconds: f64) {
        self.update(|state| state.set_progress(seconds));
    }

    /// Runs `f` against the state as a single write.
    pub fn update<R>(&self, f: impl FnOnce(&mut PlayerState) -> R) -> R {
        let mut state = self.state;
        state.with_mut(f)
    }
}
