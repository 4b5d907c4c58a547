//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod audio_manager;
mod header;
mod icons;
mod playback;
mod player;
pub mod views;

pub use app::*;
pub use app_view::*;
pub use audio_manager::*;
pub use header::*;
pub use icons::*;
pub use playback::*;
pub use player::*;
// Views are accessed via views::ViewName
