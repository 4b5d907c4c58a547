//! Routes of the application; every page renders inside the app shell.

use crate::components::views::{EpisodeView, HomeView, SettingsView};
use crate::components::AppShell;
use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum AppView {
    #[layout(AppShell)]
        #[route("/")]
        HomeView {},
        #[route("/episodes/:id")]
        EpisodeView { id: String },
        #[route("/settings")]
        SettingsView {},
}

pub fn view_label(view: &AppView) -> &'static str {
    match view {
        AppView::HomeView {} => "Home",
        AppView::EpisodeView { .. } => "Episode",
        AppView::SettingsView {} => "Settings",
    }
}
