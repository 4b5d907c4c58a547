use crate::components::{view_label, AppView, Header, Player, PlayerController, PlayerState};
use crate::db::{initialize_database, load_settings, AppSettings};
use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

#[component]
pub fn AppShell() -> Element {
    let mut app_settings = use_signal(AppSettings::default);
    let mut settings_loaded = use_signal(|| false);
    let player_state = use_signal(PlayerState::default);
    let player = PlayerController::new(player_state);

    // Provide state via context
    use_context_provider(|| app_settings);
    use_context_provider(|| player);

    // Initialize storage and load saved settings on mount
    use_effect(move || {
        spawn(async move {
            if let Err(e) = initialize_database().await {
                warn!("failed to initialize settings storage: {e}");
            }
            match load_settings().await {
                Ok(settings) => {
                    info!(feed_url = %settings.feed_url, "settings loaded");
                    app_settings.set(settings);
                }
                Err(e) => warn!("failed to load settings, using defaults: {e}"),
            }
            settings_loaded.set(true);
        });
    });

    let view = use_route::<AppView>();

    rsx! {
        document::Title { "{view_label(&view)} | Podplayer" }
        div { class: "app-wrapper",
            main { class: "app-main",
                Header {}
                div { class: "page-shell",
                    if settings_loaded() {
                        Outlet::<AppView> {}
                    }
                }
            }

            // Player panel
            Player {}
        }
    }
}
