use crate::api::FeedClient;
use crate::components::Icon;
use crate::db::{save_settings, AppSettings, DEFAULT_EPISODE_LIMIT};
use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

#[component]
pub fn SettingsView() -> Element {
    let mut app_settings = use_context::<Signal<AppSettings>>();

    let mut feed_url = use_signal(|| app_settings.peek().feed_url.clone());
    let mut episode_limit = use_signal(|| app_settings.peek().episode_limit.to_string());
    let mut is_testing = use_signal(|| false);
    let mut test_result = use_signal(|| None::<Result<usize, String>>);
    let mut save_status = use_signal(|| None::<String>);

    let draft = move || AppSettings {
        feed_url: feed_url(),
        episode_limit: episode_limit()
            .trim()
            .parse()
            .unwrap_or(DEFAULT_EPISODE_LIMIT),
    }
    .normalized();

    let on_test = move |_| {
        if is_testing() {
            return;
        }
        let settings = draft();
        is_testing.set(true);
        test_result.set(None);

        spawn(async move {
            let result = FeedClient::from_settings(&settings)
                .latest_episodes(1)
                .await
                .map(|episodes| episodes.len())
                .map_err(|e| e.to_string());
            test_result.set(Some(result));
            is_testing.set(false);
        });
    };

    let on_save = move |_| {
        let settings = draft();
        feed_url.set(settings.feed_url.clone());
        episode_limit.set(settings.episode_limit.to_string());
        app_settings.set(settings.clone());

        spawn(async move {
            match save_settings(settings).await {
                Ok(()) => {
                    info!("settings saved");
                    save_status.set(Some("Settings saved".to_string()));
                }
                Err(e) => {
                    warn!("failed to save settings: {e}");
                    save_status.set(Some(format!("Could not save settings: {e}")));
                }
            }
        });
    };

    rsx! {
        div { class: "settings-page",
            h1 { "Settings" }
            section { class: "settings-card",
                h2 { "Episode feed" }
                label { r#for: "feed-url", "Feed URL" }
                input {
                    id: "feed-url",
                    r#type: "url",
                    value: "{feed_url}",
                    placeholder: "http://localhost:3333",
                    oninput: move |e| feed_url.set(e.value()),
                }
                label { r#for: "episode-limit", "Episodes to load" }
                input {
                    id: "episode-limit",
                    r#type: "number",
                    min: "1",
                    max: "100",
                    value: "{episode_limit}",
                    oninput: move |e| episode_limit.set(e.value()),
                }
                div { class: "settings-actions",
                    button {
                        r#type: "button",
                        class: "secondary-btn",
                        disabled: is_testing(),
                        onclick: on_test,
                        if is_testing() {
                            Icon { name: "loader".to_string(), class: "icon-sm".to_string() }
                        }
                        "Test feed"
                    }
                    button {
                        r#type: "button",
                        class: "primary-btn",
                        onclick: on_save,
                        "Save"
                    }
                }
                {
                    match test_result() {
                        Some(Ok(count)) => rsx! {
                            p { class: "status-line", "Feed reachable, {count} episode(s) returned" }
                        },
                        Some(Err(message)) => rsx! {
                            p { class: "status-line error", "{message}" }
                        },
                        None => rsx! {},
                    }
                }
                if let Some(status) = save_status() {
                    p { class: "status-line", "{status}" }
                }
            }
        }
    }
}
