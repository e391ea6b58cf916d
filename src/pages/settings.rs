use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::components::api_key_form::ApiKeyForm;
use crate::theme::{use_theme, Theme};

#[component]
pub fn SettingsPage() -> impl IntoView {
    let theme = use_theme();
    let (service_url, set_service_url) = signal(String::new());
    let (url_status, set_url_status) = signal::<Option<String>>(None);
    let (chat_mode, set_chat_mode) = signal(String::from("service"));
    let (mode_status, set_mode_status) = signal::<Option<String>>(None);

    // Load saved preferences on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::get_preference("service_url").await {
                Ok(Some(url)) => set_service_url.set(url),
                Ok(None) => set_service_url.set("http://127.0.0.1:5000".to_string()),
                Err(e) => set_url_status.set(Some(format!("Failed to load preference: {}", e))),
            }
            match commands::get_preference("chat_mode").await {
                Ok(Some(mode)) => set_chat_mode.set(mode),
                Ok(None) => {}
                Err(e) => set_mode_status.set(Some(format!("Failed to load preference: {}", e))),
            }
        });
    });

    let save_service_url = move |_| {
        let url = service_url.get().trim().to_string();
        spawn_local(async move {
            match commands::set_preference("service_url", &url).await {
                Ok(()) => set_url_status.set(Some("Service URL saved".to_string())),
                Err(e) => set_url_status.set(Some(format!("Failed to save: {}", e))),
            }
        });
    };

    let on_mode_change = move |ev: web_sys::Event| {
        let mode = event_target_value(&ev);
        set_chat_mode.set(mode.clone());
        spawn_local(async move {
            match commands::set_preference("chat_mode", &mode).await {
                Ok(()) => set_mode_status.set(None),
                Err(e) => set_mode_status.set(Some(format!("Failed to save: {}", e))),
            }
        });
    };

    let on_theme_change = move |ev: web_sys::Event| {
        let choice = Theme::parse(&event_target_value(&ev));
        theme.set_theme.set(choice);
        spawn_local(async move {
            if let Err(e) = commands::set_preference("theme", choice.as_str()).await {
                web_sys::console::error_1(&format!("Failed to save theme: {}", e).into());
            }
        });
    };

    view! {
        <div class="page settings-page">
            <h2>"Settings"</h2>

            <section class="settings-section">
                <h3>"Detection Service"</h3>
                <p class="section-description">
                    "Base URL of the service that serves /detect and /chat."
                </p>

                <div class="form-group">
                    <label for="service-url">"Service URL"</label>
                    <div class="input-row">
                        <input
                            id="service-url"
                            type="text"
                            placeholder="http://127.0.0.1:5000"
                            class="input"
                            prop:value=move || service_url.get()
                            on:input=move |ev| set_service_url.set(event_target_value(&ev))
                        />
                        <button class="btn btn-save" on:click=save_service_url>"Save"</button>
                    </div>
                    <Show when=move || url_status.get().is_some()>
                        <span class="status-text">{move || url_status.get().unwrap_or_default()}</span>
                    </Show>
                </div>

                <div class="form-group">
                    <label for="chat-mode">"Chat Backend"</label>
                    <select
                        id="chat-mode"
                        class="input"
                        prop:value=move || chat_mode.get()
                        on:change=on_mode_change
                    >
                        <option value="service">"Detection service (/chat)"</option>
                        <option value="direct">"Call model providers directly"</option>
                    </select>
                    <Show when=move || mode_status.get().is_some()>
                        <span class="status-text status-error">{move || mode_status.get().unwrap_or_default()}</span>
                    </Show>
                </div>
            </section>

            <section class="settings-section">
                <h3>"Model Provider Keys"</h3>
                <p class="section-description">
                    "Used when the chat backend calls providers directly. Keys are stored in the OS keychain."
                </p>

                <ApiKeyForm
                    provider_name="OpenAI API Key"
                    service_id="dentai-openai-api"
                    env_var="OPENAI_KEY"
                    placeholder="sk-..."
                />
                <ApiKeyForm
                    provider_name="Gemini API Key"
                    service_id="dentai-gemini-api"
                    env_var="GEMINI_KEY"
                    placeholder="AIza..."
                />
                <ApiKeyForm
                    provider_name="Groq API Key"
                    service_id="dentai-groq-api"
                    env_var="GROQ_KEY"
                    placeholder="gsk_..."
                />
                <ApiKeyForm
                    provider_name="Claude API Key"
                    service_id="dentai-claude-api"
                    env_var="CLAUDE_KEY"
                    placeholder="sk-ant-..."
                />
            </section>

            <section class="settings-section">
                <h3>"Appearance"</h3>
                <div class="form-group">
                    <label for="theme">"Theme"</label>
                    <select
                        id="theme"
                        class="input"
                        prop:value=move || theme.theme.get().as_str()
                        on:change=on_theme_change
                    >
                        <option value="system">"System"</option>
                        <option value="light">"Light"</option>
                        <option value="dark">"Dark"</option>
                    </select>
                </div>
            </section>
        </div>
    }
}
