use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands;

/// Keychain-backed key entry for one model provider.
#[component]
pub fn ApiKeyForm(
    /// Display name, e.g. "Gemini API Key"
    #[prop(into)]
    provider_name: String,
    /// Keyring service identifier, e.g. "dentai-gemini-api"
    #[prop(into)]
    service_id: String,
    /// Environment variable read when no key is stored
    #[prop(into)]
    env_var: String,
    #[prop(into)]
    placeholder: String,
) -> impl IntoView {
    let (key_value, set_key_value) = signal(String::new());
    let (is_saved, set_is_saved) = signal(false);
    let (is_busy, set_is_busy) = signal(false);
    let (error_message, set_error_message) = signal::<Option<String>>(None);

    let sid_check = service_id.clone();
    Effect::new(move |_| {
        let sid = sid_check.clone();
        spawn_local(async move {
            match commands::get_api_key(&sid).await {
                Ok(stored) => set_is_saved.set(stored.is_some()),
                Err(e) => set_error_message.set(Some(format!("Failed to check key: {}", e))),
            }
        });
    });

    let sid_save = service_id.clone();
    let save_key = move |_| {
        let sid = sid_save.clone();
        let key = key_value.get().trim().to_string();
        if key.is_empty() {
            set_error_message.set(Some("Please enter an API key".to_string()));
            return;
        }
        set_is_busy.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match commands::set_api_key(&sid, &key).await {
                Ok(()) => {
                    set_is_saved.set(true);
                    set_key_value.set(String::new());
                }
                Err(e) => set_error_message.set(Some(format!("Failed to save: {}", e))),
            }
            set_is_busy.set(false);
        });
    };

    let sid_delete = service_id.clone();
    let delete_key = move |_| {
        let sid = sid_delete.clone();
        set_is_busy.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match commands::delete_api_key(&sid).await {
                Ok(()) => set_is_saved.set(false),
                Err(e) => set_error_message.set(Some(format!("Failed to delete: {}", e))),
            }
            set_is_busy.set(false);
        });
    };

    let fallback_hint = format!("Not stored. Falls back to ${} if set.", env_var);

    view! {
        <div class="form-group api-key-form">
            <label>{provider_name}</label>
            <div class="input-row">
                <input
                    type="password"
                    placeholder=placeholder
                    class="input input-password"
                    prop:value=move || key_value.get()
                    on:input=move |ev| set_key_value.set(event_target_value(&ev))
                    disabled=move || is_busy.get()
                />
                <button class="btn btn-save" on:click=save_key disabled=move || is_busy.get()>
                    {move || if is_busy.get() { "Saving..." } else { "Save" }}
                </button>
                <Show when=move || is_saved.get()>
                    <button class="btn btn-delete" on:click=delete_key.clone() disabled=move || is_busy.get()>
                        "Delete"
                    </button>
                </Show>
            </div>
            <div class="key-status-row">
                {move || {
                    if let Some(err) = error_message.get() {
                        view! { <span class="status-text status-error">{err}</span> }.into_any()
                    } else if is_saved.get() {
                        view! { <span class="status-text status-saved">"Saved to Keychain"</span> }.into_any()
                    } else {
                        let hint = fallback_hint.clone();
                        view! { <span class="status-text status-not-set">{hint}</span> }.into_any()
                    }
                }}
            </div>
        </div>
    }
}
