use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::components::chat_panel::ChatPanel;
use crate::components::sidebar::Sidebar;
use crate::pages::detector::DetectorPage;
use crate::pages::health::HealthPage;
use crate::pages::home::HomePage;
use crate::pages::settings::SettingsPage;
use crate::state::SessionContext;
use crate::theme::{apply_theme, Theme, ThemeContext};

#[component]
pub fn App() -> impl IntoView {
    let (theme, set_theme) = signal(Theme::System);
    provide_context(ThemeContext { theme, set_theme });

    // Shared by the detector page and the chat panel; survives navigation.
    provide_context(SessionContext::new());

    // Load saved theme preference on mount
    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(Some(saved)) = commands::get_preference("theme").await {
                set_theme.set(Theme::parse(&saved));
            }
        });
    });

    Effect::new(move |_| apply_theme(theme.get()));

    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/detector") view=DetectorPage />
                        <Route path=path!("/settings") view=SettingsPage />
                        <Route path=path!("/health") view=HealthPage />
                    </Routes>
                </main>
                <ChatPanel />
            </div>
        </Router>
    }
}
