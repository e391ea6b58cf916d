use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::session::{Outbound, SessionController, Trigger};

/// App-wide handle to the session, provided once at the root.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub session: RwSignal<SessionController>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(SessionController::new()),
        }
    }

    /// Apply a trigger and run whatever backend call it asks for.
    pub fn dispatch(self, trigger: Trigger) {
        if let Some(outbound) = self.session.try_update(|s| s.dispatch(trigger)).flatten() {
            self.perform(outbound);
        }
    }

    fn perform(self, outbound: Outbound) {
        match outbound {
            Outbound::Detect {
                ticket,
                image_base64,
                file_name,
            } => spawn_local(async move {
                let outcome = commands::detect_image(image_base64, file_name).await;
                self.dispatch(Trigger::DetectCompleted { ticket, outcome });
            }),
            Outbound::Chat { prompt } => spawn_local(async move {
                if prompt.context_attached {
                    web_sys::console::log_1(&"Chat prompt carries detection context".into());
                }
                let outcome = commands::send_chat(&prompt.text).await;
                self.dispatch(Trigger::ChatCompleted(outcome));
            }),
        }
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
