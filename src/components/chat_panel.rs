//! Floating chat panel. Every question goes to all four models at once and
//! their answers come back as one grid.

use leptos::html::Div;
use leptos::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::commands::ModelReplies;
use crate::session::{ChatMessage, Sender, Trigger};
use crate::state::use_session;

/// Display order and titles of the model cards.
const MODEL_CARDS: [(&str, &str); 4] = [
    ("gpt4", "GPT-4o"),
    ("gemini", "Gemini 1.5"),
    ("llama", "Llama 3 (Groq)"),
    ("claude", "Claude 3.5"),
];

fn reply_for<'a>(replies: &'a ModelReplies, id: &str) -> Option<&'a str> {
    match id {
        "gpt4" => replies.gpt4.as_deref(),
        "gemini" => replies.gemini.as_deref(),
        "llama" => replies.llama.as_deref(),
        "claude" => replies.claude.as_deref(),
        _ => None,
    }
}

/// Card body for one model. A model that did not answer gets an empty card.
fn answer_text(replies: &ModelReplies, id: &str) -> String {
    reply_for(replies, id).unwrap_or_default().to_string()
}

#[component]
pub fn ChatPanel() -> impl IntoView {
    let ctx = use_session();
    let (open, set_open) = signal(false);
    let (draft, set_draft) = signal(String::new());
    let bottom_ref = NodeRef::<Div>::new();

    let submit = move || {
        let text = draft.get_untracked();
        set_draft.set(String::new());
        ctx.dispatch(Trigger::ChatSubmitted(text));
    };

    // Keep the newest message in view.
    Effect::new(move |_| {
        ctx.session.with(|s| (s.messages().len(), s.pending_chats()));
        if let Some(el) = bottom_ref.get() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    view! {
        <div class="chat-widget">
            <style>{include_str!("chat_panel.css")}</style>

            <Show when=move || open.get()>
                <div class="chat-window">
                    <div class="chat-header">
                        <span>"Dental Assistant"</span>
                        <button class="chat-close" on:click=move |_| set_open.set(false)>"x"</button>
                    </div>

                    <div class="chat-messages">
                        {move || {
                            ctx.session.with(|s| {
                                s.messages().iter().map(render_message).collect::<Vec<_>>()
                            })
                        }}
                        <Show when=move || ctx.session.with(|s| s.pending_chats() > 0)>
                            <div class="chat-typing">"Consulting 4 AI models simultaneously..."</div>
                        </Show>
                        <div node_ref=bottom_ref></div>
                    </div>

                    <div class="chat-input-row">
                        <input
                            type="text"
                            class="input chat-input"
                            placeholder="Ask about the scan..."
                            prop:value=move || draft.get()
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    submit();
                                }
                            }
                        />
                        <button class="btn btn-primary" on:click=move |_| submit()>"Send"</button>
                    </div>
                </div>
            </Show>

            <button class="chat-toggle" on:click=move |_| set_open.update(|o| *o = !*o)>
                {move || if open.get() { "Close" } else { "Ask AI" }}
            </button>
        </div>
    }
}

fn render_message(message: &ChatMessage) -> AnyView {
    match message {
        ChatMessage::Text { sender, body } => {
            let class = match sender {
                Sender::User => "chat-message chat-user",
                Sender::Bot => "chat-message chat-bot",
            };
            view! { <div class=class>{body.clone()}</div> }.into_any()
        }
        ChatMessage::MultiReply(replies) => {
            let cards = MODEL_CARDS
                .iter()
                .map(|(id, title)| {
                    let answer = answer_text(replies, id);
                    view! {
                        <div class=format!("model-card model-{}", id)>
                            <div class="model-title">{*title}</div>
                            <div class="model-answer">{answer}</div>
                        </div>
                    }
                })
                .collect::<Vec<_>>();
            view! { <div class="chat-message chat-multi">{cards}</div> }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replies() -> ModelReplies {
        ModelReplies {
            gpt4: Some("Two impacted molars.".to_string()),
            gemini: Some("Looks routine.".to_string()),
            llama: None,
            claude: Some("See a surgeon.".to_string()),
        }
    }

    #[test]
    fn test_reply_for_each_card() {
        let full = ModelReplies {
            llama: Some("Hi".to_string()),
            ..replies()
        };
        for (id, _) in MODEL_CARDS {
            assert!(reply_for(&full, id).is_some(), "missing reply for {}", id);
        }
        assert_eq!(reply_for(&full, "gpt4"), Some("Two impacted molars."));
        assert_eq!(reply_for(&full, "unknown"), None);
    }

    #[test]
    fn test_missing_answer_renders_empty_card() {
        let replies = replies();
        assert_eq!(reply_for(&replies, "llama"), None);
        assert_eq!(answer_text(&replies, "llama"), "");
        assert_eq!(answer_text(&replies, "claude"), "See a surgeon.");
    }

    #[test]
    fn test_all_missing_answers_are_empty() {
        let none = ModelReplies::default();
        for (id, _) in MODEL_CARDS {
            assert_eq!(answer_text(&none, id), "");
        }
    }
}
