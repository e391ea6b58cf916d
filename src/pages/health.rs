use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, HealthReport};
use crate::components::status_badge::{CheckStatus, StatusBadge};

fn key_detail(set: bool) -> &'static str {
    if set {
        "Configured"
    } else {
        "Not configured"
    }
}

/// Rows shown for a report, with the provider keys only checked in direct
/// mode and the chat endpoint only in service mode.
fn checks(r: &HealthReport) -> Vec<(&'static str, CheckStatus, String)> {
    let direct = r.chat_mode.as_deref() == Some("direct");
    let url_detail = match (&r.service_url, &r.service_url_error) {
        (_, Some(err)) => err.clone(),
        (Some(url), None) => url.clone(),
        (None, None) => "Not set".to_string(),
    };
    let reach = |ok: bool| (if ok { "Reachable" } else { "Unreachable" }).to_string();
    let key = |set: bool| {
        if direct {
            CheckStatus::from_bool(set)
        } else {
            CheckStatus::Skipped
        }
    };

    vec![
        (
            "Service URL",
            CheckStatus::from_bool(r.service_url_error.is_none() && r.service_url.is_some()),
            url_detail,
        ),
        (
            "Detector Endpoint",
            CheckStatus::from_bool(r.detector_reachable),
            reach(r.detector_reachable),
        ),
        (
            "Chat Endpoint",
            if direct {
                CheckStatus::Skipped
            } else {
                CheckStatus::from_bool(r.chat_reachable)
            },
            reach(r.chat_reachable),
        ),
        ("OpenAI API Key", key(r.openai_api_key_set), key_detail(r.openai_api_key_set).to_string()),
        ("Gemini API Key", key(r.gemini_api_key_set), key_detail(r.gemini_api_key_set).to_string()),
        ("Groq API Key", key(r.groq_api_key_set), key_detail(r.groq_api_key_set).to_string()),
        ("Claude API Key", key(r.claude_api_key_set), key_detail(r.claude_api_key_set).to_string()),
    ]
}

#[component]
pub fn HealthPage() -> impl IntoView {
    let (checking, set_checking) = signal(false);
    let (report, set_report) = signal::<Option<HealthReport>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let do_health_check = move || {
        set_checking.set(true);
        set_error.set(None);
        spawn_local(async move {
            match commands::run_health_check().await {
                Ok(r) => set_report.set(Some(r)),
                Err(e) => set_error.set(Some(format!("Health check failed: {}", e))),
            }
            set_checking.set(false);
        });
    };

    // Auto-run on mount
    Effect::new(move |_| do_health_check());

    view! {
        <div class="page health-page">
            <h2>"Health Check"</h2>
            <p class="page-description">
                "Verify that DentAI Scan can reach the detection service and the chat models."
            </p>

            <button
                class="btn btn-primary"
                on:click=move |_| do_health_check()
                disabled=move || checking.get()
            >
                {move || if checking.get() { "Checking..." } else { "Run Health Check" }}
            </button>

            {move || error.get().map(|e| view! {
                <div class="health-error">
                    <span class="status-text status-error">{e}</span>
                </div>
            })}

            {move || report.get().map(|r| {
                let rows = checks(&r);
                let applicable = rows.iter().filter(|(_, s, _)| *s != CheckStatus::Skipped).count();
                let passed = rows.iter().filter(|(_, s, _)| *s == CheckStatus::Pass).count();
                let summary_class = if passed == applicable {
                    "summary-all-pass"
                } else if passed == 0 {
                    "summary-all-fail"
                } else {
                    "summary-partial"
                };
                let mode = r.chat_mode.clone().unwrap_or_else(|| "unknown".to_string());

                view! {
                    <div class="health-results">
                        {rows.into_iter().map(|(label, status, detail)| view! {
                            <StatusBadge label=label status=status detail=detail />
                        }).collect::<Vec<_>>()}

                        <p class="health-mode">{format!("Chat mode: {}", mode)}</p>
                        <div class=format!("health-summary {}", summary_class)>
                            {format!("{} of {} checks passed", passed, applicable)}
                        </div>
                    </div>
                }
            })}
        </div>
    }
}
