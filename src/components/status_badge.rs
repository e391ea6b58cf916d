use leptos::prelude::*;

/// Outcome of one health check row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
    /// Not applicable in the current configuration.
    Skipped,
}

impl CheckStatus {
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        }
    }
}

#[component]
pub fn StatusBadge(
    /// Row label, e.g. "Detector Endpoint"
    #[prop(into)]
    label: String,
    status: CheckStatus,
    /// Optional detail text, e.g. the probed URL
    #[prop(optional, into)]
    detail: Option<String>,
) -> impl IntoView {
    let (icon, class) = match status {
        CheckStatus::Pass => ("\u{2713}", "status-badge status-pass"),
        CheckStatus::Fail => ("\u{2717}", "status-badge status-fail"),
        CheckStatus::Skipped => ("-", "status-badge status-unknown"),
    };

    view! {
        <div class="health-item">
            <span class=class>{icon}</span>
            <span class="health-name">{label}</span>
            <span class="health-detail">{detail.unwrap_or_default()}</span>
        </div>
    }
}
