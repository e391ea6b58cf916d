use leptos::prelude::*;

use crate::state::use_session;

fn count_label(count: usize) -> String {
    match count {
        1 => "1 Tooth Found".to_string(),
        n => format!("{} Teeth Found", n),
    }
}

#[component]
pub fn DetectionLog() -> impl IntoView {
    let ctx = use_session();
    let entries = Memo::new(move |_| ctx.session.with(|s| s.log().to_vec()));

    view! {
        <div class="detection-log">
            <style>{include_str!("detection_log.css")}</style>
            <h4 class="log-title">"Detection Log"</h4>

            {move || {
                let entries = entries.get();
                if entries.is_empty() {
                    view! { <p class="log-empty">"No analyses yet."</p> }.into_any()
                } else {
                    view! {
                        <div class="log-list">
                            {entries.into_iter().map(|entry| view! {
                                <div class="log-item">
                                    <div class="log-item-info">
                                        <span class="log-name">{entry.image_name}</span>
                                        <span class="log-time">{entry.analyzed_at}</span>
                                    </div>
                                    <span class="log-count">{count_label(entry.count)}</span>
                                </div>
                            }).collect::<Vec<_>>()}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
