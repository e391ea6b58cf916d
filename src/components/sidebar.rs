use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <h1 class="sidebar-title">"DentAI Scan"</h1>
                <p class="sidebar-subtitle">"Wisdom Tooth Detection"</p>
            </div>
            <ul class="nav-list">
                <li class="nav-item">
                    <a href="/" class="nav-link">"Home"</a>
                </li>
                <li class="nav-item">
                    <a href="/detector" class="nav-link">"Detector"</a>
                </li>
                <li class="nav-item">
                    <a href="/settings" class="nav-link">"Settings"</a>
                </li>
                <li class="nav-item">
                    <a href="/health" class="nav-link">"Health Check"</a>
                </li>
            </ul>
        </nav>
    }
}
