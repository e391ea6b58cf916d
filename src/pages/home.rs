use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="page home-page">
            <h2>"Welcome to DentAI Scan"</h2>
            <p class="page-description">
                "Locate wisdom teeth on dental X-rays and discuss the findings with four AI models at once."
            </p>

            <div class="card-grid">
                <div class="card">
                    <h3>"Analyze an X-ray"</h3>
                    <p>"Upload an image and see every detected tooth outlined with its confidence"</p>
                    <a href="/detector" class="btn btn-primary">"Open Detector"</a>
                </div>
                <div class="card">
                    <h3>"Configure"</h3>
                    <p>"Point the app at your detection service or add provider API keys"</p>
                    <a href="/settings" class="btn btn-primary">"Settings"</a>
                </div>
                <div class="card">
                    <h3>"Check Connectivity"</h3>
                    <p>"Confirm the detector and chat backends are reachable"</p>
                    <a href="/health" class="btn btn-primary">"Health Check"</a>
                </div>
            </div>

            <div class="how-it-works">
                <h3>"How It Works"</h3>
                <div class="steps">
                    <div class="step">
                        <span class="step-number">"1"</span>
                        <div class="step-content">
                            <strong>"Upload"</strong>
                            <p>"Drop a panoramic X-ray onto the detector page"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"2"</span>
                        <div class="step-content">
                            <strong>"Detect"</strong>
                            <p>"An object detection model marks each tooth it finds"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"3"</span>
                        <div class="step-content">
                            <strong>"Ask"</strong>
                            <p>"Questions about the scan carry the detection summary to GPT-4o, Gemini, Llama 3 and Claude"</p>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
