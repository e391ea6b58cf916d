//! Detector page: upload a dental X-ray, run detection, see the boxes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::components::detection_canvas::DetectionCanvas;
use crate::components::detection_log::DetectionLog;
use crate::session::{SelectedImage, Trigger};
use crate::state::use_session;

#[component]
pub fn DetectorPage() -> impl IntoView {
    let ctx = use_session();

    let has_image = move || ctx.session.with(|s| s.image().is_some());
    let analyzing = move || ctx.session.with(|s| s.is_analyzing());
    let notice = move || ctx.session.with(|s| s.notice().map(str::to_string));
    let summary = move || {
        ctx.session.with(|s| {
            let snippet = s.context_snippet();
            (!snippet.is_empty()).then_some(snippet)
        })
    };

    let on_analyze = move |_| ctx.dispatch(Trigger::AnalyzeRequested);

    view! {
        <div class="page detector-page">
            <style>{include_str!("detector.css")}</style>

            <h2>"Wisdom Tooth Detector"</h2>
            <p class="page-description">
                "Upload a panoramic X-ray to locate wisdom teeth, then ask the assistant about the result."
            </p>

            <div class="detector-layout">
                <div class="detector-controls">
                    <PhotoDropZone />

                    <div class="action-buttons">
                        <button
                            class="btn btn-primary"
                            on:click=on_analyze
                            disabled=move || !has_image() || analyzing()
                        >
                            {move || if analyzing() { "Analyzing..." } else { "Analyze Image" }}
                        </button>
                    </div>

                    {move || notice().map(|msg| view! {
                        <div class="detector-notice">{msg}</div>
                    })}

                    {move || summary().map(|text| view! {
                        <p class="detector-summary">{text}</p>
                    })}

                    <DetectionLog />
                </div>

                <div class="detector-preview">
                    <Show
                        when=has_image
                        fallback=|| view! { <p class="preview-empty">"No image selected."</p> }
                    >
                        <DetectionCanvas />
                    </Show>
                    <Show when=analyzing>
                        <div class="loading-indicator">
                            <div class="spinner"></div>
                            <p>"Running detection..."</p>
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}

/// Drag-and-drop or browse for one image file.
#[component]
fn PhotoDropZone() -> impl IntoView {
    let ctx = use_session();
    let (is_over, set_is_over) = signal(false);
    let (is_loading, set_is_loading) = signal(false);
    let file_input_id = "xray-file-input";

    let load_file = move |file: web_sys::File| {
        set_is_loading.set(true);
        spawn_local(async move {
            match read_image(file).await {
                Ok(image) => ctx.dispatch(Trigger::ImageSelected(image)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to read file: {}", e).into());
                }
            }
            set_is_loading.set(false);
        });
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_is_over.set(false);
        if let Some(file) = ev.data_transfer().and_then(|dt| dt.files()).and_then(|f| f.get(0)) {
            load_file(file);
        }
    };

    let on_input_change = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            load_file(file);
        }
    };

    view! {
        <div
            class="drop-zone"
            class:drop-zone-active=move || is_over.get()
            class:drop-zone-loading=move || is_loading.get()
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                set_is_over.set(true);
            }
            on:dragleave=move |_| set_is_over.set(false)
            on:drop=on_drop
        >
            <Show
                when=move || is_loading.get()
                fallback=move || view! {
                    <div class="drop-zone-content">
                        <p class="drop-main">"Drop an X-ray image here"</p>
                        <p class="drop-hint">"or"</p>
                        <label for=file_input_id class="btn btn-secondary">
                            "Browse Files"
                        </label>
                        <input
                            type="file"
                            id=file_input_id
                            accept="image/*"
                            style="display: none"
                            on:change=on_input_change
                        />
                        <p class="drop-formats">"Supports JPEG, PNG, BMP, WebP"</p>
                    </div>
                }
            >
                <div class="drop-zone-loading-content">
                    <div class="spinner"></div>
                    <p>"Loading image..."</p>
                </div>
            </Show>
        </div>
    }
}

/// Read a picked file into a [`SelectedImage`].
async fn read_image(file: web_sys::File) -> Result<SelectedImage, String> {
    use js_sys::{ArrayBuffer, Uint8Array};
    use wasm_bindgen_futures::JsFuture;

    let array_buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Failed to convert to ArrayBuffer".to_string())?;

    let bytes = Uint8Array::new(&array_buffer).to_vec();
    let base64 = STANDARD.encode(&bytes);
    let mime = match file.type_() {
        t if t.is_empty() => "image/jpeg".to_string(),
        t => t,
    };

    Ok(SelectedImage {
        file_name: file.name(),
        preview_url: format!("data:{};base64,{}", mime, base64),
        base64,
    })
}
