//! The uploaded image with the detection overlay drawn on top.
//!
//! The canvas is stacked over the `<img>` and resized to its laid-out size on
//! every paint, so boxes follow the image through window resizes.

use leptos::html::{Canvas, Img};
use leptos::prelude::*;

use crate::canvas::{context_2d, paint, CanvasMeasure};
use crate::overlay::DisplayFrame;
use crate::session::Trigger;
use crate::state::use_session;

#[component]
pub fn DetectionCanvas() -> impl IntoView {
    let ctx = use_session();
    let img_ref = NodeRef::<Img>::new();
    let canvas_ref = NodeRef::<Canvas>::new();

    // Keyed on the generation so re-selecting the same file reloads the image.
    let preview = Memo::new(move |_| {
        ctx.session.with(|s| {
            s.image()
                .map(|image| (s.image_generation(), image.preview_url.clone()))
        })
    });

    let measure_frame = move || {
        if let Some(img) = img_ref.get_untracked() {
            let frame = DisplayFrame::new(
                img.natural_width() as f64,
                img.natural_height() as f64,
                img.width() as f64,
                img.height() as f64,
            );
            ctx.dispatch(Trigger::FrameResized(frame));
        }
    };

    let resize = window_event_listener(leptos::ev::resize, move |_| measure_frame());
    on_cleanup(move || resize.remove());

    Effect::new(move |_| {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let Some(draw) = context_2d(&canvas) else {
            return;
        };
        ctx.session.with(|s| {
            let commands = s.overlay(&CanvasMeasure::new(&draw));
            paint(&canvas, &draw, s.frame(), &commands);
        });
    });

    view! {
        {move || preview.get().map(|(_, src)| view! {
            <div class="detection-stage">
                <img
                    node_ref=img_ref
                    src=src
                    class="detection-image"
                    alt="Uploaded X-ray"
                    on:load=move |_| measure_frame()
                />
                <canvas node_ref=canvas_ref class="detection-overlay"></canvas>
            </div>
        })}
    }
}
