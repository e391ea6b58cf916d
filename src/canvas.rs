use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::overlay::{
    DisplayFrame, DrawCommand, TextMeasure, BOX_FILL, BOX_LINE_WIDTH, BOX_STROKE,
    LABEL_BACKGROUND, LABEL_COLOR, LABEL_FONT,
};

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Measures with the label font so label backgrounds fit the drawn text.
pub struct CanvasMeasure<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasMeasure<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        ctx.set_font(LABEL_FONT);
        Self { ctx }
    }
}

impl TextMeasure for CanvasMeasure<'_> {
    fn text_width(&self, text: &str) -> f64 {
        self.ctx
            .measure_text(text)
            .map(|metrics| metrics.width())
            .unwrap_or(0.0)
    }
}

/// Size the canvas to the displayed image, wipe it, then draw.
pub fn paint(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    frame: Option<DisplayFrame>,
    commands: &[DrawCommand],
) {
    let (width, height) = frame
        .map(|f| (f.display_width, f.display_height))
        .unwrap_or((0.0, 0.0));
    // Resizing resets context state, so styles are set afterwards.
    canvas.set_width(width.max(0.0).round() as u32);
    canvas.set_height(height.max(0.0).round() as u32);
    ctx.clear_rect(0.0, 0.0, width, height);

    ctx.set_line_width(BOX_LINE_WIDTH);
    ctx.set_font(LABEL_FONT);

    for command in commands {
        match command {
            DrawCommand::Box(rect) => {
                ctx.set_stroke_style_str(BOX_STROKE);
                ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
                ctx.set_fill_style_str(BOX_FILL);
                ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
            }
            DrawCommand::Label {
                text,
                background,
                text_x,
                text_y,
            } => {
                ctx.set_fill_style_str(LABEL_BACKGROUND);
                ctx.fill_rect(background.x, background.y, background.width, background.height);
                ctx.set_fill_style_str(LABEL_COLOR);
                if let Err(e) = ctx.fill_text(text, *text_x, *text_y) {
                    web_sys::console::error_1(&e);
                }
            }
        }
    }
}
