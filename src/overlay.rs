//! Maps detections from natural-image space onto the displayed image and
//! turns them into drawing commands.
//!
//! `render` is pure: the same detections, frame and measurer always give the
//! same commands. Clearing the previous overlay is the painter's job
//! (see `canvas::paint`), so an empty command list still wipes stale boxes.

use crate::detection::Detection;

pub const BOX_STROKE: &str = "#00FF00";
pub const BOX_LINE_WIDTH: f64 = 4.0;
pub const BOX_FILL: &str = "rgba(0, 255, 0, 0.2)";
pub const LABEL_BACKGROUND: &str = "black";
pub const LABEL_COLOR: &str = "#00FF00";
pub const LABEL_FONT: &str = "bold 18px Roboto, sans-serif";

/// Label background height; its top sits this far above the box.
const LABEL_HEIGHT: f64 = 25.0;
/// Horizontal padding added to the measured text width.
const LABEL_PADDING: f64 = 10.0;
const TEXT_INSET_X: f64 = 5.0;
/// Text baseline distance above the box top.
const TEXT_BASELINE_OFFSET: f64 = 7.0;

/// Natural (source pixel) and display (laid-out) size of the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayFrame {
    pub natural_width: f64,
    pub natural_height: f64,
    pub display_width: f64,
    pub display_height: f64,
}

impl DisplayFrame {
    pub fn new(natural_width: f64, natural_height: f64, display_width: f64, display_height: f64) -> Self {
        Self {
            natural_width,
            natural_height,
            display_width,
            display_height,
        }
    }

    /// `(display / natural)` per axis, or `None` while the natural size is
    /// unknown (image not loaded, zero, or NaN).
    pub fn scale(&self) -> Option<(f64, f64)> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(self.natural_width) || !usable(self.natural_height) {
            return None;
        }
        Some((
            self.display_width / self.natural_width,
            self.display_height / self.natural_height,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled and stroked bounding box.
    Box(Rect),
    /// Label text on an opaque background above its box.
    Label {
        text: String,
        background: Rect,
        text_x: f64,
        text_y: f64,
    },
}

/// Measures rendered text width in display units.
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f64;
}

/// `"{label} {confidence as whole percent}%"`, rounding half up.
pub fn label_text(detection: &Detection) -> String {
    let percent = (detection.confidence * 100.0).round() as i64;
    format!("{} {}%", detection.label, percent)
}

/// Produce one box and one label per detection, in input order.
///
/// Boxes outside the image are not clamped.
pub fn render<M: TextMeasure + ?Sized>(
    detections: &[Detection],
    frame: &DisplayFrame,
    measure: &M,
) -> Vec<DrawCommand> {
    let Some((scale_x, scale_y)) = frame.scale() else {
        return Vec::new();
    };

    let mut commands = Vec::with_capacity(detections.len() * 2);
    for det in detections {
        let [x1, y1, x2, y2] = det.bbox;
        let rect = Rect {
            x: x1 * scale_x,
            y: y1 * scale_y,
            width: (x2 - x1) * scale_x,
            height: (y2 - y1) * scale_y,
        };

        let text = label_text(det);
        let text_width = measure.text_width(&text);
        commands.push(DrawCommand::Box(rect));
        commands.push(DrawCommand::Label {
            background: Rect {
                x: rect.x,
                y: rect.y - LABEL_HEIGHT,
                width: text_width + LABEL_PADDING,
                height: LABEL_HEIGHT,
            },
            text_x: rect.x + TEXT_INSET_X,
            text_y: rect.y - TEXT_BASELINE_OFFSET,
            text,
        });
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is 10 units wide.
    struct FixedAdvance;

    impl TextMeasure for FixedAdvance {
        fn text_width(&self, text: &str) -> f64 {
            text.chars().count() as f64 * 10.0
        }
    }

    fn det(bbox: [f64; 4], label: &str, confidence: f64) -> Detection {
        Detection {
            bbox,
            label: label.to_string(),
            confidence,
        }
    }

    fn boxes(commands: &[DrawCommand]) -> Vec<Rect> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Box(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    fn sample() -> Vec<Detection> {
        vec![
            det([100.0, 200.0, 180.0, 300.0], "tooth38", 0.873),
            det([400.5, 210.25, 470.0, 305.0], "tooth48", 0.5),
            det([0.0, 0.0, 1.0, 1.0], "tooth18", 0.01),
        ]
    }

    #[test]
    fn test_double_size_frame_doubles_every_box() {
        let dets = sample();
        let frame = DisplayFrame::new(800.0, 600.0, 1600.0, 1200.0);
        let rects = boxes(&render(&dets, &frame, &FixedAdvance));

        assert_eq!(rects.len(), dets.len());
        for (rect, d) in rects.iter().zip(&dets) {
            let [x1, y1, x2, y2] = d.bbox;
            assert_eq!(rect.x, 2.0 * x1);
            assert_eq!(rect.y, 2.0 * y1);
            assert_eq!(rect.width, 2.0 * (x2 - x1));
            assert_eq!(rect.height, 2.0 * (y2 - y1));
        }
    }

    #[test]
    fn test_non_uniform_scale() {
        let dets = vec![det([100.0, 100.0, 200.0, 300.0], "tooth", 0.9)];
        let frame = DisplayFrame::new(1000.0, 1000.0, 500.0, 250.0);
        let rects = boxes(&render(&dets, &frame, &FixedAdvance));

        assert_eq!(
            rects[0],
            Rect {
                x: 50.0,
                y: 25.0,
                width: 50.0,
                height: 50.0
            }
        );
    }

    #[test]
    fn test_empty_detections_give_no_commands() {
        let frames = [
            DisplayFrame::new(800.0, 600.0, 400.0, 300.0),
            DisplayFrame::new(0.0, 0.0, 0.0, 0.0),
            DisplayFrame::new(1.0, 1.0, 5000.0, 5000.0),
        ];
        for frame in &frames {
            assert!(render(&[], frame, &FixedAdvance).is_empty());
        }
    }

    #[test]
    fn test_zero_natural_width_gives_no_commands() {
        let frame = DisplayFrame::new(0.0, 600.0, 400.0, 300.0);
        assert!(render(&sample(), &frame, &FixedAdvance).is_empty());
    }

    #[test]
    fn test_unloaded_natural_size_gives_no_commands() {
        let frame = DisplayFrame::new(f64::NAN, 600.0, 400.0, 300.0);
        assert!(render(&sample(), &frame, &FixedAdvance).is_empty());
        let frame = DisplayFrame::new(800.0, 0.0, 400.0, 300.0);
        assert!(render(&sample(), &frame, &FixedAdvance).is_empty());
    }

    #[test]
    fn test_second_render_carries_nothing_from_first() {
        let frame = DisplayFrame::new(800.0, 600.0, 400.0, 300.0);
        let first = render(&sample(), &frame, &FixedAdvance);
        let second_set = vec![det([10.0, 20.0, 30.0, 40.0], "tooth28", 0.7)];
        let second = render(&second_set, &frame, &FixedAdvance);

        assert_eq!(second.len(), 2);
        for cmd in &second {
            assert!(!first.contains(cmd));
        }
        assert_eq!(
            boxes(&second),
            vec![Rect {
                x: 5.0,
                y: 10.0,
                width: 10.0,
                height: 10.0
            }]
        );
    }

    #[test]
    fn test_order_preserved() {
        let frame = DisplayFrame::new(100.0, 100.0, 100.0, 100.0);
        let labels: Vec<String> = render(&sample(), &frame, &FixedAdvance)
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Label { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["tooth38 87%", "tooth48 50%", "tooth18 1%"]);
    }

    #[test]
    fn test_label_geometry() {
        let dets = vec![det([100.0, 200.0, 180.0, 300.0], "Tooth37", 0.873)];
        let frame = DisplayFrame::new(100.0, 100.0, 100.0, 100.0);
        let commands = render(&dets, &frame, &FixedAdvance);

        match &commands[1] {
            DrawCommand::Label {
                text,
                background,
                text_x,
                text_y,
            } => {
                assert_eq!(text, "Tooth37 87%");
                // 11 chars * 10 + 10 padding
                assert_eq!(
                    *background,
                    Rect {
                        x: 100.0,
                        y: 175.0,
                        width: 120.0,
                        height: 25.0
                    }
                );
                assert_eq!(*text_x, 105.0);
                assert_eq!(*text_y, 193.0);
            }
            other => panic!("expected label, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_bounds_box_not_clamped() {
        let dets = vec![det([-20.0, 550.0, 900.0, 700.0], "tooth", 0.4)];
        let frame = DisplayFrame::new(800.0, 600.0, 400.0, 300.0);
        let rects = boxes(&render(&dets, &frame, &FixedAdvance));

        assert_eq!(
            rects[0],
            Rect {
                x: -10.0,
                y: 275.0,
                width: 460.0,
                height: 75.0
            }
        );
    }

    #[test]
    fn test_label_text_rounding() {
        assert_eq!(label_text(&det([0.0; 4], "Tooth37", 0.873)), "Tooth37 87%");
        assert_eq!(label_text(&det([0.0; 4], "t", 0.125)), "t 13%");
        assert_eq!(label_text(&det([0.0; 4], "t", 1.0)), "t 100%");
        assert_eq!(label_text(&det([0.0; 4], "t", 0.0)), "t 0%");
    }

    #[test]
    fn test_render_is_idempotent() {
        let frame = DisplayFrame::new(1024.0, 768.0, 640.0, 480.0);
        let dets = sample();
        assert_eq!(
            render(&dets, &frame, &FixedAdvance),
            render(&dets, &frame, &FixedAdvance)
        );
    }
}
