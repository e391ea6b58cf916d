use serde::{Deserialize, Serialize};

/// One object found by the detector, in natural-image pixel space.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Detection {
    /// `[x1, y1, x2, y2]`
    pub bbox: [f64; 4],
    pub label: String,
    pub confidence: f64,
}

/// Summarize a detection set for the chat context.
///
/// One clause per label, in first-appearance order:
/// `"2 objects of type tooth38 found; 1 object of type tooth48 found"`.
/// Empty for an empty set.
pub fn context_snippet(detections: &[Detection]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for det in detections {
        match counts.iter_mut().find(|(label, _)| *label == det.label) {
            Some((_, n)) => *n += 1,
            None => counts.push((det.label.as_str(), 1)),
        }
    }

    counts
        .iter()
        .map(|(label, n)| {
            let noun = if *n == 1 { "object" } else { "objects" };
            format!("{} {} of type {} found", n, noun, label)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(label: &str) -> Detection {
        Detection {
            bbox: [0.0, 0.0, 10.0, 10.0],
            label: label.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_snippet_empty() {
        assert_eq!(context_snippet(&[]), "");
    }

    #[test]
    fn test_snippet_single_label() {
        let dets = vec![det("wisdom tooth"), det("wisdom tooth"), det("wisdom tooth")];
        assert_eq!(context_snippet(&dets), "3 objects of type wisdom tooth found");
    }

    #[test]
    fn test_snippet_singular() {
        assert_eq!(context_snippet(&[det("tooth38")]), "1 object of type tooth38 found");
    }

    #[test]
    fn test_snippet_groups_in_first_appearance_order() {
        let dets = vec![det("tooth48"), det("tooth38"), det("tooth48")];
        assert_eq!(
            context_snippet(&dets),
            "2 objects of type tooth48 found; 1 object of type tooth38 found"
        );
    }
}
