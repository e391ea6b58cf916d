use serde::{Deserialize, Serialize};

/// One object found by the detector, in natural-image pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// `[x1, y1, x2, y2]`
    pub bbox: [f64; 4],
    pub label: String,
    pub confidence: f64,
}

/// Body returned by the detector service. Extra fields (`message`, `count`)
/// are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct DetectServiceResponse {
    pub detections: Vec<Detection>,
}

/// Payload of the `detect_image` command.
#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    /// Base64-encoded image bytes, as read by the frontend.
    pub image_base64: String,
    /// Original file name, forwarded in the multipart part.
    pub file_name: String,
}

/// Result of the `detect_image` command.
#[derive(Debug, Clone, Serialize)]
pub struct DetectResponse {
    pub detections: Vec<Detection>,
    pub count: usize,
    /// Local wall-clock time the response arrived, `HH:MM:SS`.
    pub analyzed_at: String,
}

impl DetectResponse {
    pub fn new(detections: Vec<Detection>, analyzed_at: String) -> Self {
        Self {
            count: detections.len(),
            detections,
            analyzed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_response_ignores_extra_fields() {
        let json = r#"{
            "message": "Success",
            "count": 1,
            "detections": [
                {"label": "wisdom_tooth", "confidence": 0.91, "bbox": [10.5, 20.0, 110.0, 140.25]}
            ]
        }"#;

        let parsed: DetectServiceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.detections.len(), 1);
        assert_eq!(parsed.detections[0].label, "wisdom_tooth");
        assert_eq!(parsed.detections[0].bbox, [10.5, 20.0, 110.0, 140.25]);
    }

    #[test]
    fn test_detect_response_counts() {
        let response = DetectResponse::new(
            vec![Detection {
                bbox: [0.0, 0.0, 1.0, 1.0],
                label: "tooth".to_string(),
                confidence: 0.5,
            }],
            "10:42:07".to_string(),
        );
        assert_eq!(response.count, 1);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"analyzed_at\":\"10:42:07\""));
    }
}
