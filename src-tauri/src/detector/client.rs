use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::{error, info};
use url::Url;

use super::types::{DetectServiceResponse, Detection};
use super::upload::ImageUpload;
use crate::error::ScanError;
use crate::http::{build_client, read_success_body, truncate};

pub const DETECT_TIMEOUT: Duration = Duration::from_secs(60);

pub struct DetectorClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl DetectorClient {
    pub fn new(endpoint: Url) -> Result<Self, ScanError> {
        Ok(Self {
            http: build_client(DETECT_TIMEOUT)?,
            endpoint,
        })
    }

    /// POST the image as the `image` form field and return its detections.
    pub async fn detect(&self, upload: ImageUpload) -> Result<Vec<Detection>, ScanError> {
        info!(
            "Sending '{}' ({} bytes) to detector at {}",
            upload.file_name,
            upload.bytes.len(),
            self.endpoint
        );

        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(upload.mime_type)
            .map_err(|e| ScanError::InvalidImage(format!("Bad mime type: {}", e)))?;
        let form = Form::new().part("image", part);

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                let err = ScanError::from(e);
                error!("Detect request failed: {}", err);
                err
            })?;

        let body = read_success_body(response, "detector").await?;
        let detections = parse_detect_body(&body)?;
        info!("Detector returned {} detections", detections.len());
        Ok(detections)
    }
}

/// Parse a detector response body. A missing `detections` field is malformed.
pub fn parse_detect_body(body: &str) -> Result<Vec<Detection>, ScanError> {
    serde_json::from_str::<DetectServiceResponse>(body)
        .map(|parsed| parsed.detections)
        .map_err(|e| {
            let msg = format!(
                "Detector response is not {{ detections: [...] }}: {}. Body: {}",
                e,
                truncate(body)
            );
            error!("{}", msg);
            ScanError::MalformedResponse(msg)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detect_body() {
        let body = r#"{"message":"Success","count":2,"detections":[
            {"label":"tooth38","confidence":0.873,"bbox":[100.0,200.0,180.0,300.0]},
            {"label":"tooth48","confidence":0.5,"bbox":[400.0,210.0,470.0,305.0]}
        ]}"#;

        let detections = parse_detect_body(body).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].label, "tooth38");
        assert_eq!(detections[1].bbox[2], 470.0);
    }

    #[test]
    fn test_parse_detect_body_empty_list() {
        let detections = parse_detect_body(r#"{"detections": []}"#).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_parse_detect_body_missing_field() {
        let err = parse_detect_body(r#"{"error": "No image uploaded"}"#).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_parse_detect_body_not_json() {
        let err = parse_detect_body("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_parse_detect_body_bad_bbox() {
        let err = parse_detect_body(
            r#"{"detections":[{"label":"x","confidence":0.1,"bbox":[1.0,2.0]}]}"#,
        )
        .unwrap_err();
        assert!(err.is_malformed());
    }
}
