use tracing::{info, warn};

use crate::detector::{decode_upload, DetectRequest, DetectResponse, DetectorClient};
use crate::error::ScanError;
use crate::settings::ServiceSettings;

/// Send an image to the detector and return its detections.
///
/// Errors come back as the `ScanError` text: `Transport error: ...` for
/// connection failures and non-2xx statuses, `Malformed response: ...` when
/// the body has no `detections`.
#[tauri::command]
pub async fn detect_image(
    app: tauri::AppHandle,
    request: DetectRequest,
) -> Result<DetectResponse, String> {
    info!("Starting detection for '{}'", request.file_name);
    let settings = ServiceSettings::load(&app)?;
    run_detection(&settings, request).await.map_err(|e| {
        warn!("Detection failed: {}", e);
        e.into()
    })
}

async fn run_detection(
    settings: &ServiceSettings,
    request: DetectRequest,
) -> Result<DetectResponse, ScanError> {
    let upload = decode_upload(&request.image_base64, &request.file_name)?;
    let client = DetectorClient::new(settings.detect_url()?)?;
    let detections = client.detect(upload).await?;

    let analyzed_at = chrono::Local::now().format("%H:%M:%S").to_string();
    info!("Detection complete: {} objects at {}", detections.len(), analyzed_at);
    Ok(DetectResponse::new(detections, analyzed_at))
}
