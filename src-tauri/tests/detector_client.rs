mod common;

use std::io::Cursor;

use dentai_scan_tauri::detector::{inspect_upload, DetectorClient, ImageUpload};
use dentai_scan_tauri::ScanError;
use image::{DynamicImage, ImageFormat};

fn sample_upload() -> ImageUpload {
    let img = DynamicImage::new_rgb8(16, 16);
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png).unwrap();
    inspect_upload(buffer.into_inner(), "panoramic.png").unwrap()
}

#[tokio::test]
async fn test_detect_parses_detections() {
    let body = r#"{"message":"Success","count":2,"detections":[
        {"label":"tooth38","confidence":0.873,"bbox":[120.0,340.0,210.0,460.0]},
        {"label":"tooth48","confidence":0.64,"bbox":[900.0,350.0,990.0,470.0]}
    ]}"#;
    let server = common::respond_once("detect", "200 OK", body).await;

    let client = DetectorClient::new(server.url.clone()).unwrap();
    let detections = client.detect(sample_upload()).await.unwrap();

    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0].label, "tooth38");
    assert_eq!(detections[0].bbox, [120.0, 340.0, 210.0, 460.0]);
    assert_eq!(detections[1].confidence, 0.64);
}

#[tokio::test]
async fn test_detect_sends_single_image_field() {
    let server = common::respond_once("detect", "200 OK", r#"{"detections":[]}"#).await;

    let client = DetectorClient::new(server.url.clone()).unwrap();
    client.detect(sample_upload()).await.unwrap();

    let request = server.request.await.unwrap();
    assert!(request.starts_with("POST /detect"), "got: {}", request);
    assert!(request.contains("multipart/form-data"));
    assert!(request.contains("name=\"image\""));
    assert!(request.contains("filename=\"panoramic.png\""));
    assert!(request.contains("image/png"));
}

#[tokio::test]
async fn test_detect_non_2xx_is_transport_error() {
    let server = common::respond_once(
        "detect",
        "400 BAD REQUEST",
        r#"{"error":"No image uploaded"}"#,
    )
    .await;

    let client = DetectorClient::new(server.url.clone()).unwrap();
    let err = client.detect(sample_upload()).await.unwrap_err();

    assert!(err.is_transport(), "expected transport error, got {:?}", err);
    assert!(err.to_string().contains("400"));
}

#[tokio::test]
async fn test_detect_missing_detections_is_malformed() {
    let server = common::respond_once("detect", "200 OK", r#"{"message":"Success"}"#).await;

    let client = DetectorClient::new(server.url.clone()).unwrap();
    let err = client.detect(sample_upload()).await.unwrap_err();

    assert!(matches!(err, ScanError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_detect_unreachable_is_transport_error() {
    let url = common::closed_url("detect").await;

    let client = DetectorClient::new(url).unwrap();
    let err = client.detect(sample_upload()).await.unwrap_err();

    assert!(err.is_transport());
}
