//! Upload validation for the detect call.
//!
//! The image is forwarded byte-for-byte. Only the container format is
//! sniffed, to reject non-images early and to label the multipart part.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::ImageFormat;
use tracing::info;

use crate::error::ScanError;

/// Image bytes ready to be sent as the `image` form field.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
}

/// Decode the frontend's base64 payload and sniff its format.
pub fn decode_upload(image_base64: &str, file_name: &str) -> Result<ImageUpload, ScanError> {
    let bytes = STANDARD
        .decode(image_base64.trim())
        .map_err(|e| ScanError::InvalidImage(format!("Invalid base64 image data: {}", e)))?;
    inspect_upload(bytes, file_name)
}

/// Sniff the format of raw upload bytes.
pub fn inspect_upload(bytes: Vec<u8>, file_name: &str) -> Result<ImageUpload, ScanError> {
    if bytes.is_empty() {
        return Err(ScanError::InvalidImage("Image is empty".to_string()));
    }

    let format = image::guess_format(&bytes).map_err(|e| {
        ScanError::InvalidImage(format!(
            "Unrecognized image format: {}. Upload a JPEG, PNG or WebP.",
            e
        ))
    })?;

    let file_name = if file_name.trim().is_empty() {
        default_file_name(format)
    } else {
        file_name.trim().to_string()
    };

    info!(
        "Upload '{}': {} bytes, {}",
        file_name,
        bytes.len(),
        format.to_mime_type()
    );

    Ok(ImageUpload {
        bytes,
        file_name,
        mime_type: format.to_mime_type(),
    })
}

fn default_file_name(format: ImageFormat) -> String {
    let ext = format.extensions_str().first().copied().unwrap_or("img");
    format!("upload.{}", ext)
}
