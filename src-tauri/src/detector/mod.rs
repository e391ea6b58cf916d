//! Client side of the remote object detector.

pub mod client;
pub mod types;
pub mod upload;

pub use client::{parse_detect_body, DetectorClient};
pub use types::*;
pub use upload::{decode_upload, inspect_upload, ImageUpload};
