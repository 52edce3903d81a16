/// Captured photo snapshot
///
/// Turns one grabbed camera frame into the in-memory payload the rest of
/// the app works with: a JPEG (fixed quality, matching a browser
/// `toDataURL('image/jpeg', 0.8)`), a data-URI string for handoff, and
/// RGBA pixels for on-screen display. Nothing is ever written to disk.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, RgbImage};

use super::device::CaptureError;

/// JPEG quality used for every capture (0-100)
pub const JPEG_QUALITY: u8 = 80;

/// One captured still frame, alive until the user requests a new photo
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub width: u32,
    pub height: u32,
    /// RGBA pixels for display widgets
    pub rgba: Vec<u8>,
    /// The encoded JPEG bytes
    pub jpeg: Vec<u8>,
}

impl CapturedPhoto {
    /// Snapshot a camera frame into an encoded photo
    pub fn from_frame(frame: &RgbImage) -> Result<Self, CaptureError> {
        let (width, height) = frame.dimensions();

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
            .encode(frame.as_raw(), width, height, ExtendedColorType::Rgb8)
            .map_err(|e| CaptureError::Encode(e.to_string()))?;

        // Expand to RGBA once so display handles can be built cheaply
        let rgba = frame_to_rgba(frame);

        tracing::info!(width, height, jpeg_bytes = jpeg.len(), "photo captured");

        Ok(Self {
            width,
            height,
            rgba,
            jpeg,
        })
    }

    /// The photo as a `data:image/jpeg;base64,...` URI, the same handoff
    /// format a browser capture produces
    pub fn data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", BASE64.encode(&self.jpeg))
    }
}

/// Expand RGB camera pixels to opaque RGBA for display widgets
pub fn frame_to_rgba(frame: &RgbImage) -> Vec<u8> {
    let (width, height) = frame.dimensions();
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for pixel in frame.pixels() {
        rgba.extend_from_slice(&[pixel[0], pixel[1], pixel[2], 0xFF]);
    }
    rgba
}
