/// Camera device access
///
/// Wraps the platform camera behind a small `FrameSource` trait so the
/// capture pipeline can be exercised in tests without hardware. The real
/// implementation uses nokhwa's native backend, requesting 1280x720.

use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution};
use nokhwa::Camera;

/// Ideal capture resolution requested from the device
pub const CAPTURE_WIDTH: u32 = 1280;
pub const CAPTURE_HEIGHT: u32 = 720;

/// Errors from camera acquisition and frame capture
#[derive(Debug, Clone, thiserror::Error)]
pub enum CaptureError {
    /// The OS refused camera access. Terminal for this attempt; the user
    /// must grant permission and retry.
    #[error("camera access denied: {0}")]
    PermissionDenied(String),
    /// No usable camera, or the device failed to open
    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),
    /// The stream is open but a frame could not be read
    #[error("failed to read a camera frame: {0}")]
    Frame(String),
    /// A grabbed frame could not be encoded as JPEG
    #[error("failed to encode captured photo: {0}")]
    Encode(String),
}

/// A live source of video frames.
///
/// `close` must be called exactly once per successfully opened source,
/// including on paths where no photo is ever captured, so the hardware
/// in-use indicator is released. Implementations back this with a `Drop`
/// guard and make `close` idempotent. Sources must be `Send` so frame
/// grabs can run off the UI thread.
pub trait FrameSource: Send {
    /// Grab the current frame as RGB pixels
    fn grab(&mut self) -> Result<RgbImage, CaptureError>;

    /// Stop the underlying stream. Safe to call more than once.
    fn close(&mut self);
}

/// The real camera, via nokhwa's native backend
pub struct CameraDevice {
    camera: Camera,
    streaming: bool,
}

impl CameraDevice {
    /// Open the default camera device and start streaming.
    ///
    /// Acquiring the device may raise an OS permission prompt; a denial
    /// surfaces as `CaptureError::PermissionDenied`.
    pub fn open_default() -> Result<Self, CaptureError> {
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(CAPTURE_WIDTH, CAPTURE_HEIGHT),
                FrameFormat::MJPEG,
                30,
            ),
        ));

        let mut camera =
            Camera::new(CameraIndex::Index(0), requested).map_err(classify_open_error)?;
        camera.open_stream().map_err(classify_open_error)?;

        let format = camera.camera_format();
        tracing::info!(
            width = format.resolution().width(),
            height = format.resolution().height(),
            fps = format.frame_rate(),
            "camera stream opened"
        );

        Ok(Self {
            camera,
            streaming: true,
        })
    }
}

impl FrameSource for CameraDevice {
    fn grab(&mut self) -> Result<RgbImage, CaptureError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CaptureError::Frame(e.to_string()))?;
        buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::Frame(e.to_string()))
    }

    fn close(&mut self) {
        if self.streaming {
            if let Err(e) = self.camera.stop_stream() {
                tracing::warn!(error = %e, "failed to stop camera stream cleanly");
            }
            self.streaming = false;
            tracing::info!("camera stream released");
        }
    }
}

impl Drop for CameraDevice {
    fn drop(&mut self) {
        // Backstop for abort paths (window close, panic unwind)
        self.close();
    }
}

/// Map a nokhwa open error onto the two failure modes the UI reports.
/// nokhwa folds OS errors into strings, so this is a best-effort split.
fn classify_open_error(err: nokhwa::NokhwaError) -> CaptureError {
    let message = err.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("permission") || lowered.contains("denied") || lowered.contains("access") {
        CaptureError::PermissionDenied(message)
    } else {
        CaptureError::DeviceUnavailable(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_classification() {
        let err = nokhwa::NokhwaError::OpenDeviceError(
            "/dev/video0".to_string(),
            "Permission denied".to_string(),
        );
        assert!(matches!(
            classify_open_error(err),
            CaptureError::PermissionDenied(_)
        ));

        let err = nokhwa::NokhwaError::OpenDeviceError(
            "/dev/video0".to_string(),
            "No such device".to_string(),
        );
        assert!(matches!(
            classify_open_error(err),
            CaptureError::DeviceUnavailable(_)
        ));
    }
}
