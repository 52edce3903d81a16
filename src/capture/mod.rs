/// Camera capture module
///
/// This module handles:
/// - Opening and releasing the camera device (device.rs)
/// - Snapshotting a single frame into a JPEG photo (photo.rs)

pub mod device;
pub mod photo;
