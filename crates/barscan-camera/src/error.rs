use std::fmt;
use std::io;

#[derive(Debug)]
pub enum CameraError {
    /// No usable device, or the device failed.
    Device(String),
    /// Access to the camera was refused.
    Permission(String),
    /// The device cannot satisfy the requested constraints.
    Constraint(String),
    Stream(String),
    /// The video surface could not start playback.
    Playback(String),
    Decode(image::ImageError),
}

impl CameraError {
    /// The underlying message without the category prefix.
    ///
    /// This is what gets shown to the user when a camera request fails.
    pub fn message(&self) -> String {
        match self {
            CameraError::Device(msg)
            | CameraError::Permission(msg)
            | CameraError::Constraint(msg)
            | CameraError::Stream(msg)
            | CameraError::Playback(msg) => msg.clone(),
            CameraError::Decode(err) => err.to_string(),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Device(msg) => write!(f, "device error: {msg}"),
            CameraError::Permission(msg) => write!(f, "permission error: {msg}"),
            CameraError::Constraint(msg) => write!(f, "constraint error: {msg}"),
            CameraError::Stream(msg) => write!(f, "stream error: {msg}"),
            CameraError::Playback(msg) => write!(f, "playback error: {msg}"),
            CameraError::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl std::error::Error for CameraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CameraError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CameraError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => CameraError::Permission("Permission denied".to_string()),
            io::ErrorKind::NotFound => CameraError::Device("Requested device not found".to_string()),
            _ => CameraError::Device(err.to_string()),
        }
    }
}

impl From<image::ImageError> for CameraError {
    fn from(err: image::ImageError) -> Self {
        CameraError::Decode(err)
    }
}
