use std::fmt;

/// Lifecycle stage a failure originated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureStage {
    DeviceCheck,
    Permission,
    VideoReady,
    DecodeInit,
    DecodeRuntime,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::DeviceCheck => write!(f, "device-check"),
            FailureStage::Permission => write!(f, "permission"),
            FailureStage::VideoReady => write!(f, "video-ready"),
            FailureStage::DecodeInit => write!(f, "decode-init"),
            FailureStage::DecodeRuntime => write!(f, "decode-runtime"),
        }
    }
}

/// Terminal failure of one scanner activation.
///
/// Each variant carries the message from the platform or library
/// unchanged; none of them is retried automatically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanError {
    DeviceUnsupported(String),
    PermissionDenied(String),
    VideoNotReady(String),
    DecoderInitFailed(String),
    DecoderRuntimeError(String),
}

impl ScanError {
    pub fn stage(&self) -> FailureStage {
        match self {
            ScanError::DeviceUnsupported(_) => FailureStage::DeviceCheck,
            ScanError::PermissionDenied(_) => FailureStage::Permission,
            ScanError::VideoNotReady(_) => FailureStage::VideoReady,
            ScanError::DecoderInitFailed(_) => FailureStage::DecodeInit,
            ScanError::DecoderRuntimeError(_) => FailureStage::DecodeRuntime,
        }
    }

    /// The collaborator's message, as shown to the user.
    pub fn message(&self) -> &str {
        match self {
            ScanError::DeviceUnsupported(msg)
            | ScanError::PermissionDenied(msg)
            | ScanError::VideoNotReady(msg)
            | ScanError::DecoderInitFailed(msg)
            | ScanError::DecoderRuntimeError(msg) => msg,
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage(), self.message())
    }
}

impl std::error::Error for ScanError {}

/// Errors reported by a `BarcodeDecoder`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The decoder could not be constructed or attached.
    Init(String),
    Runtime(String),
    /// Stopping the decode loop failed.
    Reset(String),
}

impl DecodeError {
    pub fn message(&self) -> &str {
        match self {
            DecodeError::Init(msg) | DecodeError::Runtime(msg) | DecodeError::Reset(msg) => msg,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Init(msg) => write!(f, "decoder init error: {msg}"),
            DecodeError::Runtime(msg) => write!(f, "decoder runtime error: {msg}"),
            DecodeError::Reset(msg) => write!(f, "decoder reset error: {msg}"),
        }
    }
}

impl std::error::Error for DecodeError {}
