use crate::DecodeHints;
use barscan_camera::CameraConstraints;
use std::time::Duration;

/// What to do when the decoder reports an error that is not "not found".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RuntimeErrorPolicy {
    /// Fail the activation.
    #[default]
    Terminal,
    /// Log the error and keep scanning.
    Ignore,
}

/// Configuration for one scanner widget.
#[derive(Clone, Debug)]
pub struct ScannerConfig {
    constraints: CameraConstraints,
    hints: DecodeHints,
    platform: String,
    require_handheld: bool,
    ready_poll_interval: Duration,
    ready_timeout: Duration,
    runtime_error_policy: RuntimeErrorPolicy,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            constraints: CameraConstraints::default(),
            hints: DecodeHints::default(),
            platform: std::env::consts::OS.to_string(),
            require_handheld: false,
            ready_poll_interval: Duration::from_millis(100),
            ready_timeout: Duration::from_secs(10),
            runtime_error_policy: RuntimeErrorPolicy::Terminal,
        }
    }
}

impl ScannerConfig {
    /// Set the camera constraints used for the permission request.
    pub fn with_constraints(mut self, constraints: CameraConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Set the hints the decoder is started with.
    pub fn with_hints(mut self, hints: DecodeHints) -> Self {
        self.hints = hints;
        self
    }

    /// Set the platform identification string (e.g. a browser user agent).
    pub fn with_platform(mut self, platform: String) -> Self {
        self.platform = platform;
        self
    }

    /// Refuse to start on platforms that do not look handheld.
    pub fn with_require_handheld(mut self, require_handheld: bool) -> Self {
        self.require_handheld = require_handheld;
        self
    }

    /// Set how often the video surface is checked for its first frame.
    pub fn with_ready_poll_interval(mut self, interval: Duration) -> Self {
        self.ready_poll_interval = interval;
        self
    }

    /// Set how long to wait for the first frame before failing.
    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }

    pub fn with_runtime_error_policy(mut self, policy: RuntimeErrorPolicy) -> Self {
        self.runtime_error_policy = policy;
        self
    }

    // Getters
    pub fn constraints(&self) -> &CameraConstraints {
        &self.constraints
    }

    pub fn hints(&self) -> &DecodeHints {
        &self.hints
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn require_handheld(&self) -> bool {
        self.require_handheld
    }

    pub fn ready_poll_interval(&self) -> Duration {
        self.ready_poll_interval
    }

    pub fn ready_timeout(&self) -> Duration {
        self.ready_timeout
    }

    pub fn runtime_error_policy(&self) -> RuntimeErrorPolicy {
        self.runtime_error_policy
    }
}
