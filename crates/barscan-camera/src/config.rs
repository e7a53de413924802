use barscan_base::Size;

/// Which physical sensor the scanner prefers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FacingMode {
    /// Front camera, facing the user.
    User,
    /// Rear camera, facing the scene. Barcodes are scanned with this one.
    #[default]
    Environment,
    /// No preference.
    Any,
}

/// Lower bound, preferred value and upper bound for one dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimensionRange {
    pub min: u32,
    pub ideal: u32,
    pub max: u32,
}

impl DimensionRange {
    pub fn new(min: u32, ideal: u32, max: u32) -> Self {
        Self { min, ideal, max }
    }

    /// The ideal value clamped into `[min, max]`.
    pub fn target(&self) -> u32 {
        self.ideal.clamp(self.min, self.max.max(self.min))
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Constraints passed to a `CameraProvider` when requesting a stream.
#[derive(Clone, Debug)]
pub struct CameraConstraints {
    facing: FacingMode,
    width: DimensionRange,
    height: DimensionRange,
    aspect_ratio: f64,
    frame_rate: u32,
    device: String,
    buffer_count: u32,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            facing: FacingMode::Environment,
            width: DimensionRange::new(640, 1280, 1920),
            height: DimensionRange::new(480, 720, 1080),
            aspect_ratio: 16.0 / 9.0,
            frame_rate: 30,
            device: "/dev/video0".to_string(),
            buffer_count: 4,
        }
    }
}

impl CameraConstraints {
    /// Set the preferred sensor.
    pub fn with_facing(mut self, facing: FacingMode) -> Self {
        self.facing = facing;
        self
    }

    /// Set the acceptable width range in pixels.
    pub fn with_width(mut self, width: DimensionRange) -> Self {
        self.width = width;
        self
    }

    /// Set the acceptable height range in pixels.
    pub fn with_height(mut self, height: DimensionRange) -> Self {
        self.height = height;
        self
    }

    /// Set the preferred width / height ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the preferred frames per second.
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Set the device path for native backends (e.g., "/dev/video0").
    pub fn with_device(mut self, device: String) -> Self {
        self.device = device;
        self
    }

    /// Set the buffer count for native capture streams.
    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    // Getters
    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    pub fn width(&self) -> DimensionRange {
        self.width
    }

    pub fn height(&self) -> DimensionRange {
        self.height
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }

    /// Size a backend should ask the hardware for.
    pub fn target_size(&self) -> Size {
        Size::new(self.width.target(), self.height.target())
    }

    /// Whether a negotiated size falls inside the width and height bounds.
    ///
    /// The aspect ratio is a preference only and is not checked here.
    pub fn accepts(&self, size: Size) -> bool {
        self.width.contains(size.width) && self.height.contains(size.height)
    }
}
