#![allow(dead_code)]

use barscan::{
    BarcodeDecoder, DecodeError, DecodeEvent, DecodeHints, DecodeSink, DecodeSubscription,
    ScannerConfig, ScannerLifecycle,
};
use barscan_base::Size;
use barscan_camera::{CameraConstraints, CameraError, CameraProvider, MediaStream, VideoSurface};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const HANDHELD: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
pub const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/126.0";

pub type TestScanner = ScannerLifecycle<MockProvider, MockSurface, MockDecoder>;

/// Counts camera acquisitions and releases across a test.
#[derive(Debug, Default)]
pub struct CameraProbe {
    pub requests: AtomicUsize,
    pub acquired: AtomicUsize,
    pub released: AtomicUsize,
    pub live: AtomicUsize,
    pub peak_live: AtomicUsize,
    pub last_constraints: Mutex<Option<CameraConstraints>>,
}

impl CameraProbe {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn peak_live(&self) -> usize {
        self.peak_live.load(Ordering::SeqCst)
    }
}

pub struct MockStream {
    stopped: bool,
    probe: Arc<CameraProbe>,
}

impl MediaStream for MockStream {
    fn live_tracks(&self) -> usize {
        if self.stopped { 0 } else { 1 }
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.probe.released.fetch_add(1, Ordering::SeqCst);
            self.probe.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        self.stop();
    }
}

pub enum Grant {
    Allow,
    Deny(String),
    /// The permission prompt is never answered.
    Pending,
}

pub struct MockProvider {
    grant: Grant,
    probe: Arc<CameraProbe>,
}

impl MockProvider {
    pub fn new(grant: Grant) -> (Self, Arc<CameraProbe>) {
        let probe = Arc::new(CameraProbe::default());
        (
            Self {
                grant,
                probe: Arc::clone(&probe),
            },
            probe,
        )
    }
}

impl CameraProvider for MockProvider {
    type Stream = MockStream;

    async fn request(&mut self, constraints: &CameraConstraints) -> Result<MockStream, CameraError> {
        self.probe.requests.fetch_add(1, Ordering::SeqCst);
        *self.probe.last_constraints.lock().unwrap() = Some(constraints.clone());

        match &self.grant {
            Grant::Allow => {}
            Grant::Deny(msg) => return Err(CameraError::Permission(msg.clone())),
            Grant::Pending => std::future::pending::<()>().await,
        }

        self.probe.acquired.fetch_add(1, Ordering::SeqCst);
        let live = self.probe.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.probe.peak_live.fetch_max(live, Ordering::SeqCst);
        Ok(MockStream {
            stopped: false,
            probe: Arc::clone(&self.probe),
        })
    }
}

/// Shared view of a `MockSurface`, adjustable while the scanner runs.
#[derive(Debug, Default)]
pub struct SurfaceProbe {
    pub size: Mutex<Size>,
    pub play_error: Mutex<Option<String>>,
    pub attached: AtomicBool,
    pub playing: AtomicBool,
    pub attaches: AtomicUsize,
    pub detaches: AtomicUsize,
    pub polls: AtomicUsize,
}

impl SurfaceProbe {
    pub fn set_size(&self, size: Size) {
        *self.size.lock().unwrap() = size;
    }
}

pub struct MockSurface {
    probe: Arc<SurfaceProbe>,
}

impl MockSurface {
    pub fn new(size: Size) -> (Self, Arc<SurfaceProbe>) {
        let probe = Arc::new(SurfaceProbe::default());
        probe.set_size(size);
        (
            Self {
                probe: Arc::clone(&probe),
            },
            probe,
        )
    }
}

impl VideoSurface<MockStream> for MockSurface {
    fn attach(&mut self, _stream: &MockStream) {
        self.probe.attached.store(true, Ordering::SeqCst);
        self.probe.attaches.fetch_add(1, Ordering::SeqCst);
    }

    async fn play(&mut self) -> Result<(), CameraError> {
        if let Some(msg) = self.probe.play_error.lock().unwrap().clone() {
            return Err(CameraError::Playback(msg));
        }
        self.probe.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn natural_size(&self) -> Size {
        self.probe.polls.fetch_add(1, Ordering::SeqCst);
        if self.probe.attached.load(Ordering::SeqCst) && self.probe.playing.load(Ordering::SeqCst) {
            *self.probe.size.lock().unwrap()
        } else {
            Size::ZERO
        }
    }

    fn detach(&mut self) {
        self.probe.attached.store(false, Ordering::SeqCst);
        self.probe.playing.store(false, Ordering::SeqCst);
        self.probe.detaches.fetch_add(1, Ordering::SeqCst);
    }
}

/// Every sink handed to the decoder, plus start/reset counts.
#[derive(Debug, Default)]
pub struct DecoderProbe {
    pub sinks: Mutex<Vec<DecodeSink>>,
    pub hints: Mutex<Option<DecodeHints>>,
    pub init_error: Mutex<Option<String>>,
    pub reset_error: Mutex<Option<String>>,
    pub starts: AtomicUsize,
    pub resets: AtomicUsize,
}

impl DecoderProbe {
    /// Emit through the most recently started session.
    pub fn emit(&self, event: DecodeEvent) -> bool {
        let sinks = self.sinks.lock().unwrap();
        sinks.last().is_some_and(|sink| sink.emit(event))
    }

    pub fn sink(&self, index: usize) -> DecodeSink {
        self.sinks.lock().unwrap()[index].clone()
    }

    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }

    /// Sessions whose sink still accepts events.
    pub fn live_sessions(&self) -> usize {
        self.sinks.lock().unwrap().iter().filter(|sink| sink.is_active()).count()
    }
}

pub struct MockDecoder {
    probe: Arc<DecoderProbe>,
}

impl MockDecoder {
    pub fn new() -> (Self, Arc<DecoderProbe>) {
        let probe = Arc::new(DecoderProbe::default());
        (
            Self {
                probe: Arc::clone(&probe),
            },
            probe,
        )
    }
}

impl BarcodeDecoder<MockSurface> for MockDecoder {
    fn start(
        &mut self,
        hints: &DecodeHints,
        _surface: &MockSurface,
        sink: DecodeSink,
    ) -> Result<DecodeSubscription, DecodeError> {
        if let Some(msg) = self.probe.init_error.lock().unwrap().clone() {
            return Err(DecodeError::Init(msg));
        }
        self.probe.starts.fetch_add(1, Ordering::SeqCst);
        *self.probe.hints.lock().unwrap() = Some(hints.clone());
        self.probe.sinks.lock().unwrap().push(sink);

        let probe = Arc::clone(&self.probe);
        Ok(DecodeSubscription::new(move || {
            probe.resets.fetch_add(1, Ordering::SeqCst);
            match probe.reset_error.lock().unwrap().clone() {
                Some(msg) => Err(DecodeError::Reset(msg)),
                None => Ok(()),
            }
        }))
    }
}

pub struct Harness {
    pub scanner: TestScanner,
    pub camera: Arc<CameraProbe>,
    pub surface: Arc<SurfaceProbe>,
    pub decoder: Arc<DecoderProbe>,
}

pub fn test_config() -> ScannerConfig {
    ScannerConfig::default()
        .with_platform(HANDHELD.to_string())
        .with_require_handheld(true)
        .with_ready_poll_interval(Duration::from_millis(10))
        .with_ready_timeout(Duration::from_secs(1))
}

pub fn harness_with(config: ScannerConfig, grant: Grant, size: Size) -> Harness {
    let (provider, camera) = MockProvider::new(grant);
    let (surface_impl, surface) = MockSurface::new(size);
    let (decoder_impl, decoder) = MockDecoder::new();
    Harness {
        scanner: ScannerLifecycle::new(config, provider, surface_impl, decoder_impl),
        camera,
        surface,
        decoder,
    }
}

/// Camera granted, video ready at 640x480 on the first check.
pub fn harness() -> Harness {
    harness_with(test_config(), Grant::Allow, Size::new(640, 480))
}
