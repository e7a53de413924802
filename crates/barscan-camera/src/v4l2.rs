use crate::{
    CameraConstraints, CameraError, CameraProvider, FacingMode, Frame, FrameReceiver, FrameSource,
    MediaStream, PixelFormat,
};
use barscan_base::Size;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tokio::sync::watch;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

/// Grants streams from a V4L2 capture device.
///
/// There is no permission prompt on V4L2; opening the device node either
/// succeeds or fails with the OS error, which is mapped to
/// `CameraError::Permission` for `EACCES`.
#[derive(Debug, Default)]
pub struct V4l2Provider;

impl V4l2Provider {
    pub fn new() -> Self {
        Self
    }
}

impl CameraProvider for V4l2Provider {
    type Stream = V4l2Stream;

    async fn request(&mut self, constraints: &CameraConstraints) -> Result<V4l2Stream, CameraError> {
        V4l2Stream::open(constraints.clone())
    }
}

/// A single-track V4L2 capture stream.
pub struct V4l2Stream {
    constraints: CameraConstraints,
    size: Size,
    format: PixelFormat,
    cancel: Arc<AtomicBool>,
    frames: FrameReceiver,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Stream")
            .field("constraints", &self.constraints)
            .field("size", &self.size)
            .field("format", &self.format)
            .field("thread_handle", &self.thread_handle.is_some())
            .finish()
    }
}

impl MediaStream for V4l2Stream {
    fn live_tracks(&self) -> usize {
        if self.thread_handle.is_some() && !self.cancel.load(Ordering::Relaxed) {
            1
        } else {
            0
        }
    }

    fn stop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);

        // the capture thread notices the flag after its current frame
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                log::error!("v4l2: capture thread panicked");
            }
        }
    }
}

impl FrameSource for V4l2Stream {
    fn frames(&self) -> FrameReceiver {
        self.frames.clone()
    }
}

impl Drop for V4l2Stream {
    fn drop(&mut self) {
        self.stop();
    }
}

impl V4l2Stream {
    /// Open the device at `constraints.device()` and start capturing.
    ///
    /// Negotiates MJPEG at the target size first and falls back to YUYV.
    ///
    /// # Errors
    ///
    /// - `CameraError::Permission` if the device node is not accessible
    /// - `CameraError::Device` if it does not exist or cannot be configured
    /// - `CameraError::Constraint` if neither format is available, or the
    ///   negotiated size is outside the requested bounds
    pub fn open(constraints: CameraConstraints) -> Result<Self, CameraError> {
        if constraints.facing() != FacingMode::Any {
            log::debug!(
                "v4l2: facing preference {:?} not supported, using {}",
                constraints.facing(),
                constraints.device()
            );
        }

        let device = Device::with_path(constraints.device())?;
        let (size, format) = Self::negotiate(&device, &constraints)?;

        if !constraints.accepts(size) {
            return Err(CameraError::Constraint(format!(
                "device offers {size}, outside the requested bounds"
            )));
        }

        let params = v4l::video::capture::Parameters::with_fps(constraints.frame_rate());
        Capture::set_params(&device, &params)?;

        let (tx, rx) = watch::channel(None);
        let cancel = Arc::new(AtomicBool::new(false));
        let buffer_count = constraints.buffer_count();

        let handle = thread::spawn({
            let cancel = Arc::clone(&cancel);
            move || {
                if let Err(e) = Self::capture_loop(device, size, format, buffer_count, tx, cancel) {
                    log::error!("v4l2: capture failed: {e}");
                }
            }
        });

        log::info!("v4l2: streaming {} {:?} from {}", size, format, constraints.device());

        Ok(Self {
            constraints,
            size,
            format,
            cancel,
            frames: rx,
            thread_handle: Some(handle),
        })
    }

    fn negotiate(
        device: &Device,
        constraints: &CameraConstraints,
    ) -> Result<(Size, PixelFormat), CameraError> {
        let target = constraints.target_size();

        for (fourcc, format) in [(b"MJPG", PixelFormat::Mjpeg), (b"YUYV", PixelFormat::Yuyv)] {
            let requested = Format::new(target.width, target.height, FourCC::new(fourcc));
            let actual = Capture::set_format(device, &requested)?;
            if actual.fourcc == FourCC::new(fourcc) {
                return Ok((Size::new(actual.width, actual.height), format));
            }
        }

        Err(CameraError::Constraint(
            "no supported pixel format (tried MJPEG and YUYV)".to_string(),
        ))
    }

    // runs on the capture thread until cancelled or every receiver is gone
    fn capture_loop(
        device: Device,
        size: Size,
        format: PixelFormat,
        buffer_count: u32,
        tx: watch::Sender<Option<Arc<Frame>>>,
        cancel: Arc<AtomicBool>,
    ) -> Result<(), CameraError> {
        let mut stream = MmapStream::with_buffers(&device, Type::VideoCapture, buffer_count)?;

        while !cancel.load(Ordering::Relaxed) {
            let (data, metadata) = CaptureStream::next(&mut stream)?;

            // the mmap buffer is only valid until the next call
            let used = (metadata.bytesused as usize).min(data.len());
            let used = if used == 0 { data.len() } else { used };
            let frame = Frame::new(size, format, data[..used].to_vec());

            if tx.is_closed() {
                break;
            }
            tx.send_replace(Some(Arc::new(frame)));
        }

        Ok(())
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn constraints(&self) -> &CameraConstraints {
        &self.constraints
    }
}
