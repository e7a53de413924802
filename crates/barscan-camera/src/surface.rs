use crate::{CameraError, Frame, FrameReceiver, FrameSource, MediaStream, VideoSurface};
use barscan_base::Size;
use std::sync::Arc;

/// A `VideoSurface` for streams that publish frames through a channel.
///
/// The natural size is the size of the most recent frame once playback has
/// started, so it stays zero until the first frame arrives. Decoders read
/// frames back through `latest_frame` or `subscribe`.
#[derive(Debug, Default)]
pub struct FrameSurface {
    frames: Option<FrameReceiver>,
    playing: bool,
}

impl FrameSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.frames.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The most recent frame, if playing and one has arrived.
    pub fn latest_frame(&self) -> Option<Arc<Frame>> {
        if !self.playing {
            return None;
        }
        self.frames.as_ref().and_then(|rx| rx.borrow().clone())
    }

    /// A new receiver on the attached stream's frames.
    pub fn subscribe(&self) -> Option<FrameReceiver> {
        self.frames.clone()
    }
}

impl<S: MediaStream + FrameSource> VideoSurface<S> for FrameSurface {
    fn attach(&mut self, stream: &S) {
        self.frames = Some(stream.frames());
        self.playing = false;
    }

    async fn play(&mut self) -> Result<(), CameraError> {
        if self.frames.is_none() {
            return Err(CameraError::Playback("no stream attached".to_string()));
        }
        self.playing = true;
        Ok(())
    }

    fn natural_size(&self) -> Size {
        self.latest_frame().map_or(Size::ZERO, |frame| frame.size)
    }

    fn detach(&mut self) {
        self.frames = None;
        self.playing = false;
    }
}
