use crate::{CameraConstraints, CameraError, Frame};
use barscan_base::Size;
use std::sync::Arc;
use tokio::sync::watch;

/// Receiving end of a stream's latest-frame channel.
pub type FrameReceiver = watch::Receiver<Option<Arc<Frame>>>;

/// A live camera stream made of zero or more tracks.
pub trait MediaStream {
    /// Number of tracks that are still capturing.
    fn live_tracks(&self) -> usize;

    /// Stop every track. Calling this on a stopped stream does nothing.
    fn stop(&mut self);
}

/// Grants camera streams.
///
/// `request` may wait for as long as the platform needs (a permission
/// prompt, a slow device) and may be rejected.
#[allow(async_fn_in_trait)]
pub trait CameraProvider {
    type Stream: MediaStream;

    /// Request a stream satisfying `constraints`.
    async fn request(&mut self, constraints: &CameraConstraints) -> Result<Self::Stream, CameraError>;
}

/// Where a stream is displayed, and where decoders read frames from.
#[allow(async_fn_in_trait)]
pub trait VideoSurface<S: MediaStream> {
    /// Bind the surface to a stream, replacing any previous binding.
    fn attach(&mut self, stream: &S);

    /// Begin playback of the attached stream.
    async fn play(&mut self) -> Result<(), CameraError>;

    /// Natural size of the current frame, zero until one is available.
    fn natural_size(&self) -> Size;

    /// Unbind the surface. Safe to call when nothing is attached.
    fn detach(&mut self);
}

/// Streams that publish their most recent frame.
pub trait FrameSource {
    fn frames(&self) -> FrameReceiver;
}
