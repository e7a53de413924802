use crate::MediaStream;

/// Sole owner of an acquired camera stream.
///
/// `release` stops every track and drops the stream. It is idempotent, and
/// it also runs on drop, so a handle can never leak a live camera.
#[derive(Debug)]
pub struct MediaHandle<S: MediaStream> {
    stream: Option<S>,
}

impl<S: MediaStream> MediaHandle<S> {
    pub fn new(stream: S) -> Self {
        Self { stream: Some(stream) }
    }

    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// True until `release` has run.
    pub fn is_held(&self) -> bool {
        self.stream.is_some()
    }

    pub fn live_tracks(&self) -> usize {
        self.stream.as_ref().map_or(0, MediaStream::live_tracks)
    }

    /// Stop all tracks. Returns `true` if this call did the release.
    pub fn release(&mut self) -> bool {
        match self.stream.take() {
            Some(mut stream) => {
                let tracks = stream.live_tracks();
                stream.stop();
                log::debug!("media handle released ({tracks} live tracks stopped)");
                true
            }
            None => false,
        }
    }
}

impl<S: MediaStream> Drop for MediaHandle<S> {
    fn drop(&mut self) {
        self.release();
    }
}
