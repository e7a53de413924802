use crate::{
    BarcodeDecoder, DecodeEvent, DecodeSession, DecodeSink, RuntimeErrorPolicy, ScanError,
    ScanResult, ScannerConfig, ScannerState, ScannerView, TaggedEvent, check_device,
    readiness::wait_until_ready,
};
use barscan_camera::{CameraProvider, MediaHandle, VideoSurface};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tokio::sync::{mpsc, watch};

/// External inputs besides mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Tear everything down and start again from the device check.
    Retry,
    /// Tear everything down for good.
    Unmount,
}

// what woke the driving loop
enum Wake {
    Control(Option<Control>),
    Event(TaggedEvent),
    Mounted,
}

/// The scanner state machine and sole owner of its camera and decoder
/// resources.
///
/// Every activation gets a new generation number. Decode events carry the
/// generation of the session that produced them, and events from an older
/// generation are dropped, so nothing from before a retry can leak into
/// the new activation.
pub struct ScannerLifecycle<P, V, D>
where
    P: CameraProvider,
    V: VideoSurface<P::Stream>,
    D: BarcodeDecoder<V>,
{
    config: ScannerConfig,
    provider: P,
    surface: V,
    decoder: D,
    state: ScannerState,
    generation: u64,
    media: Option<MediaHandle<P::Stream>>,
    session: Option<DecodeSession>,
    events_tx: mpsc::UnboundedSender<TaggedEvent>,
    events_rx: mpsc::UnboundedReceiver<TaggedEvent>,
    view_tx: watch::Sender<ScannerView>,
    unmounted: bool,
}

impl<P, V, D> ScannerLifecycle<P, V, D>
where
    P: CameraProvider,
    V: VideoSurface<P::Stream>,
    D: BarcodeDecoder<V>,
{
    pub fn new(config: ScannerConfig, provider: P, surface: V, decoder: D) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (view_tx, _) = watch::channel(ScannerView::default());
        Self {
            config,
            provider,
            surface,
            decoder,
            state: ScannerState::Idle,
            generation: 1,
            media: None,
            session: None,
            events_tx,
            events_rx,
            view_tx,
            unmounted: false,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn result(&self) -> Option<&ScanResult> {
        match &self.state {
            ScannerState::Scanned(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&ScanError> {
        match &self.state {
            ScannerState::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn has_media(&self) -> bool {
        self.media.as_ref().is_some_and(MediaHandle::is_held)
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Current state vector for the presentation layer.
    pub fn view(&self) -> ScannerView {
        ScannerView::new(&self.state, self.has_media())
    }

    /// Receive a new view on every transition.
    pub fn subscribe(&self) -> watch::Receiver<ScannerView> {
        self.view_tx.subscribe()
    }

    /// Activate the widget: run the device check, request the camera, wait
    /// for the first frame and start decoding.
    ///
    /// Returns once the lifecycle is `Scanning` or `Failed`. Only valid from
    /// `Idle`; otherwise nothing happens.
    pub async fn mount(&mut self) -> &ScannerState {
        if self.unmounted || self.state != ScannerState::Idle {
            log::debug!("scanner[{}]: mount ignored in {}", self.generation, self.state);
            return &self.state;
        }

        self.set_state(ScannerState::CheckingDevice);
        if let Err(error) = check_device(&self.config) {
            self.fail(error);
            return &self.state;
        }

        self.set_state(ScannerState::RequestingPermission);
        let stream = match self.provider.request(self.config.constraints()).await {
            Ok(stream) => stream,
            Err(error) => {
                self.fail(ScanError::PermissionDenied(error.message()));
                return &self.state;
            }
        };

        // from here on the stream is released on every exit path
        self.surface.attach(&stream);
        if let Some(mut stale) = self.media.replace(MediaHandle::new(stream)) {
            stale.release();
        }
        self.set_state(ScannerState::AwaitingVideoReady);

        if let Err(error) = self.surface.play().await {
            self.fail(ScanError::VideoNotReady(error.message()));
            return &self.state;
        }

        let surface = &self.surface;
        let ready = wait_until_ready(
            || surface.natural_size(),
            self.config.ready_poll_interval(),
            self.config.ready_timeout(),
        )
        .await;
        if let Err(error) = ready {
            self.fail(error);
            return &self.state;
        }

        let active = Arc::new(AtomicBool::new(true));
        let sink = DecodeSink::new(self.generation, Arc::clone(&active), self.events_tx.clone());
        match self.decoder.start(self.config.hints(), &self.surface, sink) {
            Ok(subscription) => {
                self.session = Some(DecodeSession::new(self.generation, active, subscription));
                self.set_state(ScannerState::Scanning);
            }
            Err(error) => self.fail(ScanError::DecoderInitFailed(error.message().to_string())),
        }

        &self.state
    }

    /// Apply one decoder callback.
    pub fn handle_event(&mut self, tagged: TaggedEvent) {
        if tagged.generation != self.generation {
            log::debug!(
                "scanner[{}]: dropping event from generation {}",
                self.generation,
                tagged.generation
            );
            return;
        }
        if self.state != ScannerState::Scanning {
            return;
        }

        match tagged.event {
            DecodeEvent::NotFound => {}
            DecodeEvent::Decoded(result) => {
                log::info!("scanner[{}]: decoded {} {}", self.generation, result.format, result.text);
                // the camera stays on until unmount
                self.stop_session();
                self.set_state(ScannerState::Scanned(result));
            }
            DecodeEvent::Error(message) => match self.config.runtime_error_policy() {
                RuntimeErrorPolicy::Terminal => self.fail(ScanError::DecoderRuntimeError(message)),
                RuntimeErrorPolicy::Ignore => {
                    log::warn!("scanner[{}]: decoder error ignored: {message}", self.generation)
                }
            },
        }
    }

    /// Wait for the next decoder callback of any generation.
    pub async fn next_event(&mut self) -> Option<TaggedEvent> {
        self.events_rx.recv().await
    }

    /// Feed decoder callbacks until the activation leaves `Scanning`.
    pub async fn settle(&mut self) -> &ScannerState {
        while self.state == ScannerState::Scanning {
            match self.events_rx.recv().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
        &self.state
    }

    /// Release everything, clear the result and failure, and go back to
    /// `Idle` under a new generation.
    pub fn reset(&mut self) {
        if self.unmounted {
            return;
        }
        self.teardown();
        self.generation += 1;
        log::info!("scanner[{}]: reset", self.generation);
        self.set_state(ScannerState::Idle);
    }

    /// `reset` followed by a fresh `mount`.
    pub async fn retry(&mut self) -> &ScannerState {
        self.reset();
        self.mount().await
    }

    /// Release every resource. Only the first call does anything.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        self.unmounted = true;
        self.teardown();
        log::info!("scanner[{}]: unmounted in {}", self.generation, self.state);
        self.publish();
    }

    /// Drive the lifecycle until unmounted.
    ///
    /// Mounts, then feeds decoder callbacks, while listening on `controls`.
    /// A control preempts whatever is in flight, including a pending
    /// camera request or readiness poll. A closed control channel counts
    /// as `Unmount`.
    pub async fn run(&mut self, controls: &mut mpsc::UnboundedReceiver<Control>) {
        while !self.unmounted {
            let wake = match self.state {
                ScannerState::Idle => {
                    tokio::select! {
                        biased;
                        control = controls.recv() => Wake::Control(control),
                        _ = self.mount() => Wake::Mounted,
                    }
                }
                ScannerState::Scanning => {
                    tokio::select! {
                        biased;
                        control = controls.recv() => Wake::Control(control),
                        Some(event) = self.events_rx.recv() => Wake::Event(event),
                    }
                }
                _ => Wake::Control(controls.recv().await),
            };

            match wake {
                Wake::Mounted => {}
                Wake::Event(event) => self.handle_event(event),
                Wake::Control(Some(Control::Retry)) => self.reset(),
                Wake::Control(Some(Control::Unmount) | None) => self.unmount(),
            }
        }
    }

    fn fail(&mut self, error: ScanError) {
        log::error!("scanner[{}]: {error}", self.generation);
        self.teardown();
        self.set_state(ScannerState::Failed(error));
    }

    fn stop_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.cancel() {
                log::warn!("scanner[{}]: decoder did not stop cleanly: {e}", self.generation);
            }
        }
    }

    fn teardown(&mut self) {
        self.stop_session();
        self.surface.detach();
        if let Some(mut media) = self.media.take() {
            media.release();
        }
    }

    fn set_state(&mut self, state: ScannerState) {
        log::info!("scanner[{}]: {} -> {}", self.generation, self.state, state);
        self.state = state;
        self.publish();
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view());
    }
}
