use crate::{DecodeError, ScanResult};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

/// Barcode symbologies a decoder can be asked to recognize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolFormat {
    QrCode,
    Ean13,
    Ean8,
    UpcA,
    UpcE,
    Code128,
    Code39,
    Code93,
    Itf,
    Codabar,
    DataMatrix,
    Pdf417,
    Aztec,
}

impl SymbolFormat {
    pub const ALL: [SymbolFormat; 13] = [
        SymbolFormat::QrCode,
        SymbolFormat::Ean13,
        SymbolFormat::Ean8,
        SymbolFormat::UpcA,
        SymbolFormat::UpcE,
        SymbolFormat::Code128,
        SymbolFormat::Code39,
        SymbolFormat::Code93,
        SymbolFormat::Itf,
        SymbolFormat::Codabar,
        SymbolFormat::DataMatrix,
        SymbolFormat::Pdf417,
        SymbolFormat::Aztec,
    ];

    /// Conventional tag, e.g. `EAN_13`.
    pub fn tag(&self) -> &'static str {
        match self {
            SymbolFormat::QrCode => "QR_CODE",
            SymbolFormat::Ean13 => "EAN_13",
            SymbolFormat::Ean8 => "EAN_8",
            SymbolFormat::UpcA => "UPC_A",
            SymbolFormat::UpcE => "UPC_E",
            SymbolFormat::Code128 => "CODE_128",
            SymbolFormat::Code39 => "CODE_39",
            SymbolFormat::Code93 => "CODE_93",
            SymbolFormat::Itf => "ITF",
            SymbolFormat::Codabar => "CODABAR",
            SymbolFormat::DataMatrix => "DATA_MATRIX",
            SymbolFormat::Pdf417 => "PDF_417",
            SymbolFormat::Aztec => "AZTEC",
        }
    }

    /// Linear (1D) symbologies, as opposed to 2D matrix codes.
    pub fn is_linear(&self) -> bool {
        !matches!(
            self,
            SymbolFormat::QrCode | SymbolFormat::DataMatrix | SymbolFormat::Pdf417 | SymbolFormat::Aztec
        )
    }
}

impl fmt::Display for SymbolFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SymbolFormat {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SymbolFormat::ALL
            .into_iter()
            .find(|format| format.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| DecodeError::Init(format!("unknown symbol format: {s}")))
    }
}

/// Configuration handed to the decoder when a session starts.
#[derive(Clone, Debug)]
pub struct DecodeHints {
    formats: Vec<SymbolFormat>,
    try_harder: bool,
    character_set: String,
}

impl Default for DecodeHints {
    fn default() -> Self {
        Self {
            formats: SymbolFormat::ALL.to_vec(),
            try_harder: true,
            character_set: "utf-8".to_string(),
        }
    }
}

impl DecodeHints {
    /// Set the allow-list of recognized formats.
    pub fn with_formats(mut self, formats: Vec<SymbolFormat>) -> Self {
        self.formats = formats;
        self
    }

    /// Trade speed for accuracy.
    pub fn with_try_harder(mut self, try_harder: bool) -> Self {
        self.try_harder = try_harder;
        self
    }

    /// Set the text encoding of decoded payloads.
    pub fn with_character_set(mut self, character_set: String) -> Self {
        self.character_set = character_set;
        self
    }

    pub fn formats(&self) -> &[SymbolFormat] {
        &self.formats
    }

    pub fn try_harder(&self) -> bool {
        self.try_harder
    }

    pub fn character_set(&self) -> &str {
        &self.character_set
    }

    pub fn allows(&self, format: SymbolFormat) -> bool {
        self.formats.contains(&format)
    }
}

/// One callback from a running decoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeEvent {
    Decoded(ScanResult),
    /// No symbol in this frame. Expected on nearly every frame before a match.
    NotFound,
    Error(String),
}

/// A decode event labelled with the activation that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedEvent {
    pub generation: u64,
    pub event: DecodeEvent,
}

/// Where a decoder delivers its events.
///
/// Once the owning session is cancelled the sink refuses further events,
/// so a decoder can use `emit`'s return value to stop its loop.
#[derive(Clone, Debug)]
pub struct DecodeSink {
    generation: u64,
    active: Arc<AtomicBool>,
    tx: mpsc::UnboundedSender<TaggedEvent>,
}

impl DecodeSink {
    pub(crate) fn new(
        generation: u64,
        active: Arc<AtomicBool>,
        tx: mpsc::UnboundedSender<TaggedEvent>,
    ) -> Self {
        Self { generation, active, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire) && !self.tx.is_closed()
    }

    /// Deliver an event. Returns `false` if the session is gone.
    pub fn emit(&self, event: DecodeEvent) -> bool {
        if !self.active.load(Ordering::Acquire) {
            return false;
        }
        self.tx
            .send(TaggedEvent {
                generation: self.generation,
                event,
            })
            .is_ok()
    }
}

type ResetFn = Box<dyn FnOnce() -> Result<(), DecodeError> + Send>;

/// The decoder's handle on a running decode loop.
pub struct DecodeSubscription {
    reset: Option<ResetFn>,
}

impl fmt::Debug for DecodeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeSubscription")
            .field("reset", &self.reset.is_some())
            .finish()
    }
}

impl DecodeSubscription {
    /// `reset` detaches the decoder from its video source.
    pub fn new(reset: impl FnOnce() -> Result<(), DecodeError> + Send + 'static) -> Self {
        Self {
            reset: Some(Box::new(reset)),
        }
    }

    /// A subscription that only relies on the sink being closed.
    pub fn detached() -> Self {
        Self { reset: None }
    }

    fn reset(&mut self) -> Result<(), DecodeError> {
        match self.reset.take() {
            Some(reset) => reset(),
            None => Ok(()),
        }
    }
}

/// A running decode loop owned by the lifecycle.
#[derive(Debug)]
pub struct DecodeSession {
    generation: u64,
    active: Arc<AtomicBool>,
    subscription: DecodeSubscription,
}

impl DecodeSession {
    pub(crate) fn new(generation: u64, active: Arc<AtomicBool>, subscription: DecodeSubscription) -> Self {
        Self {
            generation,
            active,
            subscription,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Close the sink and reset the decoder. Idempotent.
    pub fn cancel(&mut self) -> Result<(), DecodeError> {
        self.active.store(false, Ordering::Release);
        self.subscription.reset()
    }
}

impl Drop for DecodeSession {
    fn drop(&mut self) {
        if let Err(e) = self.cancel() {
            log::warn!("decode session {}: {e}", self.generation);
        }
    }
}

/// An external barcode decoder that can attach to a video surface.
pub trait BarcodeDecoder<V> {
    /// Start decoding frames from `surface`.
    ///
    /// The decoder calls `sink.emit` for every frame it processes until the
    /// returned subscription is reset or `emit` returns `false`.
    fn start(
        &mut self,
        hints: &DecodeHints,
        surface: &V,
        sink: DecodeSink,
    ) -> Result<DecodeSubscription, DecodeError>;
}
