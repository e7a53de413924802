//! Camera barcode-scan lifecycle.
//!
//! `ScannerLifecycle` drives one scanning widget from mount to either a
//! single decoded result or a terminal failure:
//!
//! ```text
//! Idle -> CheckingDevice -> RequestingPermission -> AwaitingVideoReady -> Scanning
//!                                                                           |
//!                                                              Scanned <----+----> Failed
//! ```
//!
//! Camera access goes through `barscan_camera::CameraProvider`, decoding
//! through a `BarcodeDecoder`. The lifecycle owns the acquired stream and
//! the running decode session and releases both on retry, failure and
//! unmount.

pub mod config;
pub mod decoder;
pub mod device;
pub mod error;
pub mod lifecycle;
pub mod readiness;
pub mod state;

pub use config::{RuntimeErrorPolicy, ScannerConfig};
pub use decoder::{
    BarcodeDecoder, DecodeEvent, DecodeHints, DecodeSession, DecodeSink, DecodeSubscription,
    SymbolFormat, TaggedEvent,
};
pub use device::{check_device, is_handheld};
pub use error::{DecodeError, FailureStage, ScanError};
pub use lifecycle::{Control, ScannerLifecycle};
pub use readiness::wait_until_ready;
pub use state::{ScanResult, ScannerState, ScannerView};
