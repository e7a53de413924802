//! Camera acquisition seam for barscan.
//!
//! This crate describes what the scanner needs from a camera: a provider
//! that turns `CameraConstraints` into a live `MediaStream`, a
//! `VideoSurface` the stream is bound to, and a `MediaHandle` that owns the
//! stream and guarantees its tracks are stopped exactly once. A V4L2
//! backend is available behind the `v4l2` feature.

pub mod config;
pub mod convert;
pub mod error;
pub mod frame;
pub mod handle;
pub mod surface;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::{CameraConstraints, DimensionRange, FacingMode};
pub use error::CameraError;
pub use frame::{Frame, PixelFormat};
pub use handle::MediaHandle;
pub use surface::FrameSurface;
pub use traits::{CameraProvider, FrameReceiver, FrameSource, MediaStream, VideoSurface};

#[cfg(feature = "v4l2")]
pub use v4l2::{V4l2Provider, V4l2Stream};
