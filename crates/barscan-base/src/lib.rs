pub mod logging;
pub mod size;

pub use logging::{RingLogger, StdoutLogger, init_ring_logger, init_stdout_logger};
pub use size::Size;

// Re-export log crate so downstream crates can use barscan_base::log::*
pub use log;
