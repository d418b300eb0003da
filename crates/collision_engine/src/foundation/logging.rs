//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};
