//! Shared utilities for the camp tools.

pub mod logging;
pub mod summary;
pub mod time;

pub use logging::{init_logging, LogFormat, LoggingError};
pub use summary::format_amounts;
pub use time::{format_duration, format_stream_period};
