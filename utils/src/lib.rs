//! Shared utilities for processes that host a ballot.

pub mod logging;

pub use logging::{init_logging, try_init_logging, LogFormat, LoggingError};
