//! Host-facing runtime
//!
//! The [`Builder`](builder::Builder) collects modules until the host signals
//! initialization, then finalizes them into a
//! [`BlockRegistry`](registry::BlockRegistry) that serves the host's later
//! callbacks.

pub mod assets;
pub mod builder;
pub mod host;
pub mod options;
pub mod registry;

pub use builder::{Builder, BuilderError};
pub use host::{Host, HostError, MemoryHost};
pub use options::{BuilderOptions, OptionsError};
pub use registry::BlockRegistry;
