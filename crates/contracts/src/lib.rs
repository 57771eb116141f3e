//! # Contracts
//!
//! Frozen interface contracts shared by every chanlog crate.
//!
//! - [`Channel`]: the capability every output sink implements
//! - Severity model: [`ChannelThreshold`], [`MessageSeverity`], [`MessageCategory`]
//! - [`LogRecord`]: one message as handed to a channel
//! - Declarative channel configuration ([`LogConfig`], [`ChannelConfig`])
//!
//! Business crates depend on this crate only; reverse dependencies are prohibited.

mod channel;
mod config;
mod error;
mod level;

pub use channel::*;
pub use config::*;
pub use error::*;
pub use level::*;
