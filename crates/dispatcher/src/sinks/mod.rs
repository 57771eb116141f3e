//! Channel implementations
//!
//! Contains ConsoleChannel, FileChannel, and JsonChannel.

mod console;
mod file;
mod json;

pub use self::console::ConsoleChannel;
pub use self::file::FileChannel;
pub use self::json::{JsonCallback, JsonChannel, JsonPayload};
