//! Source implementations
//!
//! Contains ConsoleIo and FileSource.

mod console;
mod file;

pub use self::console::ConsoleIo;
pub use self::file::FileSource;
