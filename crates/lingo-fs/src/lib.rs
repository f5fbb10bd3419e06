//! Filesystem primitives for the lingo translation client
//!
//! Provides normalized relative paths and safe I/O operations shared by the
//! core and the CLI.

pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use constants::ProjectPath;
pub use error::{Error, Result};
pub use io::{mtime_epoch, read_bytes, read_text, write_atomic, write_text};
pub use path::{NormalizedPath, canonical_root};
