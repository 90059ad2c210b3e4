//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing the CLI
//! to be tested with mock implementations.

use std::io::{self, Read};
use std::path::Path;

/// Read-only filesystem abstraction; flocky never writes editor state.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Read all of standard input.
    fn read_stdin(&self) -> io::Result<String>;
}

/// Real filesystem implementation.
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_stdin(&self) -> io::Result<String> {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}
