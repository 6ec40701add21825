//! # File Transport
//!
//! Writes the command stream to a path: either a printer character device
//! exposed by the kernel (`/dev/usb/lp0`) or a regular file, which captures
//! the exact bytes a job would send.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Transport;
use crate::error::PrintError;

pub struct FileTransport {
    file: File,
    path: PathBuf,
}

impl FileTransport {
    /// Open `path` for writing, creating it if it is a regular file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PrintError> {
        let path = path.as_ref();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| {
                PrintError::Transport(format!("Failed to open {}: {}", path.display(), e))
            })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Transport for FileTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PrintError> {
        self.file
            .write_all(data)
            .and_then(|_| self.file.flush())
            .map_err(|e| {
                PrintError::Transport(format!("Write to {} failed: {}", self.path.display(), e))
            })?;

        debug!(bytes = data.len(), path = %self.path.display(), "wrote to file transport");
        Ok(())
    }
}
