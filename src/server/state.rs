//! Server state and configuration.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::error::PrintError;
use crate::pipeline;
use crate::printer::Printer;
use crate::transport::Transport;

/// A printer behind any transport, as held by the server.
pub type SharedPrinter = Printer<Box<dyn Transport>>;

/// Default cap on the request body (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:5000")
    pub listen_addr: String,
    /// Directory uploaded files are saved into
    pub upload_dir: PathBuf,
    /// Fixed path of the converted grayscale copy, overwritten every job
    pub temp_path: PathBuf,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5000".to_string(),
            upload_dir: PathBuf::from("uploads"),
            temp_path: PathBuf::from("temp.png"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Application state shared across handlers.
///
/// The printer is opened once at startup and every job runs while holding
/// its lock, so the temp file and the device are used by one job at a time.
pub struct AppState {
    pub config: ServerConfig,
    printer: Mutex<SharedPrinter>,
}

impl AppState {
    pub fn new(config: ServerConfig, printer: SharedPrinter) -> Self {
        Self {
            config,
            printer: Mutex::new(printer),
        }
    }

    /// Save an uploaded file under the upload directory and print it.
    ///
    /// Blocking: call from a blocking task. The saved upload and the temp
    /// file stay on disk afterwards.
    pub fn save_and_print(&self, filename: &str, contents: &[u8]) -> Result<PathBuf, PrintError> {
        std::fs::create_dir_all(&self.config.upload_dir)?;
        let path = self.config.upload_dir.join(filename);
        std::fs::write(&path, contents)?;
        info!(bytes = contents.len(), "saved upload to {}", path.display());

        self.print_file(&path)?;
        Ok(path)
    }

    /// Run the image pipeline on a file already on disk.
    pub fn print_file(&self, path: &Path) -> Result<(), PrintError> {
        // Printer keeps no per-job state, so a poisoned lock is still usable.
        let mut printer = self.printer.lock().unwrap_or_else(PoisonError::into_inner);
        pipeline::print_image(&mut *printer, path, &self.config.temp_path)
    }
}
