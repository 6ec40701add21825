//! # HTTP Server for Image Printing
//!
//! Accepts image uploads and prints them.
//!
//! ## Usage
//!
//! ```bash
//! thermoprint serve --listen 0.0.0.0:5000
//! curl -F image=@photo.jpg http://localhost:5000/print
//! ```
//!
//! ## Endpoints
//!
//! | Method | Path | Body | Responses |
//! |--------|------|------|-----------|
//! | POST | `/print` | multipart, file field `image` | 200 `{"message"}`, 400/500 `{"error"}` |

mod filename;
mod handlers;
mod state;

pub use filename::secure_filename;
pub use handlers::print::{NO_FILE_SELECTED, NO_IMAGE_PART, PRINTED};
pub use state::{AppState, DEFAULT_MAX_UPLOAD_BYTES, ServerConfig, SharedPrinter};

use axum::{Router, extract::DefaultBodyLimit, routing::post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::PrintError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route(
            "/print",
            post(handlers::print::print).layer(DefaultBodyLimit::max(body_limit)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server with an already opened printer.
///
/// ## Example
///
/// ```no_run
/// use thermoprint::printer::{Printer, PrinterConfig};
/// use thermoprint::server::{serve, ServerConfig};
/// use thermoprint::transport::{Transport, UsbTransport};
///
/// # async fn example() -> Result<(), thermoprint::PrintError> {
/// let config = PrinterConfig::POS58;
/// let transport: Box<dyn Transport> = Box::new(UsbTransport::open(config.usb)?);
/// let printer = Printer::new(transport, config);
///
/// serve(ServerConfig::default(), printer).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig, printer: SharedPrinter) -> Result<(), PrintError> {
    std::fs::create_dir_all(&config.upload_dir)?;

    info!(
        printer = printer.config().name,
        upload_dir = %config.upload_dir.display(),
        temp_file = %config.temp_path.display(),
        "thermoprint HTTP server starting"
    );

    let listen_addr = config.listen_addr.clone();
    let app = router(Arc::new(AppState::new(config, printer)));

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| PrintError::Transport(format!("Failed to bind to {}: {}", listen_addr, e)))?;

    info!("listening on http://{}/print", listen_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| PrintError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
