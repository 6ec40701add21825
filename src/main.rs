//! # thermoprint CLI
//!
//! Command-line interface for the upload server and one-off prints.
//!
//! ## Usage
//!
//! ```bash
//! # Run the upload server (POST /print with a multipart `image` field)
//! thermoprint serve --listen 0.0.0.0:5000
//!
//! # Print an image directly
//! thermoprint print photo.jpg
//!
//! # Preview what would be printed, without a printer
//! thermoprint print photo.jpg --preview preview.png
//!
//! # Print a line of text
//! thermoprint text "Hello" --align center --bold --lines 2
//!
//! # Capture the command stream instead of using USB
//! thermoprint print photo.jpg --output job.bin
//! ```
//!
//! Every option can also be set through a `THERMOPRINT_*` environment
//! variable; `RUST_LOG` controls log verbosity.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use thermoprint::{
    PrintError, Printer, PrinterConfig, pipeline,
    printer::UsbAddress,
    protocol::text::{Alignment, TextStyle},
    render::{self, dither::{self, DitheringAlgorithm}},
    server::{self, DEFAULT_MAX_UPLOAD_BYTES, ServerConfig, SharedPrinter},
    transport::{FileTransport, Transport, UsbTransport},
};

/// thermoprint - print images on ESC/POS thermal printers
#[derive(Parser, Debug)]
#[command(name = "thermoprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP upload server
    Serve {
        /// Address to listen on
        #[arg(long, env = "THERMOPRINT_LISTEN", default_value = "127.0.0.1:5000")]
        listen: String,

        /// Directory uploaded files are saved into (created if missing)
        #[arg(long, env = "THERMOPRINT_UPLOAD_DIR", default_value = "uploads")]
        upload_dir: PathBuf,

        /// Converted grayscale image, overwritten on every print
        #[arg(long, env = "THERMOPRINT_TEMP_FILE", default_value = "temp.png")]
        temp_file: PathBuf,

        /// Largest accepted upload in bytes
        #[arg(long, env = "THERMOPRINT_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
        max_upload_bytes: usize,

        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Print an image file
    Print {
        /// Image to print
        image: PathBuf,

        /// Converted grayscale image, overwritten on every print
        #[arg(long, env = "THERMOPRINT_TEMP_FILE", default_value = "temp.png")]
        temp_file: PathBuf,

        /// Save the dithered result as PNG instead of printing
        #[arg(long, value_name = "FILE")]
        preview: Option<PathBuf>,

        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Print a line of text
    Text {
        /// Text to print
        text: String,

        /// Alignment: left, center or right
        #[arg(long, default_value = "left")]
        align: Alignment,

        /// Print in bold
        #[arg(long)]
        bold: bool,

        /// Blank lines to feed after the text
        #[arg(long, default_value_t = 0)]
        lines: usize,

        #[command(flatten)]
        device: DeviceArgs,
    },
}

/// Where the printer is and how images are binarized.
#[derive(Args, Debug)]
struct DeviceArgs {
    /// USB vendor id
    #[arg(long, env = "THERMOPRINT_VENDOR_ID", default_value = "0x0483", value_parser = parse_u16)]
    vendor_id: u16,

    /// USB product id
    #[arg(long, env = "THERMOPRINT_PRODUCT_ID", default_value = "0x070b", value_parser = parse_u16)]
    product_id: u16,

    /// USB interface number
    #[arg(long, env = "THERMOPRINT_INTERFACE", default_value = "0", value_parser = parse_u8)]
    interface: u8,

    /// Bulk IN endpoint address
    #[arg(long, env = "THERMOPRINT_ENDPOINT_IN", default_value = "0x81", value_parser = parse_u8)]
    endpoint_in: u8,

    /// Bulk OUT endpoint address
    #[arg(long, env = "THERMOPRINT_ENDPOINT_OUT", default_value = "0x02", value_parser = parse_u8)]
    endpoint_out: u8,

    /// Write the command stream to this file or device node instead of USB
    #[arg(long, env = "THERMOPRINT_OUTPUT", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Dithering: floyd-steinberg, bayer or threshold
    #[arg(long, env = "THERMOPRINT_DITHER", default_value = "floyd-steinberg")]
    dither: DitheringAlgorithm,
}

impl DeviceArgs {
    fn printer_config(&self) -> PrinterConfig {
        PrinterConfig::POS58.with_usb(UsbAddress {
            vendor_id: self.vendor_id,
            product_id: self.product_id,
            interface: self.interface,
            endpoint_in: self.endpoint_in,
            endpoint_out: self.endpoint_out,
        })
    }

    /// Open the configured transport once and wrap it in a printer.
    fn open(&self) -> Result<SharedPrinter, PrintError> {
        let config = self.printer_config();
        let transport: Box<dyn Transport> = match &self.output {
            Some(path) => {
                info!("writing printer output to {}", path.display());
                Box::new(FileTransport::open(path)?)
            }
            None => Box::new(UsbTransport::open(config.usb)?),
        };
        Ok(Printer::new(transport, config).with_dithering(self.dither))
    }
}

/// Parse a number given in decimal or `0x` hex.
fn parse_u16(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid number '{}': {}", s, e))
}

fn parse_u8(s: &str) -> Result<u8, String> {
    let value = parse_u16(s)?;
    u8::try_from(value).map_err(|_| format!("'{}' does not fit in one byte", s))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("thermoprint=info,tower_http=info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PrintError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            upload_dir,
            temp_file,
            max_upload_bytes,
            device,
        } => {
            let printer = device.open()?;
            let config = ServerConfig {
                listen_addr: listen,
                upload_dir,
                temp_path: temp_file,
                max_upload_bytes,
            };

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config, printer))?;
        }

        Commands::Print {
            image,
            temp_file,
            preview,
            device,
        } => {
            if let Some(png_path) = preview {
                save_preview(&image, &png_path, &device)?;
                println!("Saved preview to {}", png_path.display());
                return Ok(());
            }

            let mut printer = device.open()?;
            pipeline::print_image(&mut printer, &image, &temp_file)?;
            println!("Printed {}", image.display());
        }

        Commands::Text {
            text,
            align,
            bold,
            lines,
            device,
        } => {
            let mut printer = device.open()?;
            let style = TextStyle::new().alignment(align).bold(bold);

            let mut line = text;
            if !line.ends_with('\n') {
                line.push('\n');
            }
            printer.text(&line, style)?;
            printer.line(lines)?;
        }
    }

    Ok(())
}

/// Run the pipeline and dithering without a printer and save the dots as PNG.
fn save_preview(image: &Path, png_path: &Path, device: &DeviceArgs) -> Result<(), PrintError> {
    let config = device.printer_config();
    let gray = pipeline::prepare(&pipeline::load_image(image)?, config.width_dots as u32)?;

    let raster = dither::rasterize(&gray, device.dither);
    let dots = render::raster_to_image(gray.width() as usize, gray.height() as usize, &raster);

    dots.save(png_path)
        .map_err(|e| PrintError::Image(format!("Failed to save PNG: {}", e)))?;

    Ok(())
}
