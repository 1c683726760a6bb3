//! Reflow a plain text file into a PDF and stamp overlays on it.
//!
//! ```text
//! cargo run --example annotate -- contract.txt contract.pdf \
//!     --name "Jane Doe" --checkmark assets/checkmark.png --signature assets/signature.png
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;

use pdf_annotate::{
    overlays_from_json, render_pdf, render_with, signature_block, Error, Font, Info, Overlay,
    OverlayScope, PdfSink, RenderOptions,
};

#[derive(Parser)]
#[command(name = "annotate")]
#[command(about = "Reflow text into a PDF and stamp overlays on its pages", long_about = None)]
struct Cli {
    /// UTF-8 text file, one paragraph per line
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Where to write the PDF
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// JSON file with render options
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// JSON file with an array of overlays
    #[arg(long, value_name = "FILE")]
    overlays: Option<PathBuf>,

    /// Signer's name; adds a signature block to the overlays
    #[arg(long)]
    name: Option<String>,

    /// Signing date as YYYY-MM-DD (defaults to today)
    #[arg(long, requires = "name")]
    date: Option<NaiveDate>,

    /// Checkmark image for the signature block
    #[arg(long, value_name = "FILE", default_value = "checkmark.png")]
    checkmark: PathBuf,

    /// Signature image for the signature block
    #[arg(long, value_name = "FILE", default_value = "signature.png")]
    signature: PathBuf,

    /// Only stamp the overlays on the last page
    #[arg(long)]
    last_page: bool,

    /// TrueType font to set the body text in instead of the options' font
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Document title written to the PDF metadata
    #[arg(long)]
    title: Option<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(&cli.input)?;
    let paragraphs: Vec<&str> = text.lines().collect();

    let mut options = match &cli.options {
        Some(path) => RenderOptions::from_json(&fs::read_to_string(path)?)?,
        None => RenderOptions::default(),
    };
    if cli.last_page {
        options = options.with_overlay_scope(OverlayScope::LastPage);
    }
    if let Some(title) = &cli.title {
        options = options.with_info(Info::new().title(title).clone());
    }

    let mut overlays = match &cli.overlays {
        Some(path) => overlays_from_json(&fs::read_to_string(path)?)?,
        None => Vec::new(),
    };
    if let Some(name) = &cli.name {
        let date = cli
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        overlays.extend(signature_block(name, date, &cli.checkmark, &cli.signature));
    }

    let pdf = match &cli.font {
        Some(path) => render_with_font(path, &paragraphs, &overlays, options)?,
        None => render_pdf(&paragraphs, &overlays, &options)?,
    };

    fs::write(&cli.output, &pdf)?;
    log::info!("wrote {} bytes to {}", pdf.len(), cli.output.display());
    Ok(())
}

/// Register an embedded font and set the body text in it
fn render_with_font(
    path: &Path,
    paragraphs: &[&str],
    overlays: &[Overlay],
    options: RenderOptions,
) -> Result<Vec<u8>, Error> {
    let font = Font::load_from_disk(path)?;
    let name = font.name().unwrap_or_else(|| "body".to_string());
    let size = options.font_size;
    let options = options.with_font(name.clone(), size);

    let mut sink = PdfSink::new();
    if let Some(info) = &options.info {
        sink = sink.with_info(info.clone());
    }
    sink.register_font(&name, font);

    render_with(paragraphs, overlays, &options, &mut sink)?;
    sink.finish()
}
