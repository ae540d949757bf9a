use anyhow::Context;
use clap::{Parser, ValueEnum};
use quire_core::types::Book;
use quire_core::{ExportFormat, Exporter, sanitize_filename};
use quire_resource::FilesystemResourceProvider;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Pdf,
    #[value(alias = "docx")]
    Doc,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Pdf => ExportFormat::Pdf,
            Format::Doc => ExportFormat::Docx,
        }
    }
}

/// Renders a stored book record to PDF or DOCX.
#[derive(Debug, Parser)]
#[command(name = "quire-export", version)]
struct Args {
    /// Book record (JSON, as stored by the authoring app)
    book: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pdf")]
    format: Format,

    /// Output file; defaults to the sanitized title in the current directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory that cover paths like `/uploads/cover.png` resolve against
    #[arg(long, env = "QUIRE_ASSETS_DIR", default_value = ".")]
    assets: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let format = ExportFormat::from(args.format);

    let json = std::fs::read_to_string(&args.book)
        .with_context(|| format!("Failed to read {}", args.book.display()))?;
    let book: Book = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a valid book record", args.book.display()))?;

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(format!("{}.{}", sanitize_filename(&book.title), format.extension()))
    });

    let exporter = Exporter::new(Arc::new(FilesystemResourceProvider::new(&args.assets)));
    let file = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let (mut writer, report) = exporter.export(&book, format, BufWriter::new(file))?;
    writer.flush()?;

    for skipped in &report.skipped {
        log::warn!(
            "Chapter {} ('{}') was left out: {}",
            skipped.index + 1,
            skipped.title,
            skipped.error
        );
    }
    println!(
        "Wrote {} ({} chapters, {} skipped)",
        output.display(),
        report.rendered_chapters,
        report.skipped.len()
    );
    Ok(())
}
