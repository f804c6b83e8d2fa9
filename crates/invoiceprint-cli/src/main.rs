mod logger;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use logger::ConsoleLogger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "invoiceprint",
    about = "Merge PDF invoices and arrange several of them on each A4 sheet",
    version
)]
struct Cli {
    /// Directory containing the PDF invoices
    directory: PathBuf,

    /// Output PDF file
    #[arg(short, long, default_value = pdf_nup::DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Invoices per sheet
    #[arg(short, long, default_value = "4", value_enum)]
    number: PerSheetArg,

    /// Compose files in descending name order
    #[arg(short, long)]
    reverse: bool,

    /// Output paper size
    #[arg(long, default_value = "a4", value_enum)]
    paper: PaperArg,

    /// Gap around and between invoices, in points
    #[arg(long, default_value_t = pdf_nup::DEFAULT_MARGIN_PT)]
    margin: f32,

    /// JSON sheet configuration (overrides --paper and --margin)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log every placement
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PerSheetArg {
    #[value(name = "2")]
    Two,
    #[value(name = "4")]
    Four,
    #[value(name = "6")]
    Six,
    #[value(name = "8")]
    Eight,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

impl From<PerSheetArg> for usize {
    fn from(arg: PerSheetArg) -> Self {
        match arg {
            PerSheetArg::Two => 2,
            PerSheetArg::Four => 4,
            PerSheetArg::Six => 6,
            PerSheetArg::Eight => 8,
        }
    }
}

impl From<PaperArg> for pdf_nup::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    ConsoleLogger::new(level).init()?;

    let sheet = match &cli.config {
        Some(path) => pdf_nup::SheetConfig::load(path)
            .await
            .with_context(|| format!("failed to load sheet configuration {}", path.display()))?,
        None => pdf_nup::SheetConfig {
            paper: cli.paper.into(),
            margin_pt: cli.margin,
        },
    };

    let options = pdf_nup::MergeOptions {
        pages_per_sheet: cli.number.into(),
        reverse: cli.reverse,
        sheet,
    };

    let files = pdf_nup::find_pdf_files(&cli.directory, options.reverse).await?;
    println!(
        "File order: {}",
        if options.reverse {
            "descending"
        } else {
            "ascending"
        }
    );

    let report = pdf_nup::merge_invoices(files, &options, &cli.output)
        .await
        .with_context(|| format!("failed to merge invoices into {}", cli.output.display()))?;

    let stats = &report.statistics;
    println!("Merge Statistics:");
    println!("  Source files: {}", stats.source_files);
    println!("  Invoices placed: {}", stats.source_pages);
    println!("  Skipped files: {}", stats.skipped_files);
    println!("  Invoices per sheet: {}", stats.pages_per_sheet);
    println!("  Output sheets: {}", stats.output_sheets);
    if !report.warnings.is_empty() {
        println!("  Warnings: {}", report.warnings.len());
    }
    println!("Merged to {}", cli.output.display());

    Ok(())
}
