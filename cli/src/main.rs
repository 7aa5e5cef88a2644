//! pdfoutline CLI - PDF outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{self, BatchEvent, BatchOptions, BatchStatus};
use pdfoutline::{
    render, Document, DocumentStats, HeadingLevel, JsonFormat, OutlinePipeline, PdfSource,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract document outlines (title + headings) from PDF files", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract outlines for every PDF in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory (artifacts land next to the inputs if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Suppress the progress display
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show document baselines and the detected outline
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
        }) => cmd_extract(&input, output.as_deref(), compact),
        Some(Commands::Batch {
            input,
            output,
            compact,
            quiet,
        }) => cmd_batch(&input, output.as_deref(), compact, quiet),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract if input is provided
            if let Some(input) = cli.input {
                cmd_extract(&input, cli.output.as_deref(), cli.compact)
            } else {
                println!("{}", "Usage: pdfoutline <FILE> [OUTPUT]".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = pdfoutline::extract_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = render::to_json(&outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = batch::scan_dir(input)?;
    if files.is_empty() {
        println!("{} {}", "No PDF files in".yellow(), input.display());
        return Ok(());
    }

    let mut options = BatchOptions::new();
    if let Some(dir) = output {
        options = options.with_output_dir(dir);
    }
    if compact {
        options = options.with_format(JsonFormat::Compact);
    }

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(files.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let summary = batch::process_files(&files, &options, |event| match event {
        BatchEvent::Started { input } => {
            pb.set_message(file_label(&input));
        }
        BatchEvent::Finished { input, status, .. } => {
            match &status {
                BatchStatus::Extracted { .. } => {}
                BatchStatus::Degraded { reason } => {
                    pb.println(format!(
                        "{} {}: {}",
                        "degraded".yellow(),
                        file_label(&input),
                        reason
                    ));
                }
                BatchStatus::WriteFailed { reason } => {
                    pb.println(format!(
                        "{} {}: {}",
                        "write failed".red(),
                        file_label(&input),
                        reason
                    ));
                }
            }
            pb.inc(1);
        }
    })?;
    pb.finish_and_clear();

    println!(
        "{} {} extracted, {} degraded, {} write failures",
        "Done!".green().bold(),
        summary.succeeded,
        summary.degraded,
        summary.write_failures
    );

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = PdfSource::open(input)?;
    let document = Document::from_source(&source);
    let stats = DocumentStats::compute(&document);
    let outline = OutlinePipeline::new().run(&document);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), document.page_count);
    println!("{}: {}", "Text lines".bold(), document.line_count());

    println!();
    println!("{}", "Baselines".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!(
        "{}: {:.1}pt",
        "Median font size".bold(),
        stats.median_font_size
    );
    println!(
        "{}: {:.0}%",
        "Bold lines".bold(),
        stats.bold_frequency * 100.0
    );
    println!(
        "{}: {:.0}pt",
        "First page height".bold(),
        stats.first_page_height
    );

    println!();
    println!("{}", "Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    if outline.title.is_empty() {
        println!("{}: {}", "Title".bold(), "(none)".dimmed());
    } else {
        println!("{}: {}", "Title".bold(), outline.title);
    }
    println!("{}: {}", "Headings".bold(), outline.len());

    for entry in &outline.outline {
        let indent = match entry.level {
            HeadingLevel::H1 => "",
            HeadingLevel::H2 => "  ",
            HeadingLevel::H3 => "    ",
        };
        println!(
            "  {}{} {} {}",
            indent,
            entry.level.as_str().dimmed(),
            entry.text,
            format!("(p.{})", entry.page).dimmed()
        );
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pdfoutline".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("PDF outline extraction tool");
    println!();
    println!("License: MIT");
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
