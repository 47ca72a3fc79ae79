use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use reqdiff_diff::{
    DiffOptions, SectionProfile, Side, diff_documents, diff_section, format_markdown_report,
};
use reqdiff_doc::{Document, DocumentFormat, parse_with_format};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Path value meaning "this version does not exist".
const ABSENT: &str = "-";

#[derive(Debug, Parser)]
#[command(name = "request-diff")]
#[command(about = "Compare two versions of an API request document")]
struct Cli {
    /// Old version, or `-` when the request did not exist.
    file_a: PathBuf,
    /// New version, or `-` when the request was removed.
    file_b: PathBuf,

    /// Print the section summary as JSON.
    #[arg(long)]
    json: bool,

    /// Input format; guessed from the file extension when omitted.
    #[arg(long, value_enum)]
    format: Option<CliFormat>,

    #[arg(long, value_enum, default_value_t = CliProfile::Git)]
    profile: CliProfile,

    /// Print the detailed view of one section as JSON.
    #[arg(long)]
    section: Option<String>,

    #[arg(long, value_enum, default_value_t = CliSide::New, requires = "section")]
    side: CliSide,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliProfile {
    Git,
    Openapi,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSide {
    Old,
    New,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let old = load_document(&cli.file_a, cli.format)?;
    let new = load_document(&cli.file_b, cli.format)?;

    let profile = match cli.profile {
        CliProfile::Git => SectionProfile::Git,
        CliProfile::Openapi => SectionProfile::OpenApi,
    };
    let options = DiffOptions::new(profile);

    if let Some(section) = cli.section.as_deref() {
        let side = match cli.side {
            CliSide::Old => Side::Old,
            CliSide::New => Side::New,
        };
        let view = diff_section(old.as_ref(), new.as_ref(), section, side, options)?;
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let diff = diff_documents(old.as_ref(), new.as_ref(), options);
    tracing::debug!(changed = diff.changed_sections().len(), "diff complete");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        println!(
            "{}",
            format_markdown_report(
                &diff,
                &cli.file_a.display().to_string(),
                &cli.file_b.display().to_string(),
            )
        );
    }

    Ok(())
}

fn load_document(
    path: &Path,
    format: Option<CliFormat>,
) -> Result<Option<Document>, std::io::Error> {
    if path.as_os_str() == ABSENT {
        return Ok(None);
    }

    let text = fs::read_to_string(path)?;
    let format = match format {
        Some(CliFormat::Json) => DocumentFormat::Json,
        Some(CliFormat::Yaml) => DocumentFormat::Yaml,
        None => DocumentFormat::from_path(path),
    };
    tracing::debug!(path = %path.display(), ?format, "loading document");

    Ok(Some(
        parse_with_format(&text, format).with_source_name(path.display().to_string()),
    ))
}
