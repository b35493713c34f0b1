// digest-cli-rs/src/main.rs
// Insight digest CLI - renders stored market analysis records as short bullet digests

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use config_rs::DigestSettings;
use insight_digest::render::{render_summaries, render_text};
use insight_digest::{build_digest, load_records, summarize_record, DigestOptions};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Render market analysis records as an insight digest
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON or NDJSON file with analysis records (stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Maximum number of records to render [env: INSIGHT_DIGEST_LIMIT]
    #[arg(long)]
    limit: Option<usize>,

    /// Maximum bullets per record [env: INSIGHT_DIGEST_BULLETS_PER_ANALYSIS]
    #[arg(long)]
    bullets: Option<usize>,

    /// Digest title [env: INSIGHT_DIGEST_TITLE]
    #[arg(long)]
    title: Option<String>,

    /// Digest subtitle [env: INSIGHT_DIGEST_SUBTITLE]
    #[arg(long)]
    subtitle: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print a one-line summary of every record instead of a digest
    #[arg(long)]
    dump: bool,
}

impl Args {
    fn digest_options(&self, settings: DigestSettings) -> DigestOptions {
        DigestOptions {
            limit: self.limit.unwrap_or(settings.limit),
            bullets_per_analysis: self.bullets.unwrap_or(settings.bullets_per_analysis),
            min_display_length: settings.min_display_length,
            title: self.title.clone().unwrap_or(settings.title),
            subtitle: self.subtitle.clone().or(settings.subtitle),
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read records from stdin")?;
            Ok(buffer)
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load environment variables
    config_rs::load_dotenv();

    let args = Args::parse();

    let raw = read_input(args.input.as_ref())?;
    let records = load_records(&raw).context("Failed to load analysis records")?;
    log::info!("Loaded {} analysis record(s)", records.len());

    if args.dump {
        let summaries: Vec<_> = records.iter().map(summarize_record).collect();
        match args.format {
            OutputFormat::Text => print!("{}", render_summaries(&summaries)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        }
        return Ok(());
    }

    let options = args.digest_options(DigestSettings::from_env());
    let digest = build_digest(&records, &options);

    if digest.is_empty() {
        log::warn!("No displayable insights in {} record(s)", records.len());
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&digest)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&digest)?),
    }

    Ok(())
}
