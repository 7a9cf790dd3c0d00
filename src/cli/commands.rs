use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::export::{
    DEFAULT_MAX_SIZE_MB, DEFAULT_OUTPUT_DIR, ExportConfig, OutputFormat, encode_document,
    export_archive, find_document, format_timestamp, group_by_month,
};
use crate::linearize::{SequenceSummary, linearize_conversation};
use crate::parsers::parse_archive_file;
use crate::utils::format_path_with_tilde;

const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Parser)]
#[command(name = "chat-archive-yaml")]
#[command(version = "0.1.0")]
#[command(about = "Convert exported conversation archives into linearized YAML", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every conversation into one file per conversation, grouped by month
    Convert {
        /// Path to conversations.json
        archive: PathBuf,

        /// Directory that receives the YYYY-MM folders
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Refuse archives larger than this many megabytes
        #[arg(long, default_value_t = DEFAULT_MAX_SIZE_MB)]
        max_size_mb: u64,
    },
    /// Print a single linearized conversation to stdout
    Show {
        /// Path to conversations.json
        archive: PathBuf,

        /// Conversation id
        id: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Refuse archives larger than this many megabytes
        #[arg(long, default_value_t = DEFAULT_MAX_SIZE_MB)]
        max_size_mb: u64,
    },
    /// Show statistics about the archive
    Stats {
        /// Path to conversations.json
        archive: PathBuf,

        /// Refuse archives larger than this many megabytes
        #[arg(long, default_value_t = DEFAULT_MAX_SIZE_MB)]
        max_size_mb: u64,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert { archive, output, format, max_size_mb }) => {
            let config = ExportConfig {
                archive_path: archive,
                output_dir: output,
                format,
                max_file_bytes: mb_to_bytes(max_size_mb),
            };
            convert(&config)?;
        }
        Some(Commands::Show { archive, id, format, max_size_mb }) => {
            show_conversation(&archive, &id, format, mb_to_bytes(max_size_mb))?;
        }
        Some(Commands::Stats { archive, max_size_mb }) => {
            show_stats(&archive, mb_to_bytes(max_size_mb))?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn mb_to_bytes(megabytes: u64) -> u64 {
    megabytes.saturating_mul(BYTES_PER_MB)
}

fn convert(config: &ExportConfig) -> Result<()> {
    let summary = export_archive(config)?;

    println!("Exported {} conversations", summary.written());
    for (month, count) in &summary.months {
        println!("  {}: {}", month, count);
    }
    if summary.failed > 0 {
        println!("Skipped {} malformed conversations", summary.failed);
    }
    println!("Output directory: {}", format_path_with_tilde(&config.output_dir));

    Ok(())
}

fn show_conversation(archive: &Path, id: &str, format: OutputFormat, max_bytes: u64) -> Result<()> {
    let conversations = parse_archive_file(archive, max_bytes)?;
    let document = find_document(&conversations, id)?;
    print!("{}", encode_document(&document, format)?);
    Ok(())
}

fn show_stats(archive: &Path, max_bytes: u64) -> Result<()> {
    let conversations = parse_archive_file(archive, max_bytes)?;

    let mut linearized = 0;
    let mut malformed = 0;
    let mut totals = SequenceSummary::default();
    for conversation in &conversations {
        match linearize_conversation(conversation) {
            Ok(sequence) => {
                let summary = SequenceSummary::of(&sequence);
                linearized += 1;
                totals.messages += summary.messages;
                totals.branch_points += summary.branch_points;
                totals.max_branch_depth = totals.max_branch_depth.max(summary.max_branch_depth);
            }
            Err(e) => {
                warn!(conversation = %conversation.id, "Malformed conversation: {}", e);
                malformed += 1;
            }
        }
    }

    println!("Conversation Archive Statistics");
    println!("===============================");
    println!("Conversations: {}", conversations.len());
    println!("  Linearized: {}", linearized);
    println!("  Malformed: {}", malformed);
    println!("Messages: {}", totals.messages);
    println!("Branch points: {}", totals.branch_points);
    println!("Deepest branching: {}", totals.max_branch_depth);

    let groups = group_by_month(&conversations);
    if !groups.is_empty() {
        println!();
        println!("Conversations per month:");
        for (month, group) in &groups {
            println!("  {}: {}", month, group.len());
        }
    }

    if let Some(oldest) = conversations.iter().map(|c| c.create_time).min() {
        println!("Oldest conversation: {}", format_timestamp(&oldest));
    }
    if let Some(newest) = conversations.iter().map(|c| c.create_time).max() {
        println!("Newest conversation: {}", format_timestamp(&newest));
    }

    Ok(())
}
