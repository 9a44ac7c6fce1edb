//! wad2 CLI - Command-line tool for inspecting WAD2 archives.
//!
//! This is the main entry point for the wad2 command-line application.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use wad2::prelude::*;

/// wad2 - WAD2 archive inspection tool
#[derive(Parser)]
#[command(name = "wad2")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where to find the archive.
#[derive(Args)]
struct Source {
    /// Path to a WAD2 file (skips the basedir search)
    #[arg(short, long, env = "WAD2_FILE")]
    wad: Option<PathBuf>,

    /// Base directory of the game installation
    #[arg(short, long, env = "WAD2_BASEDIR", default_value = ".")]
    basedir: PathBuf,

    /// Game directory searched ahead of the base directory
    #[arg(short, long, default_value = DEFAULT_GAME_DIR)]
    game: PathBuf,

    /// Archive name to look up in the search directories
    #[arg(short, long, default_value = DEFAULT_WAD_NAME)]
    name: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the header and a summary of the directory
    Info {
        #[command(flatten)]
        source: Source,
    },

    /// List the lump directory
    List {
        #[command(flatten)]
        source: Source,

        /// Filter pattern (glob-style, case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,

        /// Print the directory as JSON
        #[arg(long)]
        json: bool,
    },

    /// List picture lumps with their dimensions
    Pics {
        #[command(flatten)]
        source: Source,

        /// Filter pattern (glob-style, case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Extract lump payloads to files
    Extract {
        #[command(flatten)]
        source: Source,

        /// Output directory
        #[arg(short, long, env = "OUTPUT_FOLDER")]
        output: PathBuf,

        /// Filter pattern (glob-style, case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Info { source } => {
            cmd_info(&source)?;
        }
        Commands::List {
            source,
            filter,
            detailed,
            json,
        } => {
            cmd_list(&source, filter.as_deref(), detailed, json)?;
        }
        Commands::Pics { source, filter } => {
            cmd_pics(&source, filter.as_deref())?;
        }
        Commands::Extract {
            source,
            output,
            filter,
        } => {
            cmd_extract(&source, &output, filter.as_deref())?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn open_archive(source: &Source) -> Result<WadArchive> {
    let start = Instant::now();

    let archive = match &source.wad {
        Some(path) => WadArchive::open(path)
            .with_context(|| format!("Failed to load WAD2 archive {}", path.display()))?,
        None => {
            let loader = FsLoader::new(&source.basedir).with_game_dir(&source.game);
            WadArchive::load(&loader, &source.name).with_context(|| {
                format!(
                    "Failed to load {} (use --basedir or --wad to point at another location)",
                    source.name
                )
            })?
        }
    };

    tracing::info!(
        archive = archive.name(),
        lumps = archive.lump_count(),
        elapsed = ?start.elapsed(),
        "archive loaded"
    );

    Ok(archive)
}

fn cmd_info(source: &Source) -> Result<()> {
    let archive = open_archive(source)?;
    let header = archive.header();

    println!("Archive:    {}", archive.name());
    println!("Size:       {} bytes", archive.as_bytes().len());
    println!("Lumps:      {}", header.lump_count()?);
    println!("Directory:  offset {}", header.directory_offset()?);

    let mut by_type: BTreeMap<u8, (LumpType, usize, u64)> = BTreeMap::new();
    for lump in archive.iter() {
        let slot = by_type
            .entry(lump.lump_type.as_u8())
            .or_insert((lump.lump_type, 0, 0));
        slot.1 += 1;
        slot.2 += lump.disksize as u64;
    }

    println!();
    for (tag, (lump_type, count, bytes)) in by_type {
        println!(
            "{:>4} {:<8} {:>6} lumps {:>10} bytes",
            tag,
            lump_type.label(),
            count,
            bytes
        );
    }

    Ok(())
}

fn cmd_list(source: &Source, filter: Option<&str>, detailed: bool, json: bool) -> Result<()> {
    let archive = open_archive(source)?;
    let filter = compile_filter(filter)?;

    let lumps: Vec<&LumpInfo> = archive
        .iter()
        .filter(|lump| matches_filter(filter.as_ref(), lump))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&lumps)?);
        return Ok(());
    }

    for lump in &lumps {
        if detailed {
            println!(
                "{:>10} {:>8} {:>8} {:<8} {} {}",
                lump.filepos,
                lump.disksize,
                lump.size,
                lump.lump_type.label(),
                if lump.compression == Compression::None { " " } else { "C" },
                lump.name
            );
        } else {
            println!("{}", lump.name);
        }
    }

    println!("\nTotal: {} lumps", lumps.len());

    Ok(())
}

fn cmd_pics(source: &Source, filter: Option<&str>) -> Result<()> {
    let archive = open_archive(source)?;
    let filter = compile_filter(filter)?;

    let mut count = 0;
    for (lump, pic) in archive.pictures() {
        if !matches_filter(filter.as_ref(), lump) {
            continue;
        }

        println!("{:<16} {:>4} x {:<4}", lump.name, pic.width, pic.height);
        count += 1;
    }

    println!("\nTotal: {} pictures", count);

    Ok(())
}

fn cmd_extract(source: &Source, output: &Path, filter: Option<&str>) -> Result<()> {
    let archive = open_archive(source)?;
    let filter = compile_filter(filter)?;

    let selected: Vec<&LumpInfo> = archive
        .iter()
        .filter(|lump| matches_filter(filter.as_ref(), lump))
        .collect();

    println!("Extracting {} lumps...", selected.len());

    let pb = ProgressBar::new(selected.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let start = Instant::now();
    for lump in &selected {
        let output_path = output.join(output_file_name(lump));
        let data = archive.lump_data(lump)?;
        fs::write(&output_path, data)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!("Extraction completed in {:?}", start.elapsed());

    Ok(())
}

fn compile_filter(filter: Option<&str>) -> Result<Option<Pattern>> {
    filter
        .map(|pattern| {
            Pattern::new(&pattern.to_ascii_lowercase())
                .with_context(|| format!("Invalid filter pattern {pattern:?}"))
        })
        .transpose()
}

fn matches_filter(filter: Option<&Pattern>, lump: &LumpInfo) -> bool {
    filter.map_or(true, |pattern| {
        pattern.matches(&lump.name.to_string().to_ascii_lowercase())
    })
}

/// File name for an extracted lump: its name made path-safe, plus the
/// directory index so duplicate or empty names cannot collide.
fn output_file_name(lump: &LumpInfo) -> String {
    let name: String = lump
        .name
        .to_string()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();

    format!("{:04}_{}.lmp", lump.index, name)
}
