//! dirtrail - stateful, seekable, recursive directory iteration.
//!
//! Usage:
//!   dirtrail [PATH]          Walk a tree (self-first)
//!   dirtrail list [PATH]     List one directory level
//!   dirtrail walk [PATH]     Walk a tree with options
//!   dirtrail --help          Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use dirtrail_iter::{
    Current, DirectoryIterator, EntryKind, FileInfo, Flags, PositionalIterator, TreeWalker,
    WalkConfig, WalkMode,
};

#[derive(Parser)]
#[command(
    name = "dirtrail",
    version,
    about = "Stateful, seekable, recursive directory iteration",
    long_about = "dirtrail lists directories through a positional iterator and walks \
                  trees by descending into subdirectories on demand.\n\n\
                  Set RUST_LOG=dirtrail=debug,dirtrail_iter=debug to trace descents."
)]
struct Cli {
    /// Path to walk (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List the entries of one directory
    List {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Leave out `.` and `..`
        #[arg(long)]
        skip_dots: bool,

        /// Key entries by bare file name instead of pathname
        #[arg(long)]
        key_filename: bool,

        /// Join paths with `/` on every platform
        #[arg(long)]
        unix_paths: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Walk a directory tree depth-first
    Walk {
        /// Root of the walk
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Where directories appear relative to their contents
        #[arg(short, long, default_value = "self-first")]
        mode: Mode,

        /// Maximum depth to descend (0 = root level only)
        #[arg(short, long)]
        depth: Option<u32>,

        /// Descend through symlinked directories
        #[arg(short = 'L', long)]
        follow_symlinks: bool,

        /// Leave out entries whose name starts with `.`
        #[arg(long)]
        no_hidden: bool,

        /// Join paths with `/` on every platform
        #[arg(long)]
        unix_paths: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Leaves,
    SelfFirst,
    ChildFirst,
}

impl From<Mode> for WalkMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Leaves => WalkMode::LeavesOnly,
            Mode::SelfFirst => WalkMode::SelfFirst,
            Mode::ChildFirst => WalkMode::ChildFirst,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::List {
            path,
            skip_dots,
            key_filename,
            unix_paths,
            format,
        }) => {
            let mut flags = Flags::default();
            flags.set(Flags::SKIP_DOTS, skip_dots);
            flags.set(Flags::KEY_AS_FILENAME, key_filename);
            flags.set(Flags::UNIX_PATHS, unix_paths);
            run_list(&path, flags, format)?;
        }
        Some(Command::Walk {
            path,
            mode,
            depth,
            follow_symlinks,
            no_hidden,
            unix_paths,
            format,
        }) => {
            let config = WalkConfig::builder()
                .root(path)
                .mode(WalkMode::from(mode))
                .max_depth(depth)
                .follow_symlinks(follow_symlinks)
                .include_hidden(!no_hidden)
                .unix_paths(unix_paths)
                .build()
                .context("Invalid walk options")?;
            run_walk(config, format)?;
        }
        None => {
            run_walk(WalkConfig::new(cli.path), OutputFormat::Text)?;
        }
    }

    Ok(())
}

/// List one directory level.
fn run_list(path: &PathBuf, flags: Flags, format: OutputFormat) -> Result<()> {
    tracing::debug!(
        path = %path.display(),
        ?flags,
        current = ?flags.current_mode(),
        key = ?flags.key_mode(),
        "listing directory"
    );
    let mut iter = DirectoryIterator::new(path, flags)
        .with_context(|| format!("Cannot open {}", path.display()))?;

    let mut infos: Vec<(String, FileInfo)> = Vec::new();
    while iter.valid() {
        let key = iter.key()?;
        if let Current::FileInfo(info) = iter.current()? {
            infos.push((key, info));
        }
        iter.next()?;
    }

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(70));
            println!(" {} - {} entries", iter.path().display(), infos.len());
            println!("{}", "─".repeat(70));
            for (key, info) in &infos {
                println!(
                    " {:<5} {:>10}  {}  {}{}",
                    info.kind.label(),
                    format_size(info.size),
                    format_time(info.timestamps.modified),
                    key,
                    name_suffix(info)
                );
            }
            println!();
        }
        OutputFormat::Json => {
            let entries: Vec<_> = infos
                .into_iter()
                .map(|(key, info)| serde_json::json!({ "key": key, "info": info }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

/// Walk a tree and print every entry.
fn run_walk(config: WalkConfig, format: OutputFormat) -> Result<()> {
    tracing::debug!(?config, flags = ?config.flags(), "starting walk");
    let root = config.root.clone();
    let walker = TreeWalker::new(config)
        .with_context(|| format!("Cannot open {}", root.display()))?;

    let mut entries = Vec::new();
    let mut errors = 0usize;
    for entry in walker {
        match entry {
            Ok(entry) => match format {
                OutputFormat::Text => {
                    let marker = if entry.kind == EntryKind::Directory { "/" } else { "" };
                    println!(
                        "{}{}{}  {}",
                        "  ".repeat(entry.depth),
                        entry.sub_pathname,
                        marker,
                        format_size(entry.size)
                    );
                }
                OutputFormat::Json => entries.push(entry),
            },
            Err(err) => {
                errors += 1;
                eprintln!("warning: {err}");
            }
        }
    }

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }
    if errors > 0 {
        eprintln!("{errors} warning(s) during walk");
    }

    Ok(())
}

/// `ls -F` style marker: `*` for executables, the target for symlinks.
fn name_suffix(info: &FileInfo) -> String {
    match &info.link_target {
        Some(target) => format!(" -> {target}"),
        None if info.is_file() && info.is_executable() => "*".to_string(),
        None => String::new(),
    }
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Format a timestamp in local time.
fn format_time(time: std::time::SystemTime) -> String {
    chrono::DateTime::<chrono::Local>::from(time)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
