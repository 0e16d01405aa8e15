//! cutlist - command line entry point.
//!
//! Loads the config, sets up logging, runs a planner and prints the plan as
//! JSON. With `--source`/`--output` the kept ranges are also cut with the
//! configured audio cutter; chapter plans can be written to a chapter file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use cutlist_core::config::ConfigManager;
use cutlist_core::logging::init_tracing;
use cutlist_core::FrameRate;

mod commands;

#[derive(Parser)]
#[command(
    name = "cutlist",
    version,
    about = "Plan frame-accurate audio cuts and chapter timecodes"
)]
struct Cli {
    /// Config file (default: .config/cutlist.toml, or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

/// Options shared by both planners.
#[derive(Args)]
struct SequenceArgs {
    /// Total number of frames in the source
    #[arg(long)]
    frames: u64,

    /// Frame rate, "num/den" or an integer
    #[arg(long)]
    fps: FrameRate,

    /// Media file to cut
    #[arg(long, requires = "output")]
    source: Option<PathBuf>,

    /// Where to write the spliced audio
    #[arg(long, requires = "source")]
    output: Option<PathBuf>,

    /// Include intermediate values in the plan
    #[arg(long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a flat list of keep-ranges
    Trim {
        #[command(flatten)]
        sequence: SequenceArgs,

        /// JSON pair `[s, e]` or list of pairs `[[s, e], ...]`
        #[arg(long)]
        trims: String,
    },

    /// Plan chapters and the cuts between them
    Chapters {
        #[command(flatten)]
        sequence: SequenceArgs,

        /// JSON list of `[start, end?, "name"?]` entries
        #[arg(long)]
        chapters: String,

        /// Chapter entries carry no names
        #[arg(long, default_value_t = false)]
        no_names: bool,

        /// Write a chapter file here
        #[arg(long)]
        chapters_out: Option<PathBuf>,

        /// Chapter file format: xml or ogm (default from config)
        #[arg(long)]
        format: Option<cutlist_core::chapters::ChapterFormat>,
    },
}

fn default_config_path() -> PathBuf {
    let local = PathBuf::from(".config").join("cutlist.toml");
    if local.exists() {
        return local;
    }
    directories::ProjectDirs::from("", "", "cutlist")
        .map(|dirs| dirs.config_dir().join("cutlist.toml"))
        .unwrap_or(local)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config_manager = ConfigManager::new(&config_path);
    let config_status = config_manager.load_or_create();

    let mut level = config_manager.settings().logging.level;
    for _ in 0..cli.verbose {
        level = level.more_verbose();
    }
    init_tracing(level);

    if let Err(e) = config_status {
        tracing::warn!("Failed to load config {}: {}. Using defaults.", config_path.display(), e);
    }
    tracing::debug!("Config: {}", config_path.display());
    tracing::debug!("Core version: {}", cutlist_core::version());
    tracing::trace!("Settings: {:?}", config_manager.settings());

    let settings = config_manager.settings();
    let output = match cli.cmd {
        Commands::Trim { sequence, trims } => commands::trim(settings, &sequence, &trims)?,
        Commands::Chapters {
            sequence,
            chapters,
            no_names,
            chapters_out,
            format,
        } => commands::chapters(
            settings,
            &sequence,
            &commands::ChapterOptions {
                chapters: &chapters,
                names: !no_names,
                chapters_out: chapters_out.as_deref(),
                format,
            },
        )?,
    };

    println!("{}", output);
    Ok(())
}

impl SequenceArgs {
    fn sequence(&self) -> Result<cutlist_core::SequenceInfo> {
        cutlist_core::SequenceInfo::new(self.frames, self.fps).context("Invalid sequence")
    }
}
