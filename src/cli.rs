use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "subtag")]
#[command(about = "Clean subtitle dialogue and tag each line with its speaker.")]
pub struct Args {
    /// Path to config TOML (defaults to ./config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the sanitized dialogue of a subtitle file as SRT
    Clean(CleanCmd),
    /// Tag speakers interactively, one command per line on stdin
    Tag(TagCmd),
    /// Render the human-readable report of a saved session record
    Report(ReportCmd),
    /// List speaker labels with their ordinals
    Palette,
    /// Print the effective default config as TOML and exit
    PrintDefaultConfig,
}

#[derive(Debug, Parser)]
pub struct CleanCmd {
    /// Input SRT file path, or '-' for stdin
    pub input: String,

    /// Output file path (defaults to <input stem>.clean.srt)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Allow overwriting output file
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Debug, Parser)]
pub struct TagCmd {
    /// Episode media file; subtitles and session files are found next to it
    pub media: PathBuf,

    /// Subtitle file to use instead of the one derived from the media path
    #[arg(long)]
    pub subtitles: Option<PathBuf>,

    /// Start from the saved session record instead of the subtitles
    #[arg(long)]
    pub resume: bool,
}

#[derive(Debug, Parser)]
pub struct ReportCmd {
    /// Session record (JSON) written by `tag`
    pub record: PathBuf,

    /// Output file path (defaults to <record stem>_custom.srt)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Allow overwriting output file
    #[arg(long)]
    pub overwrite: bool,
}
