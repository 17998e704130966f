use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::FixStatus;

#[derive(Parser, Debug)]
#[command(
    name = "brandqa",
    version,
    about = "Rule-based brand strategy quality validation and fix tracking"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Validate(ValidateArgs),
    #[command(subcommand)]
    Fixes(FixesCommand),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Strategy document to validate (JSON, camelCase fields).
    #[arg(long)]
    pub strategy_path: PathBuf,

    #[arg(long)]
    pub brand: String,

    /// Optional validation context (evolution outputs, audit results, sources).
    #[arg(long)]
    pub context_path: Option<PathBuf>,

    #[arg(long, default_value = ".brandos")]
    pub workspace_root: PathBuf,

    /// Defaults to <workspace>/<brand-slug>/validation_report.json.
    #[arg(long)]
    pub report_path: Option<PathBuf>,

    /// Also create fix records for the gaps found in this run.
    #[arg(long, default_value_t = false)]
    pub track_gaps: bool,
}

#[derive(Subcommand, Debug)]
pub enum FixesCommand {
    List(FixListArgs),
    Update(FixUpdateArgs),
    Note(FixNoteArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FixListArgs {
    #[arg(long, default_value = ".brandos")]
    pub workspace_root: PathBuf,

    #[arg(long)]
    pub brand: String,

    #[arg(long, value_enum)]
    pub status: Option<FixStatusArg>,

    #[arg(long)]
    pub checkpoint: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct FixUpdateArgs {
    #[arg(long, default_value = ".brandos")]
    pub workspace_root: PathBuf,

    #[arg(long)]
    pub brand: String,

    #[arg(long)]
    pub fix_id: String,

    #[arg(long, value_enum)]
    pub status: FixStatusArg,

    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct FixNoteArgs {
    #[arg(long, default_value = ".brandos")]
    pub workspace_root: PathBuf,

    #[arg(long)]
    pub brand: String,

    #[arg(long)]
    pub fix_id: String,

    #[arg(long)]
    pub note: String,

    #[arg(long)]
    pub author: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".brandos")]
    pub workspace_root: PathBuf,

    #[arg(long)]
    pub brand: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum FixStatusArg {
    Identified,
    InProgress,
    Resolved,
    Verified,
    WontFix,
}

impl From<FixStatusArg> for FixStatus {
    fn from(arg: FixStatusArg) -> Self {
        match arg {
            FixStatusArg::Identified => Self::Identified,
            FixStatusArg::InProgress => Self::InProgress,
            FixStatusArg::Resolved => Self::Resolved,
            FixStatusArg::Verified => Self::Verified,
            FixStatusArg::WontFix => Self::WontFix,
        }
    }
}
