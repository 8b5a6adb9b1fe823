//! Argument groups shared by the subcommands

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::session::SortOrder;

/// Where to load from and which parameters to work on
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Directories (walked recursively) or .json files to load
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Keyword dictionary for material parameters (defaults to the configured or bundled one)
    #[arg(long)]
    pub dictionary: Option<PathBuf>,

    /// Only work on parameters whose name or path contains this text (repeatable)
    #[arg(short = 's', long = "select")]
    pub select: Vec<String>,

    /// Only show parameters from this folder; "/" is the input root (repeatable)
    #[arg(long)]
    pub folder: Vec<String>,

    /// Case-insensitive filter on parameter or file name
    #[arg(long)]
    pub search: Option<String>,

    /// Hide parameters whose R, G and B are equal
    #[arg(long)]
    pub hide_grayscale: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Transform toggles that override the saved preferences
#[derive(Args, Debug, Clone, Copy)]
pub struct TransformArgs {
    /// Also recolor parameters whose R, G and B are equal
    #[arg(long)]
    pub keep_grayscale: bool,

    /// Replace colors outright instead of keeping each parameter's brightness
    #[arg(long)]
    pub no_preserve_intensity: bool,
}

/// Where modified files are written
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory that receives the `output` folder (defaults to the first input directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Color sort for listings
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum SortArg {
    /// Load order
    #[default]
    None,
    /// Hue, then saturation, then lightness
    Asc,
    /// Reverse of asc
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::None => SortOrder::None,
            SortArg::Asc => SortOrder::Ascending,
            SortArg::Desc => SortOrder::Descending,
        }
    }
}
