use clap::Subcommand;
use std::path::PathBuf;

pub mod definitions;
mod execute;
pub mod load;
pub mod project;
pub mod recolor;
pub mod scan;

use definitions::{InputArgs, OutputArgs, SortArg, TransformArgs};

#[derive(Subcommand)]
pub enum Commands {
    /// List the color parameters found in exported JSON
    Scan {
        #[command(flatten)]
        input: InputArgs,

        /// Sort by color
        #[arg(long, value_enum, default_value_t = SortArg::None)]
        sort: SortArg,
    },

    /// Apply one color to the selected parameters
    Recolor {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        transform: TransformArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Target color (#rgb or #rrggbb)
        #[arg(short, long)]
        color: String,
    },

    /// Rotate the hue of the selected parameters
    HueShift {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        transform: TransformArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Degrees to rotate (negative values rotate backwards)
        #[arg(short, long, allow_hyphen_values = true)]
        degrees: f64,
    },

    /// Give each selected file its own color from a palette
    Shuffle {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        transform: TransformArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Palette colors (defaults to the configured palette)
        #[arg(short, long, num_args = 1..)]
        palette: Vec<String>,
    },

    /// Write the selected parameters' colors to a project file
    ExportSession {
        #[command(flatten)]
        input: InputArgs,

        /// Directory that receives the .rvfxp file
        #[arg(long)]
        out: PathBuf,

        /// Project name (defaults to the configured session name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Apply a project file to the loaded parameters and save
    ImportSession {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// The .rvfxp file to apply
        #[arg(long)]
        session: PathBuf,
    },
}
