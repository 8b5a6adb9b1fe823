//! Command execution implementations

use super::Commands;
use super::recolor::Transform;
use super::{project, recolor, scan};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Scan { input, sort } => scan::execute(input, *sort),
            Commands::Recolor {
                input,
                transform,
                output,
                color,
            } => recolor::execute(input, *transform, output, &Transform::MasterColor(color.clone())),
            Commands::HueShift {
                input,
                transform,
                output,
                degrees,
            } => recolor::execute(input, *transform, output, &Transform::HueShift(*degrees)),
            Commands::Shuffle {
                input,
                transform,
                output,
                palette,
            } => recolor::execute(input, *transform, output, &Transform::Shuffle(palette.clone())),
            Commands::ExportSession { input, out, name } => {
                project::export(input, out, name.as_deref())
            }
            Commands::ImportSession {
                input,
                output,
                session,
            } => project::import(input, output, session),
        }
    }
}
