//! CLI commands for the bulk color transforms

use std::sync::Arc;
use std::time::Instant;

use crate::cli::progress::{DISK, LOOKING_GLASS, PALETTE, print_done, print_step};
use crate::session::Session;

use super::definitions::{InputArgs, OutputArgs, TransformArgs};
use super::load::{open_session, output_root, save, select_targets};

/// Which transform to run
#[derive(Debug, Clone)]
pub enum Transform {
    MasterColor(String),
    HueShift(f64),
    Shuffle(Vec<String>),
}

impl Transform {
    fn describe(&self) -> String {
        match self {
            Transform::MasterColor(color) => format!("Applying master color {color}..."),
            Transform::HueShift(degrees) => format!("Shifting hue by {degrees}°..."),
            Transform::Shuffle(_) => "Shuffling palette colors across files...".to_string(),
        }
    }

    fn apply(&self, session: &mut Session) -> crate::Result<()> {
        match self {
            Transform::MasterColor(color) => {
                session.set_master_color(color)?;
                session.apply_master_color()
            }
            Transform::HueShift(degrees) => session.apply_hue_shift(*degrees),
            Transform::Shuffle(palette) => {
                if !palette.is_empty() {
                    session.set_palette(palette.clone())?;
                }
                session.apply_shuffle()
            }
        }
    }
}

pub fn execute(
    input: &InputArgs,
    transform_args: TransformArgs,
    output: &OutputArgs,
    transform: &Transform,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let quiet = input.quiet;

    if !quiet {
        print_step(1, 3, LOOKING_GLASS, "Reading files...");
    }
    let (mut session, report) = open_session(input, Some(transform_args))?;
    let selected = select_targets(&mut session, &input.select);
    if !quiet {
        println!(
            "      {} files, {} parameters, {} selected",
            report.files_loaded,
            session.parameters().len(),
            selected
        );
        print_step(2, 3, PALETTE, &transform.describe());
    }

    transform.apply(&mut session)?;
    let changed = changed_count(&session);

    if !quiet {
        println!("      {changed} parameters changed");
        print_step(3, 3, DISK, "Writing files...");
    }
    let root = output_root(input, output);
    let saved = save(&mut session, &root, quiet)?;

    if !quiet {
        println!(
            "      {} files written to {}",
            saved.files_written,
            saved.output_dir.display()
        );
        print_done(start.elapsed());
    }
    Ok(())
}

/// Parameters that differ between the current snapshot and the one before.
fn changed_count(session: &Session) -> usize {
    let history = session.history();
    let Some(previous) = history
        .index()
        .checked_sub(1)
        .and_then(|index| history.snapshots().get(index))
    else {
        return 0;
    };
    session
        .parameters()
        .iter()
        .zip(previous)
        .filter(|(current, before)| !Arc::ptr_eq(current, before))
        .count()
}
