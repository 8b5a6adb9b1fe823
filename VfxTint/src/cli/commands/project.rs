//! CLI commands for project (.rvfxp) files

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{CLIPBOARD, DISK, LOOKING_GLASS, print_done, print_step};

use super::definitions::{InputArgs, OutputArgs};
use super::load::{open_session, output_root, save, select_targets};

/// Export the selected parameters' colors to `<out>/<name>.rvfxp`
pub fn export(input: &InputArgs, out: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let quiet = input.quiet;

    if !quiet {
        print_step(1, 2, LOOKING_GLASS, "Reading files...");
    }
    let (mut session, _) = open_session(input, None)?;
    let selected = select_targets(&mut session, &input.select);
    if let Some(name) = name {
        session.set_session_name(name);
    }

    if !quiet {
        print_step(2, 2, CLIPBOARD, &format!("Exporting {selected} parameters..."));
    }
    let path = session.export_project_to(out)?;

    if !quiet {
        println!("      Project exported as {}", path.display());
        print_done(start.elapsed());
    }
    Ok(())
}

/// Apply a project file to the inputs and save the result
pub fn import(input: &InputArgs, output: &OutputArgs, project_file: &Path) -> anyhow::Result<()> {
    let start = Instant::now();
    let quiet = input.quiet;

    if !quiet {
        print_step(1, 3, LOOKING_GLASS, "Reading files...");
    }
    let (mut session, _) = open_session(input, None)?;

    if !quiet {
        print_step(2, 3, CLIPBOARD, &format!("Applying {}...", project_file.display()));
    }
    let updated = session.import_project_file(project_file)?;
    if !quiet {
        println!("      {updated} parameters were updated");
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
