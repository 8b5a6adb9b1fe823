//! CLI command for listing extracted color parameters

use console::style;

use crate::color::rgba_to_display_hex;

use super::definitions::{InputArgs, SortArg};
use super::load::{open_session, select_targets};

pub fn execute(input: &InputArgs, sort: SortArg) -> anyhow::Result<()> {
    let (mut session, report) = open_session(input, None)?;
    session.filter_mut().sort = sort.into();
    select_targets(&mut session, &input.select);

    let displayed = session.display_list();
    let rows: Vec<_> = displayed
        .iter()
        .filter(|param| session.selection().contains(&param.id))
        .collect();

    if !input.quiet {
        println!(
            "{:<8}  {:>8}  {:>8}  {:>8}  {:>8}  {:<40}  PARAMETER",
            "COLOR", "R", "G", "B", "A", "FILE"
        );
    }
    for param in &rows {
        let rgba = param.rgba;
        println!(
            "{:<8}  {:>8.4}  {:>8.4}  {:>8.4}  {:>8.4}  {:<40}  {}",
            rgba_to_display_hex(rgba.r, rgba.g, rgba.b),
            rgba.r,
            rgba.g,
            rgba.b,
            rgba.a,
            param.relative_path,
            param.param_name
        );
    }

    if !input.quiet {
        println!();
        println!(
            "{} of {} parameters shown from {} files",
            style(rows.len()).bold(),
            session.parameters().len(),
            report.files_loaded
        );
        let folders: Vec<_> = session.folders().iter().map(String::as_str).collect();
        if !folders.is_empty() {
            println!("Folders: {}", folders.join(", "));
        }
    }
    Ok(())
}
