//! CLI progress display utilities
//!
//! Step indicators, spinners and the completion line shared by every
//! subcommand.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Palette - for color transforms
pub static PALETTE: Emoji<'_, '_> = Emoji("🎨 ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Clipboard - for project files
pub static CLIPBOARD: Emoji<'_, '_> = Emoji("📋 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Warning sign - for skipped files
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "! ");

// =============================================================================
// Step-Based Progress
// =============================================================================

/// Print a step indicator: `[1/3] 🔍 Message...`
///
/// # Example
/// ```ignore
/// print_step(1, 3, LOOKING_GLASS, "Reading files...");
/// print_step(2, 3, PALETTE, "Applying master color...");
/// print_step(3, 3, DISK, "Writing files...");
/// ```
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print a warning line: `⚠️  Message`
pub fn print_warning(msg: &str) {
    println!("{}{}", WARNING, style(msg).yellow());
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

// =============================================================================
// Simple Progress Helpers
// =============================================================================

/// Create a simple spinner
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn simple_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// A spinner that draws nothing when `quiet` is set.
#[must_use]
pub fn spinner_unless(quiet: bool, msg: &str) -> ProgressBar {
    if quiet {
        ProgressBar::hidden()
    } else {
        simple_spinner(msg)
    }
}
