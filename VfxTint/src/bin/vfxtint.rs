//! VfxTint CLI binary

fn main() -> anyhow::Result<()> {
    vfxtint::cli::run_cli()
}
