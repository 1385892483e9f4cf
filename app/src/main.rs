fn run_app(
    run_tui: impl FnOnce() -> Result<(), drill_tui::TuiError>,
) -> Result<(), Box<dyn std::error::Error>> {
    run_tui()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_app(drill_tui::run)
}
