//! Terminal UI: open a file, pick columns on the preview, look at the chart.

mod app;
mod input;
mod ui;

pub use app::App;

use std::io;

/// Take over the terminal and run until the user quits.
pub fn run(app: &mut App) -> io::Result<()> {
    let mut terminal = ratatui::try_init()?;
    let result = input::run_app(&mut terminal, app);
    ratatui::restore();
    result
}
