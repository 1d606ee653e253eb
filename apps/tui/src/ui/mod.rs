// UI module for the Orbit launcher
// Handles all UI rendering functions

pub mod palette;
pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    screens::main::render_main(app, f);
}
