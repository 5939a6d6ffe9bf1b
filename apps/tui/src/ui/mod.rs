// UI module for hotel-demand
// Draws the sidebar, the demand panel and popups from App state

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::dashboard::render_dashboard(app, f);
}
