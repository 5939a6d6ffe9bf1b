mod help;
mod helpers;
mod sidebar;

use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if sidebar::handle_expanded_example(app, key) {
        return;
    }

    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('t') => {
            app.chart_tab_index = helpers::wrap_increment(app.chart_tab_index, 2);
        }
        _ => sidebar::handle_sidebar_input(app, key),
    }
}
