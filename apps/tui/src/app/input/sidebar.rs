use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, SidebarControl};
use crossterm::event::KeyCode;
use hotel_demand::catalog::LOCATIONS;
use hotel_demand::config::API_TOKEN_VAR;
use hotel_demand::docs::CODE_EXAMPLES;

/// Keys for the code example popup. Returns true when the key was consumed.
pub fn handle_expanded_example(app: &mut App, key: KeyCode) -> bool {
    if app.expanded_example.is_none() {
        return false;
    }

    match key {
        KeyCode::Esc | KeyCode::Enter => {
            app.expanded_example = None;
            true
        }
        KeyCode::Char('q') => false,
        _ => true,
    }
}

pub fn handle_sidebar_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Tab => {
            app.focus = SidebarControl::ALL
                [wrap_increment(app.focus.index(), SidebarControl::ALL.len())];
        }
        KeyCode::BackTab => {
            app.focus = SidebarControl::ALL
                [wrap_decrement(app.focus.index(), SidebarControl::ALL.len())];
        }
        KeyCode::Char('r') => app.reset_radius(),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Enter => {
            handle_focused_control(app, key);
        }
        _ => {}
    }
}

fn handle_focused_control(app: &mut App, key: KeyCode) {
    if app.focus == SidebarControl::CodeExamples {
        handle_code_examples(app, key);
        return;
    }

    // The hotel and date range selects need live data; the radius does not.
    if matches!(app.focus, SidebarControl::Location | SidebarControl::DateRange)
        && !guard_enabled(app)
    {
        return;
    }

    match (app.focus, key) {
        (SidebarControl::Location, KeyCode::Up) => {
            let index = wrap_decrement(app.location_index(), LOCATIONS.len());
            app.select_location_index(index);
        }
        (SidebarControl::Location, KeyCode::Down) => {
            let index = wrap_increment(app.location_index(), LOCATIONS.len());
            app.select_location_index(index);
        }
        (SidebarControl::DateRange, KeyCode::Up | KeyCode::Down) => {
            let Some((current, len)) = app
                .sidebar
                .as_ref()
                .map(|model| (model.date_range_index, model.date_options.len()))
            else {
                return;
            };
            let index = if key == KeyCode::Up {
                wrap_decrement(current, len)
            } else {
                wrap_increment(current, len)
            };
            app.select_date_range_index(index);
        }
        (SidebarControl::Radius, KeyCode::Up | KeyCode::Right) => app.step_radius(1),
        (SidebarControl::Radius, KeyCode::Down | KeyCode::Left) => app.step_radius(-1),
        _ => {}
    }
}

fn handle_code_examples(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up => {
            app.code_example_index = wrap_decrement(app.code_example_index, CODE_EXAMPLES.len());
        }
        KeyCode::Down => {
            app.code_example_index = wrap_increment(app.code_example_index, CODE_EXAMPLES.len());
        }
        KeyCode::Enter => app.toggle_code_example(),
        _ => {}
    }
}

fn guard_enabled(app: &mut App) -> bool {
    if app.controls_enabled() {
        true
    } else {
        app.status_message =
            format!("Hotel and date range are disabled. Set {API_TOKEN_VAR} to enable live data.");
        false
    }
}
