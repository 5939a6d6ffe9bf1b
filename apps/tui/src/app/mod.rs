// App module for hotel-demand
// Holds session state and turns key presses into selection changes

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, SidebarControl};
