//! Admin console: generic CRUD panels behind the session guard.

pub mod console;
pub mod panel;
pub mod status;

pub use console::{AdminConsole, Section};
pub use panel::Panel;
