//! Text console: board rendering, move scripts and the command loop.

mod display;
mod script;
mod terminal;

pub use display::{DisplayError, TerminalDisplay};
pub use script::{ScriptError, parse_moves};
pub use terminal::Console;
