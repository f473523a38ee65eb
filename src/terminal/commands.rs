//! Built-in command handlers

use super::parser::ArgMap;
use super::transport::Transport;

/// Newlines written by the built-in `clear`
pub const CLEAR_ROWS: usize = 100;

/// Scrolls the display away with a burst of newlines. Registered under
/// `"clear"` in every registry and dispatched like any other handler,
/// history and prompt included.
pub fn clear_screen(_args: &ArgMap, port: &mut dyn Transport) {
    for _ in 0..CLEAR_ROWS {
        port.write_byte(b'\n');
    }
}
