//! Command registry
//!
//! Name-to-handler mapping with runtime registration. Handlers are
//! polymorphic capabilities: anything implementing [`CommandHandler`],
//! which a blanket impl extends to every matching closure or function.

use heapless::FnvIndexMap;

use super::commands::clear_screen;
use super::error::TerminalError;
use super::parser::ArgMap;
use super::transport::Transport;

/// Maximum number of registered commands
pub const MAX_COMMANDS: usize = 16;

/// A command implementation invoked by name.
///
/// Handlers take no positional arguments and return nothing. A handler that
/// wants its flags reads them from the map it is handed; the map is only
/// valid for the duration of the call.
pub trait CommandHandler {
    fn run(&self, args: &ArgMap, port: &mut dyn Transport);
}

impl<F> CommandHandler for F
where
    F: Fn(&ArgMap, &mut dyn Transport),
{
    fn run(&self, args: &ArgMap, port: &mut dyn Transport) {
        self(args, port)
    }
}

/// Command table. The built-in `clear` entry is always present.
pub struct CommandRegistry<'h> {
    entries: FnvIndexMap<&'h str, &'h dyn CommandHandler, MAX_COMMANDS>,
}

impl<'h> CommandRegistry<'h> {
    pub fn new() -> Self {
        let mut registry = Self {
            entries: FnvIndexMap::new(),
        };
        let _ = registry.entries.insert("clear", &clear_screen);
        registry
    }

    /// Insert or replace the handler for `name`. Fails only when the table
    /// is full and the name is new.
    pub fn register(
        &mut self,
        name: &'h str,
        handler: &'h dyn CommandHandler,
    ) -> Result<(), TerminalError> {
        match self.entries.insert(name, handler) {
            Ok(_) => Ok(()),
            Err(_) => {
                log::warn!("command table full, dropping '{}'", name);
                Err(TerminalError::RegistryFull)
            }
        }
    }

    /// Register each name/handler pair in order, all-or-nothing on a count
    /// mismatch. The built-in `clear` goes in first either way, so a `clear`
    /// registered individually beforehand is overwritten here, while one
    /// supplied inside the batch lands after the built-in and wins.
    pub fn register_all(
        &mut self,
        names: &[&'h str],
        handlers: &[&'h dyn CommandHandler],
        port: &mut dyn Transport,
    ) -> Result<(), TerminalError> {
        let _ = self.entries.insert("clear", &clear_screen);

        if names.len() != handlers.len() {
            port.write_str("ERROR: key vector and function vector must be same size.\n");
            return Err(TerminalError::RegistrationMismatch);
        }

        for (name, handler) in names.iter().copied().zip(handlers.iter().copied()) {
            self.register(name, handler)?;
        }

        Ok(())
    }

    /// Find the handler for `name`. Absence is the normal not-found signal.
    pub fn lookup(&self, name: &str) -> Option<&'h dyn CommandHandler> {
        self.entries.get(name).copied()
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommandRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}
