//! Terminal session
//!
//! One `Terminal` value owns every piece of shell state (input buffer,
//! argument map, command registry, history, startup flag) and is threaded
//! through the whole input path: poll bytes, detect line termination, parse,
//! dispatch, prompt. The session is strictly single-threaded; dispatch runs
//! to completion before polling resumes.

use heapless::String;

use super::error::TerminalError;
use super::history::History;
use super::line_buffer::{LineBuffer, LINE_SIZE};
use super::parser::{parse_line, ArgMap};
use super::registry::{CommandHandler, CommandRegistry};
use super::transport::Transport;

/// Startup banner, written once before the first line is read
pub const BANNER: &str = "Terminal started.\n";

/// Prompt written after every dispatch
pub const PROMPT: &str = "\n~#: ";

/// An interactive shell session over a byte transport.
pub struct Terminal<'a> {
    line: LineBuffer,
    args: ArgMap,
    registry: CommandRegistry<'a>,
    history: History,
    /// True until the first byte ever arrives
    startup: bool,
    device_id: &'a str,
}

impl<'a> Terminal<'a> {
    /// Create a session. `device_id` is written verbatim as the
    /// identification line of the startup sequence.
    pub fn new(device_id: &'a str) -> Self {
        Self {
            line: LineBuffer::new(),
            args: ArgMap::new(),
            registry: CommandRegistry::new(),
            history: History::new(),
            startup: true,
            device_id,
        }
    }

    /// Insert or replace one command
    pub fn register(
        &mut self,
        name: &'a str,
        handler: &'a dyn CommandHandler,
    ) -> Result<(), TerminalError> {
        self.registry.register(name, handler)
    }

    /// Bulk-register commands, see [`CommandRegistry::register_all`]
    pub fn register_all(
        &mut self,
        names: &[&'a str],
        handlers: &[&'a dyn CommandHandler],
        port: &mut dyn Transport,
    ) -> Result<(), TerminalError> {
        self.registry.register_all(names, handlers, port)
    }

    /// Run the one-time startup sequence if it is still pending, then
    /// consume every available byte.
    ///
    /// The startup wait is a deliberate busy poll: the target has nothing
    /// else to run until a peer opens the serial channel.
    pub fn poll(&mut self, port: &mut dyn Transport) {
        if self.startup {
            while !port.byte_available() {}

            port.write_str(BANNER);
            port.write_str(self.device_id);
            self.startup = false;
            self.print_prompt(port);
        }

        while port.byte_available() {
            let byte = port.read_byte();
            self.process_byte(byte, port);
        }
    }

    /// Feed a single input byte.
    ///
    /// Returns `Some(result)` when the byte completed a line that was
    /// dispatched, `None` while input is still accumulating. A line of
    /// length <= 1 is discarded as an empty enter; the buffer is reset on
    /// every terminator either way, so it never holds a terminator byte.
    pub fn process_byte(
        &mut self,
        byte: u8,
        port: &mut dyn Transport,
    ) -> Option<Result<(), TerminalError>> {
        match byte {
            b'\n' | b'\r' => {
                if self.line.len() > 1 {
                    let completed = self.line.take();
                    let command = parse_line(&completed, &mut self.args);
                    Some(self.dispatch(command, port))
                } else {
                    self.line.clear();
                    None
                }
            }
            other => {
                port.write_byte(other);
                self.line.push(other);
                None
            }
        }
    }

    /// Look up and invoke a command, then do the post-invocation
    /// bookkeeping: clear the argument map, record the name in the history,
    /// write the prompt. An unknown name is reported and leaves both the
    /// argument map and the history untouched.
    pub fn dispatch(
        &mut self,
        command: &str,
        port: &mut dyn Transport,
    ) -> Result<(), TerminalError> {
        match self.registry.lookup(command) {
            Some(handler) => {
                handler.run(&self.args, port);
                self.args.clear();
                self.history.push(command);
                self.print_prompt(port);
                Ok(())
            }
            None => {
                log::debug!("unknown command '{}'", command);
                port.write_str("\nERROR: Command not found: ");
                port.write_str(command);
                port.write_str("\n");
                self.print_prompt(port);
                Err(TerminalError::UnknownCommand)
            }
        }
    }

    /// Write the prompt
    pub fn print_prompt(&self, port: &mut dyn Transport) {
        port.write_str(PROMPT);
    }

    /// Input accumulated since the last terminator
    pub fn pending_line(&self) -> &str {
        self.line.as_str()
    }

    /// Arguments of the line currently being dispatched
    pub fn args(&self) -> &ArgMap {
        &self.args
    }

    /// Executed-command log
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Command table
    pub fn registry(&self) -> &CommandRegistry<'a> {
        &self.registry
    }
}

/// Block until a newline-terminated line longer than one character arrives
/// and return it.
///
/// Printable bytes (ASCII 32-126) are echoed and kept; everything else,
/// carriage returns included, is ignored. Shorter lines are discarded and
/// the wait continues. This is the direct "ask the user a question"
/// primitive; it shares no state with any [`Terminal`] session.
pub fn read_line_blocking(port: &mut dyn Transport) -> String<LINE_SIZE> {
    let mut line: String<LINE_SIZE> = String::new();

    loop {
        while !port.byte_available() {}

        match port.read_byte() {
            b'\n' => {
                if line.len() > 1 {
                    return line;
                }
                line.clear();
            }
            byte @ 0x20..=0x7E => {
                port.write_byte(byte);
                let _ = line.push(byte as char);
            }
            _ => {}
        }
    }
}
