//! # RustTinyTerminal
//!
//! Minimal interactive command shell over a single serial channel.
//!
//! ## Architecture
//!
//! All shell state lives in one [`Terminal`] session threaded through the
//! input path:
//!
//! transport bytes -> line buffer -> parser -> registry lookup -> handler
//!
//! Commands are registered by name at runtime; handlers read their flag
//! arguments from the map they are handed and write through the same port
//! the input came from. No allocation, no globals, no locking: the session
//! is single-threaded by design and the core compiles for the device and
//! the host alike.

#![cfg_attr(not(test), no_std)]

pub mod hal;
pub mod terminal;

pub use terminal::{
    read_line_blocking, ArgMap, CommandHandler, CommandRegistry, History, LineBuffer, Terminal,
    TerminalError, Transport, TransportWriter,
};
