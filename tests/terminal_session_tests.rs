//! End-to-end terminal session tests
//!
//! Drive the whole input path byte by byte through a scripted port:
//! startup sequence, echo, line termination, parsing, dispatch,
//! bookkeeping, prompt.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use rust_tiny_terminal::terminal::commands::CLEAR_ROWS;
use rust_tiny_terminal::terminal::line_buffer::LINE_SIZE;
use rust_tiny_terminal::terminal::{
    read_line_blocking, ArgMap, Terminal, TerminalError, Transport, BANNER, PROMPT,
};

// Scripted port: queued input bytes, captured output bytes
struct MockPort {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl MockPort {
    fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            tx: Vec::new(),
        }
    }

    fn feed(&mut self, s: &str) {
        self.rx.extend(s.bytes());
    }

    fn out(&self) -> String {
        String::from_utf8(self.tx.clone()).unwrap()
    }
}

impl Transport for MockPort {
    fn byte_available(&mut self) -> bool {
        !self.rx.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        self.rx.pop_front().unwrap_or(0)
    }

    fn write_byte(&mut self, byte: u8) {
        self.tx.push(byte);
    }
}

const DEVICE_ID: &str = "ChipID: 1234";

fn preamble() -> String {
    format!("{}{}{}", BANNER, DEVICE_ID, PROMPT)
}

#[test]
fn test_startup_sequence_runs_once_before_input() {
    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();

    port.feed("ab\n");
    term.poll(&mut port);

    // Banner, identifier and prompt all precede the first echo
    assert!(port.out().starts_with(&preamble()));

    port.feed("cd\n");
    term.poll(&mut port);

    assert_eq!(port.out().matches(BANNER).count(), 1);
}

#[test]
fn test_bytes_accumulate_without_dispatch() {
    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();

    port.feed("abc");
    term.poll(&mut port);

    assert_eq!(term.pending_line(), "abc");
    assert!(term.history().is_empty());
    assert_eq!(port.out(), format!("{}abc", preamble()));
}

#[test]
fn test_single_char_line_is_discarded() {
    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();

    port.feed("x\n");
    term.poll(&mut port);

    assert_eq!(term.pending_line(), "");
    assert!(term.history().is_empty());
    // The character was echoed but nothing dispatched, so no second prompt
    assert_eq!(port.out(), format!("{}x", preamble()));
}

#[test]
fn test_bare_command_dispatches_with_empty_args() {
    let hits = Cell::new(0u32);
    let args_empty = Cell::new(false);
    let handler = |args: &ArgMap, _: &mut dyn Transport| {
        hits.set(hits.get() + 1);
        args_empty.set(args.is_empty());
    };

    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();
    term.register("ab", &handler).unwrap();

    port.feed("ab\n");
    term.poll(&mut port);

    assert_eq!(hits.get(), 1);
    assert!(args_empty.get());
    assert_eq!(term.history().get(0), Some("ab"));
}

#[test]
fn test_flag_values_reach_handler() {
    let seen = RefCell::new(HashMap::new());
    let handler = |args: &ArgMap, _: &mut dyn Transport| {
        for (key, value) in args.iter() {
            seen.borrow_mut()
                .insert(key.to_owned(), value.to_owned());
        }
    };

    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();
    term.register("cmd", &handler).unwrap();

    port.feed("cmd -x 1 -y 2\n");
    term.poll(&mut port);

    let seen = seen.borrow();
    assert_eq!(seen.get("-x").map(String::as_str), Some("1"));
    assert_eq!(seen.get("-y").map(String::as_str), Some("2"));
    assert_eq!(seen.len(), 2);
}

#[test]
fn test_trailing_flag_never_reaches_handler() {
    let arg_count = Cell::new(usize::MAX);
    let handler = |args: &ArgMap, _: &mut dyn Transport| arg_count.set(args.len());

    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();
    term.register("cmd", &handler).unwrap();

    port.feed("cmd -x\n");
    term.poll(&mut port);

    assert_eq!(arg_count.get(), 0);
}

#[test]
fn test_unknown_command_reports_and_leaves_state() {
    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();

    // The failed dispatch of "a" leaves its parsed flag behind
    port.feed("a -b c\n");
    term.poll(&mut port);
    assert_eq!(term.args().len(), 1);

    port.feed("zzz\n");
    term.poll(&mut port);

    assert!(port.out().contains("\nERROR: Command not found: zzz\n"));
    assert!(port.out().ends_with(PROMPT));
    assert!(term.history().is_empty());
    assert_eq!(term.args().len(), 1);
}

#[test]
fn test_dispatch_result_plumbing() {
    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();

    assert_eq!(term.process_byte(b'a', &mut port), None);
    assert_eq!(term.process_byte(b'b', &mut port), None);
    assert_eq!(
        term.process_byte(b'\n', &mut port),
        Some(Err(TerminalError::UnknownCommand))
    );
}

#[test]
fn test_args_cleared_after_successful_dispatch() {
    let args_during_run = Cell::new(0usize);
    let handler = |args: &ArgMap, _: &mut dyn Transport| args_during_run.set(args.len());

    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();
    term.register("cmd", &handler).unwrap();

    port.feed("cmd -x 1\n");
    term.poll(&mut port);

    assert_eq!(args_during_run.get(), 1);
    assert!(term.args().is_empty());
}

#[test]
fn test_clear_writes_100_newlines() {
    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();

    let result = term.dispatch("clear", &mut port);

    assert_eq!(result, Ok(()));
    assert_eq!(port.tx.len(), CLEAR_ROWS + PROMPT.len());
    assert!(port.tx[..CLEAR_ROWS].iter().all(|byte| *byte == b'\n'));
    assert!(port.out().ends_with(PROMPT));
    assert_eq!(term.history().get(0), Some("clear"));
}

#[test]
fn test_history_records_in_invocation_order() {
    let noop = |_: &ArgMap, _: &mut dyn Transport| {};

    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();
    term.register("one", &noop).unwrap();
    term.register("two", &noop).unwrap();

    port.feed("one\ntwo\none\n");
    term.poll(&mut port);

    assert_eq!(term.history().get(0), Some("one"));
    assert_eq!(term.history().get(1), Some("two"));
    assert_eq!(term.history().get(2), Some("one"));
    assert_eq!(term.history().len(), 3);
    assert_eq!(term.history().cursor(), 3);
}

#[test]
fn test_prompt_follows_every_dispatch() {
    let noop = |_: &ArgMap, _: &mut dyn Transport| {};

    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();
    term.register("one", &noop).unwrap();

    port.feed("one\nzzz\n");
    term.poll(&mut port);

    // Startup prompt plus one per dispatch, found or not
    assert_eq!(port.out().matches(PROMPT).count(), 3);
}

#[test]
fn test_crlf_terminates_exactly_once() {
    let hits = Cell::new(0u32);
    let handler = |_: &ArgMap, _: &mut dyn Transport| hits.set(hits.get() + 1);

    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();
    term.register("ab", &handler).unwrap();

    port.feed("ab\r\n");
    term.poll(&mut port);

    assert_eq!(hits.get(), 1);
    assert_eq!(term.pending_line(), "");
}

#[test]
fn test_overlong_line_is_capped() {
    let mut term = Terminal::new(DEVICE_ID);
    let mut port = MockPort::new();

    let long = "a".repeat(LINE_SIZE + 72);
    port.feed(&long);
    term.poll(&mut port);

    // Everything echoed, only the first LINE_SIZE bytes retained
    assert!(port.out().ends_with(&long));
    assert_eq!(term.pending_line().len(), LINE_SIZE);
}

#[test]
fn test_read_line_blocking_returns_line() {
    let mut port = MockPort::new();
    port.feed("hello\n");

    let line = read_line_blocking(&mut port);

    assert_eq!(line.as_str(), "hello");
    assert_eq!(port.out(), "hello");
}

#[test]
fn test_read_line_blocking_skips_short_lines_and_control_bytes() {
    let mut port = MockPort::new();
    port.feed("x\nab\x07cd\r\n");

    let line = read_line_blocking(&mut port);

    // "x" was too short, BEL and CR are not printable
    assert_eq!(line.as_str(), "abcd");
    assert_eq!(port.out(), "xabcd");
}
