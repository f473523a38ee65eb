//! RustTinyTerminal - Main entry point
//!
//! On the device: bring up the console UART, register the demo commands,
//! and poll the terminal forever. On the host the same terminal runs fed
//! from stdin, line by line, as a wiring check that needs no hardware.

#![cfg_attr(target_arch = "xtensa", no_std)]
#![cfg_attr(target_arch = "xtensa", no_main)]

use core::fmt::Write as _;

use rust_tiny_terminal::terminal::{ArgMap, Transport, TransportWriter};

// --- Demo commands, registered by both entry points ---

/// `echo -m <text>`: write back the value of the -m flag.
fn cmd_echo(args: &ArgMap, port: &mut dyn Transport) {
    let mut out = TransportWriter::new(port);
    match args.get("-m") {
        Some(message) => {
            let _ = write!(out, "\n{}", message);
        }
        None => {
            let _ = write!(out, "\nusage: echo -m <text>");
        }
    }
}

#[cfg(target_arch = "xtensa")]
mod device {
    use core::fmt::Write as _;

    use esp_idf_svc::sys as esp_idf_sys;

    use rust_tiny_terminal::hal::{chip_id_line, UartTransport, UartTransportConfig};
    use rust_tiny_terminal::terminal::{ArgMap, Terminal, Transport, TransportWriter};

    /// `uptime`: seconds since boot.
    fn cmd_uptime(_args: &ArgMap, port: &mut dyn Transport) {
        let uptime_s = unsafe { esp_idf_sys::esp_timer_get_time() } / 1_000_000;
        let mut out = TransportWriter::new(port);
        let _ = write!(out, "\nuptime: {}s", uptime_s);
    }

    /// `free`: free heap bytes.
    fn cmd_free(_args: &ArgMap, port: &mut dyn Transport) {
        let heap_free = unsafe { esp_idf_sys::esp_get_free_heap_size() };
        let mut out = TransportWriter::new(port);
        let _ = write!(out, "\nheap: {} bytes free", heap_free);
    }

    pub fn run() -> ! {
        esp_idf_sys::link_patches();

        let mut port = UartTransport::install(0, &UartTransportConfig::default())
            .expect("uart driver install failed");

        let device_id = chip_id_line();
        let mut term = Terminal::new(&device_id);

        let _ = term.register_all(
            &["echo", "uptime", "free"],
            &[&super::cmd_echo, &cmd_uptime, &cmd_free],
            &mut port,
        );

        loop {
            term.poll(&mut port);
            unsafe {
                esp_idf_sys::vTaskDelay(1);
            }
        }
    }
}

#[cfg(target_arch = "xtensa")]
#[no_mangle]
fn main() {
    device::run()
}

#[cfg(not(target_arch = "xtensa"))]
fn main() {
    use std::collections::VecDeque;
    use std::io::{self, BufRead, Write as _};

    use rust_tiny_terminal::terminal::Terminal;

    /// Stdin-fed port: each typed line is queued, output goes to stdout.
    struct StdioPort {
        rx: VecDeque<u8>,
    }

    impl Transport for StdioPort {
        fn byte_available(&mut self) -> bool {
            !self.rx.is_empty()
        }

        fn read_byte(&mut self) -> u8 {
            self.rx.pop_front().unwrap_or(0)
        }

        fn write_byte(&mut self, byte: u8) {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(&[byte]);
            let _ = stdout.flush();
        }
    }

    let mut port = StdioPort { rx: VecDeque::new() };
    let mut term = Terminal::new("ChipID: 0 (host simulation)");

    let _ = term.register_all(&["echo"], &[&cmd_echo], &mut port);

    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        for byte in line.bytes() {
            port.rx.push_back(byte);
        }
        port.rx.push_back(b'\n');
        term.poll(&mut port);
    }
}
