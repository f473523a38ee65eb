//! Hardware Abstraction Layer for RustTinyTerminal.
//!
//! Thin wrappers around ESP-IDF peripherals. Business logic stays in the
//! terminal core, HAL is just I/O; host builds compile none of this and
//! drive the core through mock ports instead.

#[cfg(target_arch = "xtensa")]
pub mod uart;

#[cfg(target_arch = "xtensa")]
pub use uart::{chip_id_line, UartTransport, UartTransportConfig};
