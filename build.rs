// RustTinyTerminal - Build Script
//
// Emits the ESP-IDF link configuration when cross-compiling for the device.
// Host builds (tests, the stdin simulation) skip it entirely.

use std::env;

fn main() {
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    if target_arch == "xtensa" {
        // ESP-IDF environment setup (MUST be first!)
        embuild::espidf::sysenv::output();
    }
}
