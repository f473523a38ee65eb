//! Line buffer for terminal input

use heapless::String;

/// Maximum line length. Bytes past this are dropped (the echo still happens,
/// so the operator sees what they typed even when the tail is not kept).
pub const LINE_SIZE: usize = 128;

/// Accumulates raw input bytes between line terminators.
///
/// Never contains a terminator byte; the terminal resets it on every
/// newline event.
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
        }
    }

    /// Push a byte, dropping it if the buffer is full
    pub fn push(&mut self, byte: u8) {
        if self.len < LINE_SIZE {
            self.buf[self.len] = byte;
            self.len += 1;
        }
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Take the accumulated line, leaving the buffer empty
    pub fn take(&mut self) -> String<LINE_SIZE> {
        let mut line = String::new();
        let _ = line.push_str(self.as_str());
        self.len = 0;
        line
    }

    /// Get buffer as string slice (empty if the bytes are not valid UTF-8)
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
