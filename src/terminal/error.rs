//! Terminal error types

/// Non-fatal terminal errors. Every one of these degrades to a printed
/// message and a fresh prompt; none aborts the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalError {
    /// Looked-up name absent from the command registry
    UnknownCommand,
    /// Bulk registration called with mismatched name/handler counts
    RegistrationMismatch,
    /// Command table is full
    RegistryFull,
}

impl TerminalError {
    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "command not found",
            Self::RegistrationMismatch => "key and handler counts differ",
            Self::RegistryFull => "command table full",
        }
    }
}

impl core::fmt::Display for TerminalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}
