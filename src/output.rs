//! The output stream: an append-only byte sink (spec §4.7).
//!
//! Thin by design - it forwards to the underlying `std::io::Write` and surfaces I/O errors
//! unchanged, with no position attached (I/O errors have no source location).

use std::io;

use crate::error::EvalError;
use crate::input::Position;

pub trait OutputStream {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl<W: io::Write> OutputStream for W {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes)
    }
}

/// Wrap an I/O failure from the output stream as an `EvalError`, attributed to the position
/// that was being rendered when the write was attempted.
pub fn io_err(e: io::Error, pos: &Position) -> EvalError {
    EvalError::Failed(format!("output stream write failed: {e}"), pos.clone())
}
