//! Error types for the GCM reference engine.
//!
//! Every error the engine can produce is a fatal programmer error: a
//! contract violation, never a transient condition. There is no retry
//! path — callers are expected to propagate the error and stop processing
//! the packet, not to recover locally.

use thiserror::Error;

/// A fatal contract violation raised by [`crate::engine::GcmEngine`] or
/// [`crate::packet::process_packet`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcmError {
    /// An operation was invoked in a state that forbids it — e.g.
    /// `add_auth` after the AAD region has been sealed, or encrypting
    /// before a key and packet nonce have been established.
    #[error("state violation: {0}")]
    StateViolation(&'static str),

    /// `size` passed to `encrypt`/`decrypt` was outside `1..=16`, or the
    /// `auth_only` + `enc` combination passed to `process_packet` was
    /// undefined.
    #[error("size violation: {reason} (got {got})")]
    SizeViolation { reason: &'static str, got: usize },

    /// Accumulated AAD or ciphertext length, in bits, would exceed
    /// `u32::MAX` — the length-block layout this engine uses assumes
    /// both fields fit in 32 bits.
    #[error("length overflow: {field} exceeds 2^32-1 bits")]
    LengthOverflow { field: &'static str },
}
