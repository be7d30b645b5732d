//! AES-GCM reference engine for MACsec-style packet encryption/decryption.
//!
//! A bit-exact software model of a hardware GCM core: AES-128 block
//! encryption, GF(2^128) multiplication, and a stateful engine that
//! interleaves counter-mode keystream generation with GHASH authentication
//! over associated data and ciphertext. Built for use as a verification
//! reference, not for throughput — the GF(2^128) multiply in particular is
//! the bit-serial, constant-structure form rather than a table-accelerated
//! one, so a second implementation doesn't need verifying against the one
//! it's meant to check.
//!
//! # Modules
//!
//! - [`block`] — `Block128`, the 16-byte big-endian value type everything else is built from
//! - [`gf128`] — GF(2^128) multiplication under the GCM reduction polynomial
//! - [`aes`] — AES-128 key schedule and single-block forward encryption (FIPS 197)
//! - [`engine`] — `GcmEngine`, the stateful per-key/per-packet core
//! - [`packet`] — packet-level operations (`process_packet`, `aes_hkey`) built on `engine`
//! - [`error`] — `GcmError`, the fatal contract-violation error type
//! - [`trace`] — injected tracing (`TraceSink`, `NullSink`, `LogSink`)

pub mod aes;
pub mod block;
pub mod engine;
pub mod error;
pub mod gf128;
pub mod packet;
pub mod trace;

pub use block::Block128;
pub use engine::GcmEngine;
pub use error::GcmError;
pub use packet::{aes_hkey, process_packet};
pub use trace::{LogSink, NullSink, TraceSink};
