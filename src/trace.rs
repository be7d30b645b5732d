//! Narrow injected tracing interface.
//!
//! The original reference threads a `print_msg(type, buf, sprintf(...))`
//! callback through every state-changing call. This keeps that shape —
//! the core never owns a logging backend, it only calls out to one — but
//! expresses it as a Rust trait rather than a hardwired C callback, so the
//! default instantiation costs nothing and no global logger needs to
//! exist for the engine to run.

use crate::block::Block128;

/// Receives trace events from [`crate::engine::GcmEngine`].
///
/// Every method has a no-op default so implementers only need to override
/// the events they care about.
pub trait TraceSink {
    /// Called once from `set_key`, after the key schedule and `H` are computed.
    fn key_set(&mut self, _h: &Block128) {}

    /// Called once from `packet_init`, after `EK0` is computed.
    fn packet_init(&mut self, _sci: u64, _pn: u32, _ek0: &Block128) {}

    /// Called every time the GHASH accumulator is folded (AAD or ciphertext block).
    fn ghash_fold(&mut self, _x: &Block128) {}

    /// Called once from `get_tag`, with the finished tag.
    fn tag_finalized(&mut self, _tag: &Block128) {}
}

/// The default, zero-cost sink: every method is a no-op and inlines away entirely.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TraceSink for NullSink {}

/// Forwards trace events to the `log` crate's `trace!`/`debug!` macros.
///
/// Useful for callers who want ordinary log-based diagnostics without
/// writing their own [`TraceSink`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn key_set(&mut self, h: &Block128) {
        log::debug!("gcm: key set, H = {:02x?}", h.as_bytes());
    }

    fn packet_init(&mut self, sci: u64, pn: u32, ek0: &Block128) {
        log::debug!(
            "gcm: packet_init sci={sci:#018x} pn={pn:#010x} ek0={:02x?}",
            ek0.as_bytes()
        );
    }

    fn ghash_fold(&mut self, x: &Block128) {
        log::trace!("gcm: ghash fold -> {:02x?}", x.as_bytes());
    }

    fn tag_finalized(&mut self, tag: &Block128) {
        log::debug!("gcm: tag = {:02x?}", tag.as_bytes());
    }
}
