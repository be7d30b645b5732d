//! The stateful AES-GCM engine: per-key and per-packet state, driving the
//! counter, keystream, GHASH accumulator, and final tag.
//!
//! State machine:
//!
//! ```text
//! UNKEYED --set_key--> KEYED --packet_init--> AAD_OPEN
//!   AAD_OPEN --add_auth--> AAD_OPEN
//!   AAD_OPEN --auth_finalize/encrypt/decrypt--> AAD_SEALED
//!   AAD_SEALED --encrypt/decrypt--> AAD_SEALED
//!   AAD_*     --get_tag--> TAGGED
//!   TAGGED|KEYED|AAD_* --packet_init--> AAD_OPEN   (next packet)
//! ```

use crate::aes::{self, AesKeySchedule};
use crate::block::Block128;
use crate::error::GcmError;
use crate::gf128;
use crate::trace::{NullSink, TraceSink};

/// Maximum number of bits a length counter (`alen` or `plen`) may reach;
/// the length-block layout this engine uses only has room for 32 bits.
const MAX_LEN_BITS: u64 = u32::MAX as u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EngineState {
    Unkeyed,
    Keyed,
    AadOpen,
    AadSealed,
    Tagged,
}

/// A reusable AES-GCM engine: one key schedule shared across many packets,
/// one small per-packet state reset by [`GcmEngine::packet_init`].
///
/// Generic over an injected [`TraceSink`] (default [`NullSink`], which
/// costs nothing); see the crate docs for why tracing is injected rather
/// than hardwired to a global logger.
pub struct GcmEngine<S: TraceSink = NullSink> {
    sched: Option<AesKeySchedule>,
    h: Block128,
    state: EngineState,
    ctr: Block128,
    ek0: Block128,
    x: Block128,
    aad_acc: Block128,
    aad_idx: usize,
    alen: u64,
    plen: u64,
    sink: S,
}

impl GcmEngine<NullSink> {
    /// Create a new, unkeyed engine with the default (no-op) trace sink.
    pub fn new() -> Self {
        Self::with_sink(NullSink)
    }
}

impl Default for GcmEngine<NullSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TraceSink> GcmEngine<S> {
    /// Create a new, unkeyed engine using a caller-supplied trace sink.
    pub fn with_sink(sink: S) -> Self {
        Self {
            sched: None,
            h: Block128::ZERO,
            state: EngineState::Unkeyed,
            ctr: Block128::ZERO,
            ek0: Block128::ZERO,
            x: Block128::ZERO,
            aad_acc: Block128::ZERO,
            aad_idx: 0,
            alen: 0,
            plen: 0,
            sink,
        }
    }

    /// Build and cache the AES-128 key schedule, and derive `H = AES_K(0^128)`.
    ///
    /// Discards any prior per-packet state.
    pub fn set_key(&mut self, key: &[u8; 16]) {
        let sched = AesKeySchedule::new(key);
        self.h = aes::encrypt(&sched, &Block128::ZERO);
        self.sched = Some(sched);
        self.state = EngineState::Keyed;
        self.sink.key_set(&self.h);
    }

    fn require_sched(&self) -> Result<&AesKeySchedule, GcmError> {
        self.sched
            .as_ref()
            .ok_or(GcmError::StateViolation("key has not been set"))
    }

    /// Establish the initial counter block for one packet from `(sci, pn)`
    /// and cache `EK0`. Requires a key to already be set via [`Self::set_key`].
    pub fn packet_init(&mut self, sci: u64, pn: u32) -> Result<(), GcmError> {
        if self.state == EngineState::Unkeyed {
            return Err(GcmError::StateViolation(
                "packet_init called before set_key",
            ));
        }

        let mut ctr_bytes = [0u8; 16];
        ctr_bytes[0..8].copy_from_slice(&sci.to_be_bytes());
        ctr_bytes[8..12].copy_from_slice(&pn.to_be_bytes());
        let mut ctr = Block128::from_bytes(ctr_bytes);
        ctr.increment(1);

        let sched = self.require_sched()?;
        self.ek0 = aes::encrypt(sched, &ctr);
        self.ctr = ctr;

        self.x = Block128::ZERO;
        self.aad_acc = Block128::ZERO;
        self.aad_idx = 0;
        self.alen = 0;
        self.plen = 0;
        self.state = EngineState::AadOpen;

        self.sink.packet_init(sci, pn, &self.ek0);
        Ok(())
    }

    /// Append one byte of associated (authenticated-only) data.
    pub fn add_auth(&mut self, b: u8) -> Result<(), GcmError> {
        if self.state != EngineState::AadOpen {
            return Err(GcmError::StateViolation(
                "add_auth called after AAD has been sealed, or before packet_init",
            ));
        }

        self.bump_alen(1)?;
        self.aad_acc.as_bytes_mut()[self.aad_idx] = b;
        self.aad_idx += 1;

        if self.aad_idx == 16 {
            self.fold_ghash(self.aad_acc);
            self.aad_idx = 0;
        }
        Ok(())
    }

    /// Close the AAD region, zero-padding and folding in any partial final block.
    ///
    /// Idempotent: calling this more than once, or after it has already
    /// been invoked implicitly by `encrypt`/`decrypt`, has no further effect.
    pub fn auth_finalize(&mut self) -> Result<(), GcmError> {
        match self.state {
            EngineState::AadSealed | EngineState::Tagged => return Ok(()),
            EngineState::AadOpen => {}
            EngineState::Unkeyed | EngineState::Keyed => {
                return Err(GcmError::StateViolation(
                    "auth_finalize called before packet_init",
                ));
            }
        }

        if self.aad_idx > 0 {
            let mut padded = self.aad_acc;
            padded.zero_tail(self.aad_idx);
            self.fold_ghash(padded);
            self.aad_idx = 0;
        }
        self.state = EngineState::AadSealed;
        Ok(())
    }

    /// Encrypt one block of plaintext (`size` valid bytes, `1..=16`),
    /// folding the resulting ciphertext into the authentication tag.
    ///
    /// Bytes `[size..16)` of the returned block are zeroed; only the
    /// first `size` bytes are meaningful ciphertext.
    pub fn encrypt(&mut self, p: &Block128, size: usize) -> Result<Block128, GcmError> {
        self.seal_if_needed(size)?;
        let eki = self.next_keystream_block()?;
        let c = p.xor_with(&eki);
        self.fold_ciphertext(&c, size);
        self.bump_plen(size)?;
        Ok(c)
    }

    /// Decrypt one block of ciphertext. Mirror of [`Self::encrypt`]: the
    /// *ciphertext* (not the recovered plaintext) is what gets folded
    /// into GHASH, matching the encrypt side exactly.
    pub fn decrypt(&mut self, c: &Block128, size: usize) -> Result<Block128, GcmError> {
        self.seal_if_needed(size)?;
        let eki = self.next_keystream_block()?;
        let p = c.xor_with(&eki);
        self.fold_ciphertext(c, size);
        self.bump_plen(size)?;
        Ok(p)
    }

    /// Finalize GHASH with a length block and XOR with `EK0` to produce the
    /// 128-bit authentication tag.
    pub fn get_tag(&mut self) -> Result<Block128, GcmError> {
        match self.state {
            EngineState::AadOpen => self.auth_finalize()?,
            EngineState::AadSealed | EngineState::Tagged => {}
            EngineState::Unkeyed | EngineState::Keyed => {
                return Err(GcmError::StateViolation(
                    "get_tag called before packet_init",
                ));
            }
        }

        let mut length = [0u8; 16];
        length[4..8].copy_from_slice(&((self.alen * 8) as u32).to_be_bytes());
        length[12..16].copy_from_slice(&((self.plen * 8) as u32).to_be_bytes());
        self.fold_ghash(Block128::from_bytes(length));

        let tag = self.x.xor_with(&self.ek0);
        self.state = EngineState::Tagged;
        self.sink.tag_finalized(&tag);
        Ok(tag)
    }

    // ---- internal helpers ----

    /// Validate `size`, and implicitly seal the AAD region on first
    /// encrypt/decrypt call, matching the documented automatic-finalize
    /// behavior.
    fn seal_if_needed(&mut self, size: usize) -> Result<(), GcmError> {
        if !(1..=16).contains(&size) {
            return Err(GcmError::SizeViolation {
                reason: "encrypt/decrypt size must be in 1..=16",
                got: size,
            });
        }
        match self.state {
            EngineState::AadOpen => self.auth_finalize(),
            EngineState::AadSealed => Ok(()),
            EngineState::Unkeyed | EngineState::Keyed | EngineState::Tagged => {
                Err(GcmError::StateViolation(
                    "encrypt/decrypt called before packet_init, or after get_tag",
                ))
            }
        }
    }

    fn next_keystream_block(&mut self) -> Result<Block128, GcmError> {
        self.ctr.increment(1);
        let sched = self.require_sched()?;
        Ok(aes::encrypt(sched, &self.ctr))
    }

    /// Fold one ciphertext block (zero-padded past `size`) into GHASH.
    fn fold_ciphertext(&mut self, c: &Block128, size: usize) {
        let mut c_auth = *c;
        if size < 16 {
            c_auth.zero_tail(size);
        }
        self.fold_ghash(c_auth);
    }

    /// `X := (X XOR block) · H`, the one GHASH step used for AAD,
    /// ciphertext, and the final length block alike.
    fn fold_ghash(&mut self, block: Block128) {
        self.x.xor_assign(&block);
        self.x = gf128::mul(&self.x, &self.h);
        self.sink.ghash_fold(&self.x);
    }

    fn bump_alen(&mut self, n: u64) -> Result<(), GcmError> {
        self.alen += n;
        if self.alen.saturating_mul(8) > MAX_LEN_BITS {
            return Err(GcmError::LengthOverflow { field: "alen" });
        }
        Ok(())
    }

    fn bump_plen(&mut self, n: usize) -> Result<(), GcmError> {
        self.plen += n as u64;
        if self.plen.saturating_mul(8) > MAX_LEN_BITS {
            return Err(GcmError::LengthOverflow { field: "plen" });
        }
        Ok(())
    }
}
