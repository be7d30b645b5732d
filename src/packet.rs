//! Packet-level glue on top of [`crate::engine::GcmEngine`]: the operations
//! a verification harness actually drives per packet, matching the original
//! `gcm_crypt`/`aes_hkey` DPI entry points one layer up from the raw engine.
//!
//! This module stops at logical byte arrays. It does not know about the
//! word-packed, byte-reversed wire layout a SystemVerilog testbench speaks —
//! that conversion belongs to whatever glue calls in here, not to this crate.

use crate::aes::{self, AesKeySchedule};
use crate::block::Block128;
use crate::engine::GcmEngine;
use crate::error::GcmError;
use crate::trace::TraceSink;

/// Transform one packet in place: copy the unauthenticated prefix, fold the
/// authenticated-only region into the tag, encrypt or decrypt the remaining
/// region (unless `auth_only`), and append the 16-byte tag.
///
/// `in_pkt` holds `auth_start + auth_size + enc_size` bytes; `out_pkt` must
/// have room for that many plus 16. Returns the number of bytes written to
/// `out_pkt`.
#[allow(clippy::too_many_arguments)]
pub fn process_packet<S: TraceSink>(
    engine: &mut GcmEngine<S>,
    sci: u64,
    pn: u32,
    auth_only: bool,
    auth_start: usize,
    auth_size: usize,
    enc: bool,
    enc_size: usize,
    in_pkt: &[u8],
    out_pkt: &mut [u8],
) -> Result<usize, GcmError> {
    let expected_in = auth_start + auth_size + enc_size;
    if in_pkt.len() < expected_in {
        return Err(GcmError::SizeViolation {
            reason: "in_pkt shorter than auth_start + auth_size + enc_size",
            got: in_pkt.len(),
        });
    }
    if out_pkt.len() < expected_in + 16 {
        return Err(GcmError::SizeViolation {
            reason: "out_pkt has no room for auth_start + auth_size + enc_size + tag",
            got: out_pkt.len(),
        });
    }

    engine.packet_init(sci, pn)?;

    out_pkt[..auth_start].copy_from_slice(&in_pkt[..auth_start]);

    let auth_region_end = auth_start + auth_size;
    for i in auth_start..auth_region_end {
        engine.add_auth(in_pkt[i])?;
    }
    out_pkt[auth_start..auth_region_end].copy_from_slice(&in_pkt[auth_start..auth_region_end]);

    let mut cursor = auth_region_end;

    if auth_only {
        let tail_end = auth_region_end + enc_size;
        for i in auth_region_end..tail_end {
            engine.add_auth(in_pkt[i])?;
        }
        out_pkt[auth_region_end..tail_end].copy_from_slice(&in_pkt[auth_region_end..tail_end]);
        cursor = tail_end;
    } else {
        let payload = &in_pkt[auth_region_end..auth_region_end + enc_size];
        for chunk in payload.chunks(16) {
            let mut block_bytes = [0u8; 16];
            block_bytes[..chunk.len()].copy_from_slice(chunk);
            let block = Block128::from_bytes(block_bytes);

            let out_block = if enc {
                engine.encrypt(&block, chunk.len())?
            } else {
                engine.decrypt(&block, chunk.len())?
            };

            out_pkt[cursor..cursor + chunk.len()]
                .copy_from_slice(&out_block.as_bytes()[..chunk.len()]);
            cursor += chunk.len();
        }
    }

    let tag = engine.get_tag()?;
    out_pkt[cursor..cursor + 16].copy_from_slice(tag.as_bytes());
    cursor += 16;

    Ok(cursor)
}

/// Single AES-128 block encryption, used by verification harnesses to
/// precompute the GHASH subkey `H` externally without driving a full
/// [`GcmEngine`].
pub fn aes_hkey(key: &[u8; 16], input: &[u8; 16]) -> [u8; 16] {
    let sched = AesKeySchedule::new(key);
    *aes::encrypt(&sched, &Block128::from_bytes(*input)).as_bytes()
}
