//! Sponge absorb and squeeze primitives over a raw Keccak-f[1600] state.
//!
//! The free functions follow the block-oriented calling convention: `keccak_absorb` is terminal
//! (it pads and injects the last block but does not permute), and every squeezed block is
//! preceded by a permutation. [`Sponge`] and [`Squeezer`] wrap the same semantics in a
//! single-use context that also accepts incremental updates.

mod context;

pub use context::{
    Sponge,
    Squeezer,
};

use crate::permutation::{
    keccak_permute,
    KeccakState,
    STATE_BYTES,
};

/// The SHA3 function domain code.
pub const SHA3_DOMAIN: u8 = 0x06;

/// The SHAKE function domain code.
pub const SHAKE_DOMAIN: u8 = 0x1F;

/// The cSHAKE function domain code.
pub const CSHAKE_DOMAIN: u8 = 0x04;

/// SHA3-256 byte absorption rate.
pub const SHA3_256_RATE: usize = 136;

/// SHA3-512 byte absorption rate.
pub const SHA3_512_RATE: usize = 72;

/// SHAKE128 byte absorption rate.
pub const SHAKE128_RATE: usize = 168;

/// SHAKE256 byte absorption rate.
pub const SHAKE256_RATE: usize = 136;

/// cSHAKE128 byte absorption rate.
pub const CSHAKE128_RATE: usize = 168;

/// cSHAKE256 byte absorption rate.
pub const CSHAKE256_RATE: usize = 136;

pub(crate) fn is_valid_rate(rate: usize) -> bool {
    rate != 0 && rate <= STATE_BYTES && rate % 8 == 0
}

fn load64(bytes: &[u8]) -> u64 {
    let mut lane = [0u8; 8];
    lane.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(lane)
}

/// XOR a rate-sized block into the leading lanes of the state.
pub(crate) fn xor_block(state: &mut KeccakState, block: &[u8]) {
    for (lane, chunk) in state.iter_mut().zip(block.chunks_exact(8)) {
        *lane ^= load64(chunk);
    }
}

/// Copy the leading state lanes into `out`; a trailing partial lane is truncated.
pub(crate) fn store_lanes(state: &KeccakState, out: &mut [u8]) {
    for (chunk, lane) in out.chunks_mut(8).zip(state.iter()) {
        let n = chunk.len();
        chunk.copy_from_slice(&lane.to_le_bytes()[..n]);
    }
}

/// Absorb `message` and finalize it with `domain` and multi-rate padding.
///
/// Full blocks are permuted in; the padded last block is XORed into the state without a
/// trailing permutation, which is deferred to the squeeze. The state is finalized and must not
/// absorb another message.
pub fn keccak_absorb(state: &mut KeccakState, rate: usize, message: &[u8], domain: u8) {
    debug_assert!(is_valid_rate(rate));
    let mut blocks = message.chunks_exact(rate);
    for block in &mut blocks {
        xor_block(state, block);
        keccak_permute(state);
    }

    let tail = blocks.remainder();
    let mut last = [0u8; STATE_BYTES];
    last[..tail.len()].copy_from_slice(tail);
    last[tail.len()] = domain;
    last[rate - 1] |= 0x80;
    xor_block(state, &last[..rate]);
}

/// Permute and extract `nblocks` full rate blocks into `output`.
///
/// `output` must hold at least `nblocks * rate` bytes.
pub fn keccak_squeezeblocks(output: &mut [u8], nblocks: usize, state: &mut KeccakState, rate: usize) {
    debug_assert!(output.len() >= nblocks * rate);
    for block in output.chunks_exact_mut(rate).take(nblocks) {
        keccak_permute(state);
        store_lanes(state, block);
    }
}

/// Fill `output` completely: whole blocks first, then one more block truncated to the remainder.
pub fn keccak_squeeze(output: &mut [u8], state: &mut KeccakState, rate: usize) {
    let nblocks = output.len() / rate;
    let (blocks, rest) = output.split_at_mut(nblocks * rate);
    keccak_squeezeblocks(blocks, nblocks, state, rate);
    if !rest.is_empty() {
        keccak_permute(state);
        store_lanes(state, rest);
    }
}

/// Absorb every full rate block of `message`; trailing bytes are left for [`sha3_finalize`].
pub fn sha3_blockupdate(state: &mut KeccakState, rate: usize, message: &[u8]) {
    debug_assert!(is_valid_rate(rate));
    for block in message.chunks_exact(rate) {
        xor_block(state, block);
        keccak_permute(state);
    }
}

/// Absorb `message` with the SHA3 domain, permute once and write the digest into `output`.
///
/// The digest size is derived from the capacity, `(200 - rate) / 2` bytes: 32 bytes at rate 136
/// and 64 bytes at rate 72. `output` must hold at least that many bytes. Returns the digest size.
pub fn sha3_finalize(state: &mut KeccakState, rate: usize, message: &[u8], output: &mut [u8]) -> usize {
    sha3_blockupdate(state, rate, message);

    let tail = &message[message.len() - message.len() % rate..];
    let mut last = [0u8; STATE_BYTES];
    last[..tail.len()].copy_from_slice(tail);
    last[tail.len()] = SHA3_DOMAIN;
    last[rate - 1] |= 0x80;
    xor_block(state, &last[..rate]);
    keccak_permute(state);

    let digest_size = (STATE_BYTES - rate) / 2;
    store_lanes(state, &mut output[..digest_size]);
    digest_size
}

#[cfg(test)]
mod tests;
