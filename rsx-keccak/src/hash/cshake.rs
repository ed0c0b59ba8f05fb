//! Customizable SHAKE.
//!
//! Two families live here. The "simple" functions carry a 16-bit customization counter in a
//! fixed 8-byte header lane, which is cheap to set up per output stream and is the layout the
//! cipher's consumers expect. [`cshake128`]/[`cshake256`] and [`kmac128`]/[`kmac256`] follow
//! SP800-185 with arbitrary function-name and customization strings.
//!
//! The simple header is `01 || rate || 01 00 || 01 10 || cstm` (counter little-endian), which
//! is exactly `bytepad(encode_string("") || encode_string(cstm), rate)` truncated to its
//! non-zero lane.

use anyhow::Result;

use crate::{
    permutation::{
        keccak_permute,
        KeccakState,
        STATE_BYTES,
    },
    sponge::{
        keccak_absorb,
        keccak_squeeze,
        keccak_squeezeblocks,
        Sponge,
        CSHAKE128_RATE,
        CSHAKE256_RATE,
        CSHAKE_DOMAIN,
        SHAKE_DOMAIN,
    },
    try_or,
    Error::ZeroLengthOutput,
};

fn simple_header(rate: usize, cstm: u16) -> u64 {
    let [lo, hi] = cstm.to_le_bytes();
    u64::from_le_bytes([0x01, rate as u8, 0x01, 0x00, 0x01, 0x10, lo, hi])
}

fn simple_absorb(state: &mut KeccakState, rate: usize, cstm: u16, seed: &[u8]) {
    state[0] = simple_header(rate, cstm);
    keccak_permute(state);
    keccak_absorb(state, rate, seed, CSHAKE_DOMAIN);
}

fn simple(output: &mut [u8], rate: usize, cstm: u16, seed: &[u8]) -> Result<()> {
    try_or!(!output.is_empty(), ZeroLengthOutput)?;
    let mut state = [0u64; 25];
    simple_absorb(&mut state, rate, cstm, seed);
    keccak_squeeze(output, &mut state, rate);
    Ok(())
}

/// Fill `output` with cSHAKE128 of `seed` customized by the counter `cstm`.
pub fn cshake128_simple(output: &mut [u8], cstm: u16, seed: &[u8]) -> Result<()> {
    simple(output, CSHAKE128_RATE, cstm, seed)
}

/// Initialize a zeroed `state` with the counter header and absorb `seed`.
pub fn cshake128_simple_absorb(state: &mut KeccakState, cstm: u16, seed: &[u8]) {
    simple_absorb(state, CSHAKE128_RATE, cstm, seed);
}

pub fn cshake128_simple_squeezeblocks(output: &mut [u8], nblocks: usize, state: &mut KeccakState) {
    keccak_squeezeblocks(output, nblocks, state, CSHAKE128_RATE);
}

/// Fill `output` with cSHAKE256 of `seed` customized by the counter `cstm`.
pub fn cshake256_simple(output: &mut [u8], cstm: u16, seed: &[u8]) -> Result<()> {
    simple(output, CSHAKE256_RATE, cstm, seed)
}

/// Initialize a zeroed `state` with the counter header and absorb `seed`.
pub fn cshake256_simple_absorb(state: &mut KeccakState, cstm: u16, seed: &[u8]) {
    simple_absorb(state, CSHAKE256_RATE, cstm, seed);
}

pub fn cshake256_simple_squeezeblocks(output: &mut [u8], nblocks: usize, state: &mut KeccakState) {
    keccak_squeezeblocks(output, nblocks, state, CSHAKE256_RATE);
}

/// SP800-185 `left_encode`: the byte count followed by `x` in big-endian without leading zeros.
pub fn left_encode(x: u64) -> ([u8; 9], usize) {
    let mut buf = [0u8; 9];
    let n = encoded_len(x);
    buf[0] = n as u8;
    buf[1..=n].copy_from_slice(&x.to_be_bytes()[8 - n..]);
    (buf, n + 1)
}

/// SP800-185 `right_encode`: `x` in big-endian without leading zeros followed by the byte count.
pub fn right_encode(x: u64) -> ([u8; 9], usize) {
    let mut buf = [0u8; 9];
    let n = encoded_len(x);
    buf[..n].copy_from_slice(&x.to_be_bytes()[8 - n..]);
    buf[n] = n as u8;
    (buf, n + 1)
}

fn encoded_len(x: u64) -> usize {
    core::cmp::max(1, 8 - (x.leading_zeros() as usize) / 8)
}

fn bit_len(len: usize) -> u64 {
    (len as u64).wrapping_mul(8)
}

// Absorb `encode_string` of `s`; returns the number of bytes absorbed.
fn absorb_encoded_string(sponge: &mut Sponge, s: &[u8]) -> usize {
    let (prefix, n) = left_encode(bit_len(s.len()));
    sponge.update(&prefix[..n]);
    sponge.update(s);
    n + s.len()
}

/// Absorb `bytepad(encode_string(s0) || encode_string(s1) || ..., rate)`.
fn absorb_bytepad(sponge: &mut Sponge, strings: &[&[u8]]) {
    let w = sponge.rate();
    let (prefix, n) = left_encode(w as u64);
    sponge.update(&prefix[..n]);
    let mut written = n;
    for s in strings {
        written += absorb_encoded_string(sponge, s);
    }

    let zeros = [0u8; STATE_BYTES];
    let rem = written % w;
    if rem != 0 {
        sponge.update(&zeros[..w - rem]);
    }
}

fn cshake(output: &mut [u8], rate: usize, input: &[u8], name: &[u8], custom: &[u8]) -> Result<()> {
    try_or!(!output.is_empty(), ZeroLengthOutput)?;
    if name.is_empty() && custom.is_empty() {
        Sponge::init(rate, SHAKE_DOMAIN).absorb(input).squeeze(output);
        return Ok(());
    }

    let mut sponge = Sponge::init(rate, CSHAKE_DOMAIN);
    absorb_bytepad(&mut sponge, &[name, custom]);
    sponge.absorb(input).squeeze(output);
    Ok(())
}

/// SP800-185 cSHAKE128 with function name `name` and customization string `custom`.
///
/// With both strings empty this is SHAKE128.
pub fn cshake128(output: &mut [u8], input: &[u8], name: &[u8], custom: &[u8]) -> Result<()> {
    cshake(output, CSHAKE128_RATE, input, name, custom)
}

/// SP800-185 cSHAKE256 with function name `name` and customization string `custom`.
///
/// With both strings empty this is SHAKE256.
pub fn cshake256(output: &mut [u8], input: &[u8], name: &[u8], custom: &[u8]) -> Result<()> {
    cshake(output, CSHAKE256_RATE, input, name, custom)
}

fn kmac(output: &mut [u8], rate: usize, key: &[u8], input: &[u8], custom: &[u8]) -> Result<()> {
    try_or!(!output.is_empty(), ZeroLengthOutput)?;
    let mut sponge = Sponge::init(rate, CSHAKE_DOMAIN);
    absorb_bytepad(&mut sponge, &[&b"KMAC"[..], custom]);
    absorb_bytepad(&mut sponge, &[key]);
    sponge.update(input);
    let (suffix, n) = right_encode(bit_len(output.len()));
    sponge.absorb(&suffix[..n]).squeeze(output);
    Ok(())
}

/// KMAC128 of `input` under `key`; the tag length is the length of `output`.
pub fn kmac128(output: &mut [u8], key: &[u8], input: &[u8], custom: &[u8]) -> Result<()> {
    kmac(output, CSHAKE128_RATE, key, input, custom)
}

/// KMAC256 of `input` under `key`; the tag length is the length of `output`.
pub fn kmac256(output: &mut [u8], key: &[u8], input: &[u8], custom: &[u8]) -> Result<()> {
    kmac(output, CSHAKE256_RATE, key, input, custom)
}
