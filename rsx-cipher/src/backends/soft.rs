//! Portable byte-oriented Rijndael round function.
//!
//! The state is the 16-byte block in input order: byte `4 * c + r` is row `r` of column `c`.

use super::RoundFunction;
use crate::{
    schedule::RoundKeys,
    tables::{
        INV_SBOX,
        SBOX,
    },
    variant::Block,
};

/// Software backend, available on every target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Soft;

impl RoundFunction for Soft {
    fn encrypt_block(&self, round_keys: &RoundKeys, block: &mut Block) {
        encrypt(round_keys, block);
    }

    fn decrypt_block(&self, round_keys: &RoundKeys, block: &mut Block) {
        decrypt(round_keys, block);
    }
}

fn xtime(b: u8) -> u8 {
    (b << 1) ^ (((b >> 7) & 1) * 0x1b)
}

fn add_round_key(state: &mut Block, key: &Block) {
    for (s, k) in state.iter_mut().zip(key.iter()) {
        *s ^= k;
    }
}

fn sub_bytes(state: &mut Block) {
    for s in state.iter_mut() {
        *s = SBOX[*s as usize];
    }
}

fn inv_sub_bytes(state: &mut Block) {
    for s in state.iter_mut() {
        *s = INV_SBOX[*s as usize];
    }
}

// Row r rotates left by r columns.
fn shift_rows(state: &mut Block) {
    let old = *state;
    for c in 0..4 {
        for r in 1..4 {
            state[4 * c + r] = old[4 * ((c + r) % 4) + r];
        }
    }
}

fn inv_shift_rows(state: &mut Block) {
    let old = *state;
    for c in 0..4 {
        for r in 1..4 {
            state[4 * ((c + r) % 4) + r] = old[4 * c + r];
        }
    }
}

pub(crate) fn mix_columns(state: &mut Block) {
    for col in state.chunks_exact_mut(4) {
        let a = [col[0], col[1], col[2], col[3]];
        let t = a[0] ^ a[1] ^ a[2] ^ a[3];
        for r in 0..4 {
            col[r] = a[r] ^ t ^ xtime(a[r] ^ a[(r + 1) % 4]);
        }
    }
}

// InvMixColumns factors as a pre-multiplication by {04}x^2 + {05} followed by MixColumns.
pub(crate) fn inv_mix_columns(state: &mut Block) {
    for col in state.chunks_exact_mut(4) {
        let u = xtime(xtime(col[0] ^ col[2]));
        let v = xtime(xtime(col[1] ^ col[3]));
        col[0] ^= u;
        col[1] ^= v;
        col[2] ^= u;
        col[3] ^= v;
    }
    mix_columns(state);
}

/// Encrypt `block` in place with an encryption schedule of `rounds + 1` blocks.
fn encrypt(round_keys: &RoundKeys, block: &mut Block) {
    let (first, inner, last) = round_keys.split();

    add_round_key(block, first);
    for key in inner {
        sub_bytes(block);
        shift_rows(block);
        mix_columns(block);
        add_round_key(block, key);
    }
    sub_bytes(block);
    shift_rows(block);
    add_round_key(block, last);
}

/// Decrypt `block` in place with an equivalent-inverse decryption schedule.
fn decrypt(round_keys: &RoundKeys, block: &mut Block) {
    let (first, inner, last) = round_keys.split();

    add_round_key(block, first);
    for key in inner {
        inv_shift_rows(block);
        inv_sub_bytes(block);
        inv_mix_columns(block);
        add_round_key(block, key);
    }
    inv_shift_rows(block);
    inv_sub_bytes(block);
    add_round_key(block, last);
}
