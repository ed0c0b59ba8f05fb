//! Round-key schedules.
//!
//! AES-128 and AES-256 use the FIPS-197 expansion. RSX-256 and RSX-512 take their round keys
//! from SHAKE256 of the key (followed by the optional info string): the output is read as
//! little-endian 32-bit words which become the Rijndael column words, so every 4-byte group is
//! byte-reversed into state order.
//!
//! Decryption schedules for all variants are laid out for the equivalent inverse cipher: the
//! encryption schedule in reverse order with InvMixColumns applied to every block but the two
//! outer ones.

use alloc::vec::Vec;
use core::fmt;

use anyhow::Result;
use rsx_keccak::{
    err,
    sponge::{
        Sponge,
        SHAKE256_RATE,
        SHAKE_DOMAIN,
    },
    try_or,
};
use zeroize::Zeroize;

use crate::{
    backends::inv_mix_columns,
    tables::{
        RCON,
        SBOX,
    },
    variant::{
        Block,
        CipherType,
        Direction,
        BLOCK_SIZE,
    },
    Error::{
        InvalidKeyLength,
        KeyDerivationFailure,
        KeyLengthMismatch,
        RoundKeyLengthMismatch,
    },
};

/// Input key material.
#[derive(Clone, Copy)]
pub struct KeyParams<'a> {
    key: &'a [u8],
    info: &'a [u8],
}

impl<'a> KeyParams<'a> {
    pub fn new(key: &'a [u8]) -> Self {
        Self { key, info: &[] }
    }

    /// Key with a distinguishing string; only the RSX variants absorb it.
    pub fn with_info(key: &'a [u8], info: &'a [u8]) -> Self {
        Self { key, info }
    }

    pub fn key(&self) -> &'a [u8] {
        self.key
    }

    pub fn info(&self) -> &'a [u8] {
        self.info
    }
}

impl<'a> fmt::Debug for KeyParams<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyParams")
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .field("info", &self.info.len())
            .finish()
    }
}

/// Expanded round keys of one cipher type and direction.
///
/// The blocks are wiped when the schedule is dropped. A schedule is only obtainable through
/// [`RoundKeys::expand`], so it always holds `cipher.round_key_count()` blocks, at least 11.
///
/// Schedules do not implement `PartialEq`; compare [`RoundKeys::blocks`] in tests.
///
/// ```compile_fail
/// use rsx_cipher::{CipherType, Direction, KeyParams, RoundKeys};
///
/// let a = RoundKeys::expand(KeyParams::new(&[0u8; 16]), CipherType::Aes128, Direction::Encrypt).unwrap();
/// let b = a.clone();
/// assert!(a == b);
/// ```
#[derive(Clone)]
pub struct RoundKeys {
    blocks: Vec<Block>,
    cipher: CipherType,
    direction: Direction,
}

impl RoundKeys {
    /// Expand `params` into a new schedule for `cipher`.
    pub fn expand(params: KeyParams, cipher: CipherType, direction: Direction) -> Result<Self> {
        let mut blocks = alloc::vec![[0u8; BLOCK_SIZE]; cipher.round_key_count()];
        Self::expand_into(params, cipher, direction, &mut blocks)?;
        Ok(Self {
            blocks,
            cipher,
            direction,
        })
    }

    /// Expand `params` into caller-provided storage, which must hold exactly
    /// `cipher.round_key_count()` blocks.
    pub fn expand_into(params: KeyParams, cipher: CipherType, direction: Direction, out: &mut [Block]) -> Result<()> {
        let key_len = params.key.len();
        try_or!(matches!(key_len, 16 | 32 | 64), InvalidKeyLength(key_len))?;
        try_or!(
            key_len == cipher.key_size(),
            KeyLengthMismatch(cipher.key_size(), key_len)
        )?;
        try_or!(
            out.len() == cipher.round_key_count(),
            RoundKeyLengthMismatch(cipher.round_key_count(), out.len())
        )?;

        if cipher.is_extended() {
            derive_extended(params, out)?;
        } else {
            expand_standard(params.key, out);
        }

        if direction == Direction::Decrypt {
            invert(out);
        }
        Ok(())
    }

    pub fn cipher(&self) -> CipherType {
        self.cipher
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Whitening key, inner round keys and final round key.
    pub(crate) fn split(&self) -> (&Block, &[Block], &Block) {
        let n = self.blocks.len();
        (&self.blocks[0], &self.blocks[1..n - 1], &self.blocks[n - 1])
    }
}

impl Drop for RoundKeys {
    fn drop(&mut self) {
        for block in self.blocks.iter_mut() {
            block.zeroize();
        }
    }
}

impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundKeys")
            .field("cipher", &self.cipher)
            .field("direction", &self.direction)
            .field("blocks", &self.blocks.len())
            .finish()
    }
}

fn sub_word(w: [u8; 4]) -> [u8; 4] {
    [SBOX[w[0] as usize], SBOX[w[1] as usize], SBOX[w[2] as usize], SBOX[w[3] as usize]]
}

/// FIPS-197 key expansion into `out.len()` round-key blocks.
fn expand_standard(key: &[u8], out: &mut [Block]) {
    let nk = key.len() / 4;
    let total = out.len() * 4;
    let mut words: Vec<[u8; 4]> = Vec::with_capacity(total);
    for chunk in key.chunks_exact(4) {
        words.push([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in nk..total {
        let mut temp = words[i - 1];
        if i % nk == 0 {
            temp.rotate_left(1);
            temp = sub_word(temp);
            temp[0] ^= RCON[i / nk - 1];
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        let prev = words[i - nk];
        words.push([prev[0] ^ temp[0], prev[1] ^ temp[1], prev[2] ^ temp[2], prev[3] ^ temp[3]]);
    }

    for (block, chunk) in out.iter_mut().zip(words.chunks_exact(4)) {
        for (dst, word) in block.chunks_exact_mut(4).zip(chunk.iter()) {
            dst.copy_from_slice(word);
        }
    }
    for word in words.iter_mut() {
        word.zeroize();
    }
}

/// SHAKE256 round-key derivation for the RSX variants.
fn derive_extended(params: KeyParams, out: &mut [Block]) -> Result<()> {
    let mut sponge = match Sponge::new(SHAKE256_RATE, SHAKE_DOMAIN) {
        Ok(sponge) => sponge,
        Err(_) => return err!(KeyDerivationFailure),
    };
    sponge.update(params.key);
    sponge.update(params.info);

    let mut squeezer = sponge.finalize();
    for block in out.iter_mut() {
        squeezer.squeeze(block);
        for word in block.chunks_exact_mut(4) {
            word.reverse();
        }
    }
    squeezer.zeroize();
    Ok(())
}

fn invert(blocks: &mut [Block]) {
    blocks.reverse();
    let n = blocks.len();
    if n > 2 {
        for block in blocks[1..n - 1].iter_mut() {
            inv_mix_columns(block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aes128_schedule_matches_fips197() {
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let rk = RoundKeys::expand(KeyParams::new(&key), CipherType::Aes128, Direction::Encrypt).unwrap();
        assert_eq!(rk.len(), 11);
        assert_eq!(hex::encode(rk.blocks()[0]), "2b7e151628aed2a6abf7158809cf4f3c");
        assert_eq!(hex::encode(rk.blocks()[1]), "a0fafe1788542cb123a339392a6c7605");
        assert_eq!(hex::encode(rk.blocks()[10]), "d014f9a8c9ee2589e13f0cc8b6630ca6");
    }

    #[test]
    fn aes256_schedule_matches_fips197() {
        let key = hex::decode("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4").unwrap();
        let rk = RoundKeys::expand(KeyParams::new(&key), CipherType::Aes256, Direction::Encrypt).unwrap();
        assert_eq!(rk.len(), 15);
        assert_eq!(hex::encode(rk.blocks()[2]), "9ba354118e6925afa51a8b5f2067fcde");
        assert_eq!(hex::encode(rk.blocks()[14]), "fe4890d1e6188d0b046df344706c631e");
    }

    #[test]
    fn decryption_schedule_reverses_outer_blocks() {
        for &cipher in CipherType::ALL.iter() {
            let key = alloc::vec![0x5au8; cipher.key_size()];
            let enc = RoundKeys::expand(KeyParams::new(&key), cipher, Direction::Encrypt).unwrap();
            let dec = RoundKeys::expand(KeyParams::new(&key), cipher, Direction::Decrypt).unwrap();
            let n = enc.len();
            assert_eq!(n, cipher.round_key_count());
            assert_eq!(dec.blocks()[0], enc.blocks()[n - 1]);
            assert_eq!(dec.blocks()[n - 1], enc.blocks()[0]);
            let mut inner = enc.blocks()[1];
            inv_mix_columns(&mut inner);
            assert_eq!(dec.blocks()[n - 2], inner);
        }
    }

    #[test]
    fn extended_schedule_is_word_reversed_shake256() {
        let key = [7u8; 64];
        let rk = RoundKeys::expand(KeyParams::new(&key), CipherType::Rsx512, Direction::Encrypt).unwrap();

        let mut stream = alloc::vec![0u8; 31 * BLOCK_SIZE];
        rsx_keccak::shake256(&mut stream, &key).unwrap();
        for (block, expected) in rk.blocks().iter().zip(stream.chunks_exact(BLOCK_SIZE)) {
            for (word, exp) in block.chunks_exact(4).zip(expected.chunks_exact(4)) {
                assert_eq!(word, &[exp[3], exp[2], exp[1], exp[0]]);
            }
        }
    }

    #[test]
    fn info_diversifies_extended_keys_only() {
        let key = [1u8; 32];
        let plain = RoundKeys::expand(KeyParams::new(&key), CipherType::Rsx256, Direction::Encrypt).unwrap();
        let tagged = RoundKeys::expand(KeyParams::with_info(&key, b"ctx"), CipherType::Rsx256, Direction::Encrypt).unwrap();
        assert_ne!(plain.blocks(), tagged.blocks());

        let plain = RoundKeys::expand(KeyParams::new(&key), CipherType::Aes256, Direction::Encrypt).unwrap();
        let tagged = RoundKeys::expand(KeyParams::with_info(&key, b"ctx"), CipherType::Aes256, Direction::Encrypt).unwrap();
        assert_eq!(plain.blocks(), tagged.blocks());
    }

    #[test]
    fn debug_output_hides_key_material() {
        let key = [0xabu8; 16];
        let params = KeyParams::new(&key);
        let rk = RoundKeys::expand(params, CipherType::Aes128, Direction::Encrypt).unwrap();
        let shown = alloc::format!("{:?} {:?}", params, rk);
        assert!(!shown.contains("ab, ab"));
        assert!(!shown.contains("171"));
    }
}
