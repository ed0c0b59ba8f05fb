use anyhow::Result;
use rsx_keccak::err;

use crate::Error::UnknownVariant;

/// Cipher block size in bytes, shared by every variant.
pub const BLOCK_SIZE: usize = 16;

/// A single cipher block, also the storage unit of round keys.
pub type Block = [u8; BLOCK_SIZE];

/// Cipher configuration.
///
/// `Aes256` and `Rsx256` both take a 32-byte key; they differ in round count and in how the
/// round keys are derived, so the type is always carried explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CipherType {
    /// AES-128: 16-byte key, 10 rounds, FIPS-197 key expansion.
    Aes128,
    /// AES-256: 32-byte key, 14 rounds, FIPS-197 key expansion.
    Aes256,
    /// RSX-256: 32-byte key, 22 rounds, SHAKE256-derived round keys.
    Rsx256,
    /// RSX-512: 64-byte key, 30 rounds, SHAKE256-derived round keys.
    Rsx512,
}

impl CipherType {
    pub const ALL: [CipherType; 4] = [CipherType::Aes128, CipherType::Aes256, CipherType::Rsx256, CipherType::Rsx512];

    /// Input key length in bytes.
    pub fn key_size(self) -> usize {
        match self {
            CipherType::Aes128 => 16,
            CipherType::Aes256 | CipherType::Rsx256 => 32,
            CipherType::Rsx512 => 64,
        }
    }

    pub fn rounds(self) -> usize {
        match self {
            CipherType::Aes128 => 10,
            CipherType::Aes256 => 14,
            CipherType::Rsx256 => 22,
            CipherType::Rsx512 => 30,
        }
    }

    /// Number of 16-byte round-key blocks, one more than the round count.
    pub fn round_key_count(self) -> usize {
        self.rounds() + 1
    }

    /// Whether round keys come from SHAKE256 instead of the Rijndael expansion.
    pub fn is_extended(self) -> bool {
        matches!(self, CipherType::Rsx256 | CipherType::Rsx512)
    }

    /// Resolve the cipher type from a key length and a round-key buffer size in blocks.
    ///
    /// Only meant for callers that size round-key storage up front and never name the
    /// variant. Prefer passing a `CipherType` explicitly: with a 32-byte key the buffer size is
    /// the only thing telling AES-256 and RSX-256 apart.
    pub fn from_dimensions(key_len: usize, round_key_blocks: usize) -> Result<Self> {
        match CipherType::ALL
            .iter()
            .find(|c| c.key_size() == key_len && c.round_key_count() == round_key_blocks)
        {
            Some(c) => Ok(*c),
            None => err!(UnknownVariant(key_len, round_key_blocks)),
        }
    }
}

/// Direction a round-key schedule is prepared for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Encrypt,
    Decrypt,
}
