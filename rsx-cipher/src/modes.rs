//! Cipher contexts and the ECB, CBC and CTR modes.
//!
//! A context is typed by the direction of its round keys. An [`Encryptor`] encrypts and runs
//! counter mode in both directions; a [`Decryptor`] decrypts ECB and CBC.
//! Chaining values are owned by the caller and updated after every block, so one context can
//! serve any number of independent streams. Restore the original IV or nonce before starting a
//! new message.
//!
//! ```compile_fail
//! use rsx_cipher::{CipherType, Decryptor, KeyParams};
//!
//! let dec = Decryptor::new(KeyParams::new(&[0u8; 16]), CipherType::Aes128).unwrap();
//! let mut nonce = [0u8; 16];
//! dec.ctr_transform(&mut nonce, &[0u8; 16]);
//! ```

use core::marker::PhantomData;

use anyhow::Result;
use rsx_keccak::try_or;

use crate::{
    backends::{
        Backend,
        RoundFunction,
    },
    schedule::{
        KeyParams,
        RoundKeys,
    },
    variant::{
        Block,
        CipherType,
        Direction,
        BLOCK_SIZE,
    },
    Error::{
        DirectionMismatch,
        LengthMismatch,
        NotBlockAligned,
    },
};

/// Direction a context type is bound to.
pub trait Role {
    const DIRECTION: Direction;
}

/// Role of contexts holding an encryption schedule.
#[derive(Clone, Copy, Debug)]
pub enum Encrypt {}

/// Role of contexts holding a decryption schedule.
#[derive(Clone, Copy, Debug)]
pub enum Decrypt {}

impl Role for Encrypt {
    const DIRECTION: Direction = Direction::Encrypt;
}

impl Role for Decrypt {
    const DIRECTION: Direction = Direction::Decrypt;
}

/// Block cipher context: a round-key schedule bound to a backend.
///
/// The context is read-only after construction and may be shared between threads.
#[derive(Clone, Debug)]
pub struct Rsx<R: Role> {
    round_keys: RoundKeys,
    backend: Backend,
    _role: PhantomData<R>,
}

/// Context for ECB and CBC encryption, and for CTR in both directions.
pub type Encryptor = Rsx<Encrypt>;

/// Context for ECB and CBC decryption.
pub type Decryptor = Rsx<Decrypt>;

impl<R: Role> Rsx<R> {
    /// Expand the key for this role and pick the fastest available backend.
    pub fn new(params: KeyParams, cipher: CipherType) -> Result<Self> {
        Self::with_backend(params, cipher, Backend::detect())
    }

    pub fn with_backend(params: KeyParams, cipher: CipherType, backend: Backend) -> Result<Self> {
        let round_keys = RoundKeys::expand(params, cipher, R::DIRECTION)?;
        Self::from_round_keys(round_keys, backend)
    }

    /// Wrap an existing schedule, which must have been expanded for this role's direction.
    pub fn from_round_keys(round_keys: RoundKeys, backend: Backend) -> Result<Self> {
        try_or!(round_keys.direction() == R::DIRECTION, DirectionMismatch)?;
        Ok(Self {
            round_keys,
            backend,
            _role: PhantomData,
        })
    }

    pub fn cipher(&self) -> CipherType {
        self.round_keys.cipher()
    }

    pub fn direction(&self) -> Direction {
        R::DIRECTION
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }
}

impl Rsx<Encrypt> {
    fn encrypt_in_place(&self, block: &mut Block) {
        self.backend.encrypt_block(&self.round_keys, block);
    }

    /// Encrypt a single block. ECB has no chaining and leaks equal blocks; use it for tests or
    /// as a building block only.
    pub fn ecb_encrypt(&self, input: &Block) -> Block {
        let mut block = *input;
        self.encrypt_in_place(&mut block);
        block
    }

    /// CBC-encrypt one block; `iv` becomes the ciphertext.
    pub fn cbc_encrypt(&self, iv: &mut Block, input: &Block) -> Block {
        let mut block = *input;
        xor_in_place(&mut block, iv);
        self.encrypt_in_place(&mut block);
        *iv = block;
        block
    }

    /// Encrypt or decrypt one block in counter mode, then increment `nonce` as a 128-bit
    /// big-endian integer (wrapping).
    pub fn ctr_transform(&self, nonce: &mut Block, input: &Block) -> Block {
        let mut block = self.keystream(nonce);
        xor_in_place(&mut block, input);
        block
    }

    fn keystream(&self, nonce: &mut Block) -> Block {
        let mut keystream = *nonce;
        self.encrypt_in_place(&mut keystream);
        increment_be(nonce);
        keystream
    }

    /// ECB-encrypt a block-aligned buffer.
    pub fn ecb_encrypt_blocks(&self, output: &mut [u8], input: &[u8]) -> Result<()> {
        check_blocks(output, input)?;
        for (out, inp) in output.chunks_exact_mut(BLOCK_SIZE).zip(input.chunks_exact(BLOCK_SIZE)) {
            out.copy_from_slice(&self.ecb_encrypt(&to_block(inp)));
        }
        Ok(())
    }

    /// CBC-encrypt a block-aligned buffer, chaining through `iv`.
    pub fn cbc_encrypt_blocks(&self, iv: &mut Block, output: &mut [u8], input: &[u8]) -> Result<()> {
        check_blocks(output, input)?;
        for (out, inp) in output.chunks_exact_mut(BLOCK_SIZE).zip(input.chunks_exact(BLOCK_SIZE)) {
            out.copy_from_slice(&self.cbc_encrypt(iv, &to_block(inp)));
        }
        Ok(())
    }

    /// Counter-mode transform of a buffer of any length.
    ///
    /// A trailing partial block uses the leading bytes of its keystream block; the counter is
    /// still advanced for it.
    pub fn ctr_transform_bytes(&self, nonce: &mut Block, output: &mut [u8], input: &[u8]) -> Result<()> {
        try_or!(output.len() == input.len(), LengthMismatch(input.len(), output.len()))?;
        for (out, inp) in output.chunks_mut(BLOCK_SIZE).zip(input.chunks(BLOCK_SIZE)) {
            let keystream = self.keystream(nonce);
            for ((o, i), k) in out.iter_mut().zip(inp.iter()).zip(keystream.iter()) {
                *o = i ^ k;
            }
        }
        Ok(())
    }
}

impl Rsx<Decrypt> {
    fn decrypt_in_place(&self, block: &mut Block) {
        self.backend.decrypt_block(&self.round_keys, block);
    }

    /// Decrypt a single block.
    pub fn ecb_decrypt(&self, input: &Block) -> Block {
        let mut block = *input;
        self.decrypt_in_place(&mut block);
        block
    }

    /// CBC-decrypt one block; `iv` becomes the consumed ciphertext.
    pub fn cbc_decrypt(&self, iv: &mut Block, input: &Block) -> Block {
        let mut block = *input;
        self.decrypt_in_place(&mut block);
        xor_in_place(&mut block, iv);
        *iv = *input;
        block
    }

    /// ECB-decrypt a block-aligned buffer.
    pub fn ecb_decrypt_blocks(&self, output: &mut [u8], input: &[u8]) -> Result<()> {
        check_blocks(output, input)?;
        for (out, inp) in output.chunks_exact_mut(BLOCK_SIZE).zip(input.chunks_exact(BLOCK_SIZE)) {
            out.copy_from_slice(&self.ecb_decrypt(&to_block(inp)));
        }
        Ok(())
    }

    /// CBC-decrypt a block-aligned buffer, chaining through `iv`.
    pub fn cbc_decrypt_blocks(&self, iv: &mut Block, output: &mut [u8], input: &[u8]) -> Result<()> {
        check_blocks(output, input)?;
        for (out, inp) in output.chunks_exact_mut(BLOCK_SIZE).zip(input.chunks_exact(BLOCK_SIZE)) {
            out.copy_from_slice(&self.cbc_decrypt(iv, &to_block(inp)));
        }
        Ok(())
    }
}

fn check_blocks(output: &[u8], input: &[u8]) -> Result<()> {
    try_or!(output.len() == input.len(), LengthMismatch(input.len(), output.len()))?;
    try_or!(input.len() % BLOCK_SIZE == 0, NotBlockAligned(input.len()))
}

fn to_block(bytes: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(bytes);
    block
}

fn xor_in_place(block: &mut Block, other: &Block) {
    for (b, o) in block.iter_mut().zip(other.iter()) {
        *b ^= o;
    }
}

pub(crate) fn increment_be(counter: &mut Block) {
    for byte in counter.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}
