//! System entropy for fresh keys and chaining values.
//!
//! Backed by the operating system generator through `getrandom`; the cipher transforms never
//! call into it.

use alloc::vec::Vec;

use anyhow::Result;
use rand::{
    rngs::OsRng,
    RngCore,
};
use rsx_keccak::err;
use zeroize::Zeroize;

use crate::{
    variant::{
        Block,
        CipherType,
        BLOCK_SIZE,
    },
    Error::RandomSourceFailure,
};

/// Fill `buf` with random bytes from the system source.
pub fn get_bytes(buf: &mut [u8]) -> Result<()> {
    match OsRng.try_fill_bytes(buf) {
        Ok(()) => Ok(()),
        Err(_) => {
            buf.zeroize();
            err!(RandomSourceFailure)
        }
    }
}

/// Fresh random key of the size `cipher` expects.
pub fn generate_key(cipher: CipherType) -> Result<Vec<u8>> {
    let mut key = vec![0u8; cipher.key_size()];
    get_bytes(&mut key)?;
    Ok(key)
}

/// Fresh random IV or nonce.
pub fn generate_iv() -> Result<Block> {
    let mut iv = [0u8; BLOCK_SIZE];
    get_bytes(&mut iv)?;
    Ok(iv)
}
