//! RSX symmetric primitives.
//!
//! The facade re-exports the two member crates: [`keccak`] (Keccak-f[1600], SHA3, SHAKE, cSHAKE
//! and KMAC) and [`cipher`] (AES-128/256 and the extended RSX-256/512 variants with ECB, CBC and
//! CTR modes).

/// Rijndael-family block cipher and its modes.
pub use rsx_cipher as cipher;
/// Keccak permutation, sponge engine and hash constructions.
pub use rsx_keccak as keccak;

pub use rsx_cipher::{
    Backend,
    CipherType,
    Decryptor,
    Direction,
    Encryptor,
    KeyParams,
};
