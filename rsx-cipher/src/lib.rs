//! Rijndael-family block cipher.
//!
//! Four configurations share one round function: standard AES-128 and AES-256, and the
//! extended RSX-256 and RSX-512 variants which run more rounds with round keys derived from
//! SHAKE256. Blocks are processed through ECB, CBC or CTR by an [`Encryptor`] or a
//! [`Decryptor`] context.
//!
//! ```
//! use rsx_cipher::{CipherType, Encryptor, KeyParams};
//!
//! # fn main() -> anyhow::Result<()> {
//! let key = [0x42u8; 32];
//! let ctx = Encryptor::new(KeyParams::new(&key), CipherType::Rsx256)?;
//!
//! let mut nonce = [0u8; 16];
//! let ciphertext = ctx.ctr_transform(&mut nonce, b"sixteen byte msg");
//!
//! let mut nonce = [0u8; 16];
//! assert_eq!(&ctx.ctr_transform(&mut nonce, &ciphertext), b"sixteen byte msg");
//! # Ok(())
//! # }
//! ```
#![no_std]

// Round-key schedules are heap allocated
#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod backends;
mod error;
pub mod modes;
pub mod schedule;
#[cfg(feature = "osrng")]
pub mod sysrand;
mod tables;
pub mod variant;

pub use backends::Backend;
pub use error::Error;
pub use modes::{
    Decrypt,
    Decryptor,
    Encrypt,
    Encryptor,
    Role,
    Rsx,
};
pub use schedule::{
    KeyParams,
    RoundKeys,
};
pub use variant::{
    Block,
    CipherType,
    Direction,
    BLOCK_SIZE,
};
