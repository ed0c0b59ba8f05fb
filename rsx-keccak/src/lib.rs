//! Keccak-f[1600] permutation and the sponge constructions built on it: SHA3-256/512,
//! SHAKE128/256, the counter-customised cSHAKE "simple" functions, and the SP800-185
//! cSHAKE and KMAC functions.
#![no_std]

// Hashers and the Debug impl of the permutation state require heap allocation.
#[cfg_attr(test, macro_use)]
extern crate alloc;

// The feature "std" is needed to print error locations.
#[cfg(feature = "std")]
#[macro_use]
extern crate std;

// Stub used when no std output is available.
// Macros are exported at crate root level, that's why they are defined here.
#[cfg(not(feature = "std"))]
#[macro_export]
macro_rules! println {
    () => {{}};
    ($($arg:tt)*) => {{}};
}

#[cfg(feature = "std")]
pub use std::println;

#[cfg(not(feature = "err-location-log"))]
pub const LOCATION_LOG: bool = false;

#[cfg(feature = "err-location-log")]
pub const LOCATION_LOG: bool = true;

pub mod error;
pub mod hash;
pub mod permutation;
pub mod sponge;

pub use error::{
    Error,
    ErrorKind,
};
pub use hash::{
    cshake::{
        cshake128,
        cshake128_simple,
        cshake128_simple_absorb,
        cshake128_simple_squeezeblocks,
        cshake256,
        cshake256_simple,
        cshake256_simple_absorb,
        cshake256_simple_squeezeblocks,
        kmac128,
        kmac256,
    },
    sha3::{
        sha3_256,
        sha3_512,
        Sha3_256,
        Sha3_512,
    },
    shake::{
        shake128,
        shake128_absorb,
        shake128_squeezeblocks,
        shake256,
        shake256_absorb,
        shake256_squeezeblocks,
        Shake128,
        Shake256,
    },
};
pub use permutation::{
    keccak_permute,
    KeccakF1600,
    KeccakState,
};
pub use sponge::{
    Sponge,
    Squeezer,
};
