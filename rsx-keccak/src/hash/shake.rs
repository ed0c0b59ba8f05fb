//! SHAKE128 and SHAKE256 extendable-output functions.

use anyhow::Result;
use digest::{
    BlockInput,
    ExtendableOutput,
    Reset,
    Update,
    XofReader,
};
use generic_array::typenum::{
    U136,
    U168,
};

use crate::{
    permutation::KeccakState,
    sponge::{
        keccak_absorb,
        keccak_squeeze,
        keccak_squeezeblocks,
        Sponge,
        Squeezer,
        SHAKE128_RATE,
        SHAKE256_RATE,
        SHAKE_DOMAIN,
    },
    try_or,
    Error::ZeroLengthOutput,
};

/// Fill `output` with SHAKE128 of `seed`.
pub fn shake128(output: &mut [u8], seed: &[u8]) -> Result<()> {
    try_or!(!output.is_empty(), ZeroLengthOutput)?;
    let mut state = [0u64; 25];
    keccak_absorb(&mut state, SHAKE128_RATE, seed, SHAKE_DOMAIN);
    keccak_squeeze(output, &mut state, SHAKE128_RATE);
    Ok(())
}

/// Absorb `seed` into a zeroed `state` with SHAKE128 parameters.
pub fn shake128_absorb(state: &mut KeccakState, seed: &[u8]) {
    keccak_absorb(state, SHAKE128_RATE, seed, SHAKE_DOMAIN);
}

/// Squeeze `nblocks` blocks of 168 bytes from a state prepared by [`shake128_absorb`].
pub fn shake128_squeezeblocks(output: &mut [u8], nblocks: usize, state: &mut KeccakState) {
    keccak_squeezeblocks(output, nblocks, state, SHAKE128_RATE);
}

/// Fill `output` with SHAKE256 of `seed`.
pub fn shake256(output: &mut [u8], seed: &[u8]) -> Result<()> {
    try_or!(!output.is_empty(), ZeroLengthOutput)?;
    let mut state = [0u64; 25];
    keccak_absorb(&mut state, SHAKE256_RATE, seed, SHAKE_DOMAIN);
    keccak_squeeze(output, &mut state, SHAKE256_RATE);
    Ok(())
}

/// Absorb `seed` into a zeroed `state` with SHAKE256 parameters.
pub fn shake256_absorb(state: &mut KeccakState, seed: &[u8]) {
    keccak_absorb(state, SHAKE256_RATE, seed, SHAKE_DOMAIN);
}

/// Squeeze `nblocks` blocks of 136 bytes from a state prepared by [`shake256_absorb`].
pub fn shake256_squeezeblocks(output: &mut [u8], nblocks: usize, state: &mut KeccakState) {
    keccak_squeezeblocks(output, nblocks, state, SHAKE256_RATE);
}

/// Output stream of a finalized SHAKE hasher.
#[derive(Clone, Debug)]
pub struct ShakeReader {
    squeezer: Squeezer,
}

impl From<Squeezer> for ShakeReader {
    fn from(squeezer: Squeezer) -> Self {
        Self { squeezer }
    }
}

impl XofReader for ShakeReader {
    fn read(&mut self, buffer: &mut [u8]) {
        self.squeezer.squeeze(buffer);
    }
}

macro_rules! impl_shake {
    ($name:ident, $rate:expr, $block:ty, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug)]
        pub struct $name {
            sponge: Sponge,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    sponge: Sponge::init($rate, SHAKE_DOMAIN),
                }
            }
        }

        impl BlockInput for $name {
            type BlockSize = $block;
        }

        impl Update for $name {
            fn update(&mut self, data: impl AsRef<[u8]>) {
                self.sponge.update(data.as_ref());
            }
        }

        impl ExtendableOutput for $name {
            type Reader = ShakeReader;

            fn finalize_xof(self) -> Self::Reader {
                self.sponge.finalize().into()
            }

            fn finalize_xof_reset(&mut self) -> Self::Reader {
                let sponge = core::mem::replace(&mut self.sponge, Sponge::init($rate, SHAKE_DOMAIN));
                sponge.finalize().into()
            }
        }

        impl Reset for $name {
            fn reset(&mut self) {
                *self = Self::default();
            }
        }
    };
}

impl_shake!(Shake128, SHAKE128_RATE, U168, "Incremental SHAKE128 hasher.");
impl_shake!(Shake256, SHAKE256_RATE, U136, "Incremental SHAKE256 hasher.");
