//! SHA3-256 and SHA3-512 fixed-length digests.

use digest::{
    BlockInput,
    FixedOutput,
    Reset,
    Update,
};
use generic_array::{
    typenum::{
        U136,
        U32,
        U64,
        U72,
    },
    GenericArray,
};

use crate::{
    permutation::STATE_BYTES,
    sponge::{
        keccak_absorb,
        keccak_squeezeblocks,
        Sponge,
        SHA3_256_RATE,
        SHA3_512_RATE,
        SHA3_DOMAIN,
    },
};

fn sha3_oneshot(rate: usize, message: &[u8], digest: &mut [u8]) {
    let mut state = [0u64; 25];
    keccak_absorb(&mut state, rate, message, SHA3_DOMAIN);
    let mut block = [0u8; STATE_BYTES];
    keccak_squeezeblocks(&mut block[..rate], 1, &mut state, rate);
    digest.copy_from_slice(&block[..digest.len()]);
}

/// Compute the SHA3-256 digest of `message`.
pub fn sha3_256(message: &[u8]) -> [u8; 32] {
    let mut digest = [0u8; 32];
    sha3_oneshot(SHA3_256_RATE, message, &mut digest);
    digest
}

/// Compute the SHA3-512 digest of `message`.
pub fn sha3_512(message: &[u8]) -> [u8; 64] {
    let mut digest = [0u8; 64];
    sha3_oneshot(SHA3_512_RATE, message, &mut digest);
    digest
}

macro_rules! impl_sha3 {
    ($name:ident, $rate:expr, $output:ty, $block:ty, $doc:expr) => {
        #[doc = $doc]
        ///
        /// Updates of any size are buffered in the sponge; the digest is produced through the
        /// `digest` traits, so `Digest` is available as well.
        #[derive(Clone, Debug)]
        pub struct $name {
            sponge: Sponge,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    sponge: Sponge::init($rate, SHA3_DOMAIN),
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

        impl FixedOutput for $name {
            type OutputSize = $output;

            fn finalize_into(self, out: &mut GenericArray<u8, Self::OutputSize>) {
                self.sponge.finalize().squeeze(out.as_mut_slice());
            }

            fn finalize_into_reset(&mut self, out: &mut GenericArray<u8, Self::OutputSize>) {
                let sponge = core::mem::replace(&mut self.sponge, Sponge::init($rate, SHA3_DOMAIN));
                sponge.finalize().squeeze(out.as_mut_slice());
            }
        }

        impl Reset for $name {
            fn reset(&mut self) {
                *self = Self::default();
            }
        }
    };
}

impl_sha3!(Sha3_256, SHA3_256_RATE, U32, U136, "Incremental SHA3-256 hasher.");
impl_sha3!(Sha3_512, SHA3_512_RATE, U64, U72, "Incremental SHA3-512 hasher.");
