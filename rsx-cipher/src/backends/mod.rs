//! Round transformation backends.
//!
//! Every backend consumes the same round-key layout (16-byte blocks in state byte order, see
//! [`RoundKeys`](crate::RoundKeys)) and must produce bit-identical output. Backends are driven
//! only through the cipher contexts; the round function itself is not public.
//!
//! ```compile_fail
//! use rsx_cipher::backends::RoundFunction;
//! ```

use crate::{
    schedule::RoundKeys,
    variant::Block,
};

#[cfg(all(feature = "aesni", any(target_arch = "x86", target_arch = "x86_64")))]
mod aesni;
mod soft;

#[cfg(all(feature = "aesni", any(target_arch = "x86", target_arch = "x86_64")))]
use aesni::AesNi;
use soft::Soft;

pub(crate) use soft::inv_mix_columns;

/// Full-block Rijndael transform.
///
/// The round count is implied by the schedule: `round_keys.len() - 1` rounds, the last of them
/// without the column mix.
pub(crate) trait RoundFunction {
    /// Encrypt `block` in place with an encryption schedule.
    fn encrypt_block(&self, round_keys: &RoundKeys, block: &mut Block);

    /// Decrypt `block` in place with a decryption schedule.
    fn decrypt_block(&self, round_keys: &RoundKeys, block: &mut Block);
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    Soft(Soft),
    #[cfg(all(feature = "aesni", any(target_arch = "x86", target_arch = "x86_64")))]
    AesNi(AesNi),
}

/// Round function implementation selected for a cipher context.
#[derive(Clone, Copy, Debug)]
pub struct Backend {
    kind: Kind,
}

impl Backend {
    /// Fastest backend supported by the running CPU.
    pub fn detect() -> Self {
        Self::aesni().unwrap_or_else(Self::soft)
    }

    /// Portable software backend.
    pub fn soft() -> Self {
        Self { kind: Kind::Soft(Soft) }
    }

    /// AES-NI backend, `None` if the CPU lacks the instructions or support is not compiled in.
    pub fn aesni() -> Option<Self> {
        accelerated().map(|kind| Self { kind })
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            Kind::Soft(_) => "soft",
            #[cfg(all(feature = "aesni", any(target_arch = "x86", target_arch = "x86_64")))]
            Kind::AesNi(_) => "aesni",
        }
    }

    pub fn is_accelerated(&self) -> bool {
        !matches!(self.kind, Kind::Soft(_))
    }
}

#[cfg(all(feature = "aesni", any(target_arch = "x86", target_arch = "x86_64")))]
fn accelerated() -> Option<Kind> {
    AesNi::detect().map(Kind::AesNi)
}

#[cfg(not(all(feature = "aesni", any(target_arch = "x86", target_arch = "x86_64"))))]
fn accelerated() -> Option<Kind> {
    None
}

impl Default for Backend {
    fn default() -> Self {
        Self::detect()
    }
}

impl RoundFunction for Backend {
    fn encrypt_block(&self, round_keys: &RoundKeys, block: &mut Block) {
        match &self.kind {
            Kind::Soft(b) => b.encrypt_block(round_keys, block),
            #[cfg(all(feature = "aesni", any(target_arch = "x86", target_arch = "x86_64")))]
            Kind::AesNi(b) => b.encrypt_block(round_keys, block),
        }
    }

    fn decrypt_block(&self, round_keys: &RoundKeys, block: &mut Block) {
        match &self.kind {
            Kind::Soft(b) => b.decrypt_block(round_keys, block),
            #[cfg(all(feature = "aesni", any(target_arch = "x86", target_arch = "x86_64")))]
            Kind::AesNi(b) => b.decrypt_block(round_keys, block),
        }
    }
}
