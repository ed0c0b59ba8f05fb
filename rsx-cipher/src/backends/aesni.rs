//! AES-NI round function for x86 and x86_64.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::RoundFunction;
use crate::{
    schedule::RoundKeys,
    variant::Block,
};

cpufeatures::new!(aesni_cpuid, "aes", "sse2");

/// Hardware backend.
///
/// Only obtainable through [`AesNi::detect`], so holding one proves the CPU supports the
/// instructions.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AesNi {
    _token: aesni_cpuid::InitToken,
}

impl AesNi {
    /// Query the CPU once; the result is cached for later calls.
    pub(crate) fn detect() -> Option<Self> {
        let (token, present) = aesni_cpuid::init_get();
        if present {
            Some(Self { _token: token })
        } else {
            None
        }
    }
}

impl RoundFunction for AesNi {
    fn encrypt_block(&self, round_keys: &RoundKeys, block: &mut Block) {
        // `self` exists only if CPUID reported AES-NI.
        unsafe { encrypt(round_keys, block) }
    }

    fn decrypt_block(&self, round_keys: &RoundKeys, block: &mut Block) {
        unsafe { decrypt(round_keys, block) }
    }
}

#[target_feature(enable = "sse2")]
unsafe fn load(block: &Block) -> __m128i {
    _mm_loadu_si128(block.as_ptr() as *const __m128i)
}

#[target_feature(enable = "sse2")]
unsafe fn store(block: &mut Block, value: __m128i) {
    _mm_storeu_si128(block.as_mut_ptr() as *mut __m128i, value)
}

#[target_feature(enable = "aes,sse2")]
unsafe fn encrypt(round_keys: &RoundKeys, block: &mut Block) {
    let (first, inner, last) = round_keys.split();

    let mut state = _mm_xor_si128(load(block), load(first));
    for key in inner {
        state = _mm_aesenc_si128(state, load(key));
    }
    state = _mm_aesenclast_si128(state, load(last));
    store(block, state);
}

// `aesdec` runs the equivalent inverse cipher, which is the layout of decryption schedules.
#[target_feature(enable = "aes,sse2")]
unsafe fn decrypt(round_keys: &RoundKeys, block: &mut Block) {
    let (first, inner, last) = round_keys.split();

    let mut state = _mm_xor_si128(load(block), load(first));
    for key in inner {
        state = _mm_aesdec_si128(state, load(key));
    }
    state = _mm_aesdeclast_si128(state, load(last));
    store(block, state);
}
