use core::cmp::min;

use anyhow::Result;
use zeroize::Zeroize;

use super::{
    is_valid_rate,
    xor_block,
};
use crate::{
    permutation::KeccakF1600,
    try_or,
    Error::InvalidRate,
};

/// Single-use sponge context in its absorbing phase.
///
/// A context absorbs exactly one message, possibly split over several [`Sponge::update`] calls.
/// [`Sponge::finalize`] injects the domain byte and padding and consumes the context, so it can
/// never absorb again.
#[derive(Clone, Debug)]
pub struct Sponge {
    /// Permutation together with its internal state.
    state: KeccakF1600,

    /// Bytes absorbed per permutation call.
    rate: usize,

    /// Domain separation byte injected on finalization.
    domain: u8,

    /// Current position (offset in bytes) within the outer state.
    pos: usize,
}

impl Sponge {
    /// Create a zero-initialized sponge; the rate must be a non-zero multiple of 8 up to 200.
    pub fn new(rate: usize, domain: u8) -> Result<Self> {
        try_or!(is_valid_rate(rate), InvalidRate(rate))?;
        Ok(Self::init(rate, domain))
    }

    pub(crate) fn init(rate: usize, domain: u8) -> Self {
        Self::init_with_state(KeccakF1600::default(), rate, domain)
    }

    /// Create a sponge starting from an explicit, already prepared state.
    pub(crate) fn init_with_state(state: KeccakF1600, rate: usize, domain: u8) -> Self {
        debug_assert!(is_valid_rate(rate));
        Self {
            state,
            rate,
            domain,
            pos: 0,
        }
    }

    pub fn rate(&self) -> usize {
        self.rate
    }

    pub fn domain(&self) -> u8 {
        self.domain
    }

    /// Absorb the next piece of the message.
    pub fn update(&mut self, data: &[u8]) {
        let mut data = data;
        while !data.is_empty() {
            if self.pos == 0 && data.len() >= self.rate {
                let (block, rest) = data.split_at(self.rate);
                xor_block(self.state.lanes_mut(), block);
                self.state.permute();
                data = rest;
                continue;
            }

            let n = min(self.rate - self.pos, data.len());
            self.state.xor_bytes(self.pos, &data[..n]);
            data = &data[n..];
            self.pos += n;
            if self.pos == self.rate {
                self.state.permute();
                self.pos = 0;
            }
        }
    }

    /// Absorb a whole message and finalize it.
    pub fn absorb(mut self, message: &[u8]) -> Squeezer {
        self.update(message);
        self.finalize()
    }

    /// Inject the domain byte and padding; the permutation is deferred to the first squeeze.
    pub fn finalize(mut self) -> Squeezer {
        self.state.xor_bytes(self.pos, &[self.domain]);
        self.state.xor_bytes(self.rate - 1, &[0x80]);
        Squeezer {
            state: self.state,
            rate: self.rate,
            pos: self.rate,
        }
    }
}

impl Zeroize for Sponge {
    /// Wipe the absorbed state; the context restarts from an empty message.
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.pos = 0;
    }
}

/// Finalized sponge context in its squeezing phase.
///
/// Contexts that absorbed secret material should be wiped with [`Zeroize::zeroize`] once the
/// output has been read.
#[derive(Clone, Debug)]
pub struct Squeezer {
    state: KeccakF1600,
    rate: usize,

    /// Read position within the current output block; `rate` means the block is exhausted.
    pos: usize,
}

impl Squeezer {
    pub fn rate(&self) -> usize {
        self.rate
    }

    /// Permute and extract `nblocks` whole blocks into `output`.
    ///
    /// Unread bytes of a partially consumed block are skipped. `output` must hold at least
    /// `nblocks * rate` bytes.
    pub fn squeeze_blocks(&mut self, output: &mut [u8], nblocks: usize) {
        debug_assert!(output.len() >= nblocks * self.rate);
        for block in output.chunks_exact_mut(self.rate).take(nblocks) {
            self.state.permute();
            self.state.extract_bytes(0, block);
        }
        self.pos = self.rate;
    }

    /// Fill `output` with the next bytes of the output stream.
    ///
    /// Consecutive calls continue the same stream, so reading `n` then `m` bytes yields the
    /// same bytes as reading `n + m` bytes at once.
    pub fn squeeze(&mut self, output: &mut [u8]) {
        let mut output = output;
        while !output.is_empty() {
            if self.pos == self.rate {
                self.state.permute();
                self.pos = 0;
            }
            let n = min(self.rate - self.pos, output.len());
            let (head, rest) = output.split_at_mut(n);
            self.state.extract_bytes(self.pos, head);
            self.pos += n;
            output = rest;
        }
    }
}

impl Zeroize for Squeezer {
    /// Wipe the state; further output is that of the all-zero state.
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.pos = self.rate;
    }
}
