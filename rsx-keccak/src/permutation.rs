//! The Keccak-f[1600] permutation.

use core::fmt;

use zeroize::Zeroize;

/// Number of 64-bit lanes in the permutation state.
pub const STATE_LANES: usize = 25;

/// Width of the permutation in bytes.
pub const STATE_BYTES: usize = 200;

/// Number of rounds of Keccak-f[1600].
pub const ROUNDS: usize = 24;

/// Raw permutation state; lane `x + 5 * y` holds column `x` of row `y`.
pub type KeccakState = [u64; STATE_LANES];

const RC: [u64; ROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808a,
    0x8000000080008000,
    0x000000000000808b,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008a,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000a,
    0x000000008000808b,
    0x800000000000008b,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800a,
    0x800000008000000a,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

// Rotation offsets, in the visiting order of `PI`.
const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

// Lane visiting order of the combined rho and pi steps, starting from lane 1.
const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Apply the 24 rounds of Keccak-f[1600] to `state` in place.
pub fn keccak_permute(state: &mut KeccakState) {
    for rc in RC.iter() {
        // theta
        let mut parity = [0u64; 5];
        for (x, p) in parity.iter_mut().enumerate() {
            *p = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let d = parity[(x + 4) % 5] ^ parity[(x + 1) % 5].rotate_left(1);
            for y in (0..STATE_LANES).step_by(5) {
                state[y + x] ^= d;
            }
        }

        // rho and pi
        let mut last = state[1];
        for (&lane, &rotation) in PI.iter().zip(RHO.iter()) {
            let current = state[lane];
            state[lane] = last.rotate_left(rotation);
            last = current;
        }

        // chi
        for y in (0..STATE_LANES).step_by(5) {
            let mut row = [0u64; 5];
            row.copy_from_slice(&state[y..y + 5]);
            for x in 0..5 {
                state[y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
            }
        }

        // iota
        state[0] ^= *rc;
    }
}

/// Keccak-f[1600] state with byte-level access in little-endian lane order.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeccakF1600 {
    state: KeccakState,
}

impl KeccakF1600 {
    /// Create a zero-initialized state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `Keccak-F[1600]` on the state.
    pub fn permute(&mut self) {
        keccak_permute(&mut self.state);
    }

    pub fn lanes(&self) -> &KeccakState {
        &self.state
    }

    pub fn lanes_mut(&mut self) -> &mut KeccakState {
        &mut self.state
    }

    /// XOR `bytes` into the state starting at byte `offset`.
    pub fn xor_bytes(&mut self, offset: usize, bytes: &[u8]) {
        debug_assert!(offset + bytes.len() <= STATE_BYTES);
        for (i, b) in (offset..).zip(bytes.iter()) {
            self.state[i / 8] ^= u64::from(*b) << (8 * (i % 8));
        }
    }

    /// Copy state bytes starting at byte `offset` into `out`.
    pub fn extract_bytes(&self, offset: usize, out: &mut [u8]) {
        debug_assert!(offset + out.len() <= STATE_BYTES);
        for (i, o) in (offset..).zip(out.iter_mut()) {
            *o = (self.state[i / 8] >> (8 * (i % 8))) as u8;
        }
    }
}

impl Zeroize for KeccakF1600 {
    fn zeroize(&mut self) {
        self.state.zeroize();
    }
}

impl From<KeccakState> for KeccakF1600 {
    fn from(state: KeccakState) -> Self {
        Self { state }
    }
}

impl From<KeccakF1600> for KeccakState {
    fn from(f: KeccakF1600) -> Self {
        f.state
    }
}

impl fmt::Debug for KeccakF1600 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = [0u8; STATE_BYTES];
        self.extract_bytes(0, &mut bytes);
        write!(f, "[{}]", hex::encode(&bytes[..]))
    }
}
