use alloc::vec::Vec;

use super::*;
use crate::{
    permutation::KeccakF1600,
    Error,
};

fn message(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i * 7 + 3) as u8).collect()
}

fn squeeze_n(rate: usize, seed: &[u8], n: usize) -> Vec<u8> {
    let mut state = [0u64; 25];
    keccak_absorb(&mut state, rate, seed, SHAKE_DOMAIN);
    let mut out = vec![0u8; n];
    keccak_squeeze(&mut out, &mut state, rate);
    out
}

#[test]
fn permute_twice_from_zero_matches_reference() {
    let mut state = [0u64; 25];
    keccak_permute(&mut state);
    assert_eq!(state[0], 0xF1258F7940E1DDE7);
    assert_eq!(state[24], 0xEAF1FF7B5CECA249);

    keccak_permute(&mut state);
    assert_eq!(
        state,
        [
            0x2D5C954DF96ECB3C,
            0x6A332CD07057B56D,
            0x093D8D1270D76B6C,
            0x8A20D9B25569D094,
            0x4F9C4F99E5E7F156,
            0xF957B9A2DA65FB38,
            0x85773DAE1275AF0D,
            0xFAF4F247C3D810F7,
            0x1F1B9EE6F79A8759,
            0xE4FECC0FEE98B425,
            0x68CE61B6B9CE68A1,
            0xDEEA66C4BA8F974F,
            0x33C43D836EAFB1F5,
            0xE00654042719DBD9,
            0x7CF8A9F009831265,
            0xFD5449A6BF174743,
            0x97DDAD33D8994B40,
            0x48EAD5FC5D0BE774,
            0xE3B8C8EE55B7B03C,
            0x91A0226E649E42E9,
            0x900E3129E7BADD7B,
            0x202A9EC5FAA3CCE8,
            0x5B3402464E1C3DB6,
            0x609F4E62A44C1059,
            0x20D06CD26A8FBF5C,
        ]
    );
}

#[test]
fn permute_agrees_with_keccak_crate() {
    let mut ours = [0u64; 25];
    for (i, lane) in ours.iter_mut().enumerate() {
        *lane = (i as u64).wrapping_mul(0x9E3779B97F4A7C15) ^ 0x0123456789ABCDEF;
    }
    let mut reference = ours;
    for _ in 0..3 {
        keccak_permute(&mut ours);
        keccak::f1600(&mut reference);
        assert_eq!(ours, reference);
    }
}

#[test]
fn byte_access_is_little_endian_per_lane() {
    let mut f = KeccakF1600::new();
    f.xor_bytes(6, &[0xAA, 0xBB, 0xCC]);
    assert_eq!(f.lanes()[0], 0xBBAA_0000_0000_0000);
    assert_eq!(f.lanes()[1], 0xCC);

    let mut out = [0u8; 3];
    f.extract_bytes(6, &mut out);
    assert_eq!(out, [0xAA, 0xBB, 0xCC]);
}

#[test]
fn incremental_sponge_matches_block_absorb() {
    for &rate in &[SHA3_512_RATE, SHAKE256_RATE, SHAKE128_RATE] {
        for &n in &[0, 1, rate - 1, rate, rate + 1, 2 * rate - 1, 2 * rate, 3 * rate + 5] {
            let msg = message(n);
            let expected = squeeze_n(rate, &msg, 2 * rate + 3);

            let mut sponge = Sponge::new(rate, SHAKE_DOMAIN).unwrap();
            for piece in msg.chunks(13) {
                sponge.update(piece);
            }
            let mut out = vec![0u8; expected.len()];
            sponge.finalize().squeeze(&mut out);
            assert_eq!(out, expected, "rate {}, length {}", rate, n);
        }
    }
}

#[test]
fn squeeze_is_prefix_consistent() {
    let rate = SHAKE256_RATE;
    let seed = message(50);

    let mut whole = vec![0u8; 5 * rate];
    Sponge::init(rate, SHAKE_DOMAIN).absorb(&seed).squeeze_blocks(&mut whole, 5);

    let mut split = vec![0u8; 5 * rate];
    let mut squeezer = Sponge::init(rate, SHAKE_DOMAIN).absorb(&seed);
    let (first, second) = split.split_at_mut(2 * rate);
    squeezer.squeeze_blocks(first, 2);
    squeezer.squeeze_blocks(second, 3);
    assert_eq!(whole, split);

    let mut streamed = vec![0u8; 5 * rate];
    let mut squeezer = Sponge::init(rate, SHAKE_DOMAIN).absorb(&seed);
    for piece in streamed.chunks_mut(29) {
        squeezer.squeeze(piece);
    }
    assert_eq!(whole, streamed);
}

#[test]
fn squeeze_truncates_final_block() {
    let rate = SHAKE128_RATE;
    let long = squeeze_n(rate, b"seed", 3 * rate);
    let short = squeeze_n(rate, b"seed", rate + 10);
    assert_eq!(&long[..rate + 10], &short[..]);
}

#[test]
fn sha3_finalize_handles_every_tail_length() {
    for &rate in &[SHA3_256_RATE, SHA3_512_RATE] {
        for &n in &[0, 3, rate - 1, rate, rate + 1, 2 * rate + 17] {
            let msg = message(n);

            let mut state = [0u64; 25];
            let mut digest = [0u8; 64];
            let size = sha3_finalize(&mut state, rate, &msg, &mut digest);
            assert_eq!(size, (200 - rate) / 2);

            let mut state = [0u64; 25];
            keccak_absorb(&mut state, rate, &msg, SHA3_DOMAIN);
            let mut expected = vec![0u8; rate];
            keccak_squeezeblocks(&mut expected, 1, &mut state, rate);
            assert_eq!(&digest[..size], &expected[..size], "rate {}, length {}", rate, n);
        }
    }
}

#[test]
fn blockupdate_leaves_partial_block_untouched() {
    let rate = SHA3_256_RATE;
    let msg = message(rate + 20);

    let mut updated = [0u64; 25];
    sha3_blockupdate(&mut updated, rate, &msg);

    let mut expected = [0u64; 25];
    xor_block(&mut expected, &msg[..rate]);
    keccak_permute(&mut expected);
    assert_eq!(updated, expected);
}

#[test]
fn invalid_rates_are_rejected() {
    for &rate in &[0, 7, 137, 208] {
        let e = Sponge::new(rate, SHAKE_DOMAIN).unwrap_err();
        assert_eq!(e.downcast_ref::<Error>(), Some(&Error::InvalidRate(rate)));
    }
    assert!(Sponge::new(200, SHAKE_DOMAIN).is_ok());
}

#[test]
fn zeroized_contexts_forget_absorbed_input() {
    use zeroize::Zeroize;

    let mut f = KeccakF1600::from([0x5555_5555_5555_5555u64; 25]);
    f.zeroize();
    assert_eq!(f.lanes(), &[0u64; 25]);

    let mut zero = [0u64; 25];
    keccak_permute(&mut zero);
    let mut expected = [0u8; 16];
    KeccakF1600::from(zero).extract_bytes(0, &mut expected);

    let mut squeezer = Sponge::new(SHAKE256_RATE, SHAKE_DOMAIN).unwrap().absorb(b"secret key");
    let mut first = [0u8; 5];
    squeezer.squeeze(&mut first);
    squeezer.zeroize();
    let mut out = [0u8; 16];
    squeezer.squeeze(&mut out);
    assert_eq!(out, expected);

    let mut sponge = Sponge::new(SHAKE256_RATE, SHAKE_DOMAIN).unwrap();
    sponge.update(b"secret key");
    sponge.zeroize();
    let mut wiped = [0u8; 16];
    sponge.absorb(b"").squeeze(&mut wiped);
    assert_eq!(&wiped[..], &squeeze_n(SHAKE256_RATE, b"", 16)[..]);
}
