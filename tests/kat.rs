use anyhow::Result;
use rsx::{
    cipher::{
        Block,
        Error,
        BLOCK_SIZE,
    },
    keccak,
    Backend,
    CipherType,
    Decryptor,
    Encryptor,
    KeyParams,
};

const KEY256: &str = "603DEB1015CA71BE2B73AEF0857D77811F352C073B6108D72D9810A30914DFF4";

fn block(s: &str) -> Block {
    let mut b = [0u8; BLOCK_SIZE];
    b.copy_from_slice(&hex::decode(s).unwrap());
    b
}

fn message() -> Vec<u8> {
    [
        "6BC1BEE22E409F96E93D7E117393172A",
        "AE2D8A571E03AC9C9EB76FAC45AF8E51",
        "30C81C46A35CE411E5FBC1191A0A52EF",
        "F69F2445DF4F9B17AD2B417BE66C3710",
    ]
    .iter()
    .flat_map(|s| hex::decode(s).unwrap())
    .collect()
}

#[test]
fn rsx256_round_trip_through_facade() -> Result<()> {
    let key = hex::decode(KEY256)?;
    let enc = Encryptor::new(KeyParams::new(&key), CipherType::Rsx256)?;
    let dec = Decryptor::new(KeyParams::new(&key), CipherType::Rsx256)?;

    let ct = enc.ecb_encrypt(&block("6BC1BEE22E409F96E93D7E117393172A"));
    assert_eq!(ct, block("96F1D94485D82839DFFF58207735DC7E"));
    assert_eq!(dec.ecb_decrypt(&ct), block("6BC1BEE22E409F96E93D7E117393172A"));
    Ok(())
}

#[test]
fn cbc_detects_single_bit_flip() -> Result<()> {
    let key = hex::decode(KEY256)?;
    let iv = block("000102030405060708090A0B0C0D0E0F");
    let msg = message();

    for &cipher in &[CipherType::Aes256, CipherType::Rsx256] {
        let enc = Encryptor::new(KeyParams::new(&key), cipher)?;
        let dec = Decryptor::new(KeyParams::new(&key), cipher)?;

        let mut ct = vec![0u8; msg.len()];
        enc.cbc_encrypt_blocks(&mut iv.clone(), &mut ct, &msg)?;

        let mut pt = vec![0u8; msg.len()];
        dec.cbc_decrypt_blocks(&mut iv.clone(), &mut pt, &ct)?;
        assert_eq!(pt, msg);

        for bit in &[0usize, 77, 300, 511] {
            let mut tampered = ct.clone();
            tampered[bit / 8] ^= 1 << (bit % 8);
            dec.cbc_decrypt_blocks(&mut iv.clone(), &mut pt, &tampered)?;
            assert_ne!(pt, msg, "{:?} bit {}", cipher, bit);
        }
    }
    Ok(())
}

#[test]
fn ctr_is_reproducible_across_contexts() -> Result<()> {
    let key = [0x11u8; 64];
    let nonce = block("F0F1F2F3F4F5F6F7F8F9FAFBFCFDFEFF");
    let msg = b"counter mode output must not depend on any state outside the context";

    let first = Encryptor::new(KeyParams::new(&key), CipherType::Rsx512)?;
    let second = Encryptor::with_backend(KeyParams::new(&key), CipherType::Rsx512, Backend::soft())?;

    let mut a = vec![0u8; msg.len()];
    let mut b = vec![0u8; msg.len()];
    first.ctr_transform_bytes(&mut nonce.clone(), &mut a, msg)?;
    first.ctr_transform_bytes(&mut nonce.clone(), &mut b, msg)?;
    assert_eq!(a, b);

    second.ctr_transform_bytes(&mut nonce.clone(), &mut b, msg)?;
    assert_eq!(a, b);

    let mut back = vec![0u8; msg.len()];
    second.ctr_transform_bytes(&mut nonce.clone(), &mut back, &a)?;
    assert_eq!(&back[..], &msg[..]);
    Ok(())
}

#[test]
fn invalid_keys_are_rejected_before_use() {
    let e = Encryptor::new(KeyParams::new(&[0u8; 20]), CipherType::Aes128).unwrap_err();
    assert_eq!(e.downcast_ref::<Error>(), Some(&Error::InvalidKeyLength(20)));
    assert_eq!(
        e.downcast_ref::<Error>().map(|e| e.kind()),
        Some(keccak::ErrorKind::InvalidParameter)
    );

    let e = CipherType::from_dimensions(64, 23).unwrap_err();
    assert_eq!(e.downcast_ref::<Error>(), Some(&Error::UnknownVariant(64, 23)));
}

#[test]
fn hashes_through_facade() -> Result<()> {
    assert_eq!(
        hex::encode(keccak::sha3_256(b"")),
        "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
    );

    let mut out = [0u8; 32];
    keccak::cshake256_simple(&mut out, 1, b"seed")?;
    let mut again = [0u8; 32];
    keccak::cshake256_simple(&mut again, 1, b"seed")?;
    assert_eq!(out, again);
    Ok(())
}
