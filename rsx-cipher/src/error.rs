use displaydoc::Display;
use rsx_keccak::ErrorKind;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    //////////
    // Key schedule
    //////////
    /// Key length must be 16, 32 or 64 bytes (found: {0})
    InvalidKeyLength(usize),
    /// Key length does not match the cipher type (expected: {0}, found: {1})
    KeyLengthMismatch(usize, usize),
    /// Round-key buffer does not match the cipher type (expected: {0} blocks, found: {1})
    RoundKeyLengthMismatch(usize, usize),
    /// No cipher type uses a {0}-byte key with {1} round-key blocks
    UnknownVariant(usize, usize),
    /// Extended key derivation could not be initialized
    KeyDerivationFailure,

    //////////
    // Modes
    //////////
    /// Input length is not a multiple of the block size (found: {0})
    NotBlockAligned(usize),
    /// Size of input and output buffers does not match (expected: {0}, found: {1})
    LengthMismatch(usize, usize),
    /// Round keys were expanded for the other direction than the context requires
    DirectionMismatch,

    //////////
    // Entropy
    //////////
    /// System random source failed to provide the requested bytes
    RandomSourceFailure,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::KeyDerivationFailure => ErrorKind::InternalFailure,
            Error::RandomSourceFailure => ErrorKind::RandomSourceFailure,
            _ => ErrorKind::InvalidParameter,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
