//! Hash and extendable-output constructions on top of the sponge engine.

pub mod cshake;
pub mod sha3;
pub mod shake;
