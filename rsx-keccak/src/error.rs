use core::fmt::{
    Debug,
    Display,
};

use anyhow::Result;
use displaydoc::Display;

/// Coarse classification of failures, shared by every RSX crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied a parameter the function cannot work with.
    InvalidParameter,
    /// An internal step produced an unexpected state.
    InternalFailure,
    /// The system random provider was unavailable or returned a short read.
    RandomSourceFailure,
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Output length must not be zero
    ZeroLengthOutput,
    /// Sponge rate must be a non-zero multiple of 8 no larger than 200 bytes (found: {0})
    InvalidRate(usize),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ZeroLengthOutput | Error::InvalidRate(_) => ErrorKind::InvalidParameter,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Log the error location (when enabled) and turn a failed condition into an error.
#[macro_export]
macro_rules! try_or {
    ($cond:expr, $err:expr) => {{
        let cond = $cond;
        if $crate::LOCATION_LOG && !cond {
            $crate::println!("\n!!! Error occurred @ {}, {}", file!(), line!())
        }
        $crate::error::try_or(cond, $err)
    }};
}

/// Log the error location (when enabled) and return the error.
#[macro_export]
macro_rules! err {
    ($err:expr) => {{
        if $crate::LOCATION_LOG {
            $crate::println!("\n!!! Error occurred @ {}, {}", file!(), line!());
        }
        $crate::error::err($err)
    }};
}

pub fn try_or<E>(cond: bool, err: E) -> Result<()>
where
    E: Display + Debug + Send + Sync + 'static,
{
    if cond {
        Ok(())
    } else {
        Err(anyhow::Error::msg(err))
    }
}

pub fn err<T, E>(err: E) -> Result<T>
where
    E: Display + Debug + Send + Sync + 'static,
{
    Err(anyhow::Error::msg(err))
}
