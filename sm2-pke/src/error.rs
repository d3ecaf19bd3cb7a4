//! Error types.

use core::fmt;

/// Error type.
///
/// Every fallible operation in this crate aborts with one of these variants;
/// no partial output accompanies an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Integer does not fit in the requested number of bytes, or is not
    /// below the field modulus.
    ValueTooLarge,

    /// Malformed point encoding, or a decoded point which is not on the curve.
    InvalidPointEncoding,

    /// Field element has no multiplicative inverse.
    NoInverse,

    /// Requested KDF output exceeds the hash-counter limit.
    KeyLengthTooLarge,

    /// Ciphertext tag mismatch: the ciphertext was altered or the wrong key
    /// was used.
    TagVerification,

    /// Curve domain parameters are inconsistent.
    InvalidCurveParameters,

    /// Private scalar out of range, or public point unusable as a key.
    InvalidKey,

    /// Ciphertext too short to hold `C1` and `C3`.
    MalformedCiphertext,

    /// The random number generator failed.
    RandomSource,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::ValueTooLarge => "integer too large for target length",
            Error::InvalidPointEncoding => "invalid point encoding",
            Error::NoInverse => "field element has no inverse",
            Error::KeyLengthTooLarge => "KDF output length too large",
            Error::TagVerification => "ciphertext tag verification failed",
            Error::InvalidCurveParameters => "invalid curve parameters",
            Error::InvalidKey => "invalid key",
            Error::MalformedCiphertext => "malformed ciphertext",
            Error::RandomSource => "random number generator failure",
        })
    }
}

impl core::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
