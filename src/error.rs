use thiserror::Error;

/// Structural failures surfaced by the scheme operations.
///
/// A cryptographic mismatch during verification is not an error: `verify`
/// reports it as `Ok(false)`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unknown parameter set identifier {0}")]
    InvalidParameter(u32),
    #[error("invalid key length: expected {0} bytes, found {1} bytes")]
    InvalidKeyLength(usize, usize),
    #[error("invalid signature length: expected {0} bytes, found {1} bytes")]
    InvalidSignatureLength(usize, usize),
    #[error("invalid seed length: expected {0} bytes, found {1} bytes")]
    InvalidSeedLength(usize, usize),
    #[error("context string of {0} bytes exceeds the 255-byte limit")]
    InvalidContextLength(usize),
    #[error("internal error: {0}")]
    Internal(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
