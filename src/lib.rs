//! # SLH-DSA: stateless hash-based digital signatures
//!
//! A pure-Rust implementation of SLH-DSA (FIPS 205), the standardized form
//! of SPHINCS+. The scheme composes three hash-based layers: a few-time
//! signature (FORS) over the message digest, a hypertree of one-time
//! WOTS+ keys authenticating the FORS public key, and a single cached root
//! acting as the verifying key. Security rests only on the underlying hash
//! functions.
//!
//! All twelve parameter sets — SHAKE or SHA2 family, 128/192/256-bit
//! security, small (`s`) or fast (`f`) profile — are selected at runtime
//! through [`ParameterSetId`]; key and signature lengths are fixed by the
//! selection.
//!
//! ```
//! use slhdsa::{ParameterSetId, SlhDsa};
//!
//! let slh = SlhDsa::new(ParameterSetId::Shake128f);
//! let (sk, vk) = slh.keygen();
//!
//! let signature = slh.sign(b"abc", b"", &sk)?;
//! assert!(slh.verify(signature.as_ref(), b"abc", b"", &vk)?);
//! # Ok::<(), slhdsa::Error>(())
//! ```
//!
//! Signing is randomized by default; [`SlhDsa::sign_deterministic`] yields
//! byte-identical signatures for identical inputs. Verification reports a
//! cryptographic mismatch as `Ok(false)` — only malformed inputs are
//! errors.

mod adrs;
mod error;
mod fors;
mod hash;
mod hypertree;
mod utils;
mod wots;

pub mod params;
pub mod slh_dsa;

pub use crate::error::{Error, Result};
pub use crate::params::{HashFamily, ParameterSetId, SlhParams};
pub use crate::slh_dsa::{Signature, SigningKey, SlhDsa, VerifyingKey};
