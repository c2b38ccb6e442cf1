//! SLH-DSA parameter sets.
//!
//! The twelve FIPS 205 parameter sets are process-wide immutable constants,
//! selected at runtime through [`ParameterSetId`]. Every key and signature
//! length is a pure function of the selected [`SlhParams`].

use crate::error::Error;

/// Winternitz chain length. Fixed at 16 for every parameter set.
pub const WOTS_W: usize = 16;

/// Bits encoded per Winternitz chain, `log2(WOTS_W)`.
pub const WOTS_LOGW: usize = 4;

/// Number of checksum chains. With `w = 16` the checksum fits three base-w
/// digits at every security level.
pub const WOTS_LEN2: usize = 3;

/// Upper bound on the caller-supplied context string.
pub const MAX_CONTEXT_BYTES: usize = 255;

/// The two mutually exclusive hash-function families.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HashFamily {
    Shake,
    Sha2,
}

/// Identifier of one of the twelve SLH-DSA parameter sets.
///
/// The discriminants match the stable wire identifiers used by callers that
/// select a parameter set by integer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u32)]
#[allow(non_camel_case_types)]
pub enum ParameterSetId {
    Shake128s = 1,
    Shake128f = 2,
    Shake192s = 3,
    Shake192f = 4,
    Shake256s = 5,
    Shake256f = 6,
    Sha2_128s = 7,
    Sha2_128f = 8,
    Sha2_192s = 9,
    Sha2_192f = 10,
    Sha2_256s = 11,
    Sha2_256f = 12,
}

impl ParameterSetId {
    /// Every parameter set, in identifier order.
    pub const ALL: [ParameterSetId; 12] = [
        Self::Shake128s,
        Self::Shake128f,
        Self::Shake192s,
        Self::Shake192f,
        Self::Shake256s,
        Self::Shake256f,
        Self::Sha2_128s,
        Self::Sha2_128f,
        Self::Sha2_192s,
        Self::Sha2_192f,
        Self::Sha2_256s,
        Self::Sha2_256f,
    ];

    /// Resolves a raw identifier, failing on values outside the closed set.
    pub const fn from_u32(value: u32) -> Result<Self, Error> {
        match value {
            1 => Ok(Self::Shake128s),
            2 => Ok(Self::Shake128f),
            3 => Ok(Self::Shake192s),
            4 => Ok(Self::Shake192f),
            5 => Ok(Self::Shake256s),
            6 => Ok(Self::Shake256f),
            7 => Ok(Self::Sha2_128s),
            8 => Ok(Self::Sha2_128f),
            9 => Ok(Self::Sha2_192s),
            10 => Ok(Self::Sha2_192f),
            11 => Ok(Self::Sha2_256s),
            12 => Ok(Self::Sha2_256f),
            other => Err(Error::InvalidParameter(other)),
        }
    }

    /// Human-readable FIPS 205 parameter set name.
    pub const fn name(self) -> &'static str {
        self.params().name
    }

    /// The static parameter descriptor for this identifier.
    pub const fn params(self) -> &'static SlhParams {
        match self {
            Self::Shake128s => &SHAKE_128S,
            Self::Shake128f => &SHAKE_128F,
            Self::Shake192s => &SHAKE_192S,
            Self::Shake192f => &SHAKE_192F,
            Self::Shake256s => &SHAKE_256S,
            Self::Shake256f => &SHAKE_256F,
            Self::Sha2_128s => &SHA2_128S,
            Self::Sha2_128f => &SHA2_128F,
            Self::Sha2_192s => &SHA2_192S,
            Self::Sha2_192f => &SHA2_192F,
            Self::Sha2_256s => &SHA2_256S,
            Self::Sha2_256f => &SHA2_256F,
        }
    }
}

/// Immutable descriptor of one parameter set.
///
/// Field names follow the FIPS 205 symbols: `n` is the hash output length,
/// `full_height` the total hypertree height `h`, `layers` the layer count
/// `d`, `tree_height` the per-layer subtree height `h' = h / d`, and
/// `fors_height`/`fors_trees` the FORS dimensions `a` and `k`.
#[derive(Debug)]
pub struct SlhParams {
    pub id: ParameterSetId,
    pub name: &'static str,
    pub family: HashFamily,
    pub n: usize,
    pub full_height: usize,
    pub layers: usize,
    pub tree_height: usize,
    pub fors_height: usize,
    pub fors_trees: usize,
}

impl SlhParams {
    /// Message chains of a WOTS+ key, two base-w digits per byte of `n`.
    pub const fn wots_len1(&self) -> usize {
        8 * self.n / WOTS_LOGW
    }

    /// Total chain count, message plus checksum.
    pub const fn wots_len(&self) -> usize {
        self.wots_len1() + WOTS_LEN2
    }

    /// Byte size of a WOTS+ signature (and of its expanded public key).
    pub const fn wots_bytes(&self) -> usize {
        self.wots_len() * self.n
    }

    /// Byte size of one hypertree layer's share of a signature: a WOTS+
    /// signature plus the authentication path.
    pub const fn xmss_bytes(&self) -> usize {
        self.wots_bytes() + self.tree_height * self.n
    }

    /// Message digest bytes consumed by FORS index derivation.
    pub const fn fors_msg_bytes(&self) -> usize {
        (self.fors_trees * self.fors_height + 7) / 8
    }

    /// Byte size of a FORS signature: per tree, one secret leaf value and an
    /// authentication path of height `a`.
    pub const fn fors_bytes(&self) -> usize {
        self.fors_trees * (self.fors_height + 1) * self.n
    }

    /// Bits of the digest addressing the bottom-layer tree.
    pub const fn tree_bits(&self) -> usize {
        self.full_height - self.tree_height
    }

    pub const fn tree_bytes(&self) -> usize {
        (self.tree_bits() + 7) / 8
    }

    /// Bits of the digest addressing the leaf within that tree.
    pub const fn leaf_bits(&self) -> usize {
        self.tree_height
    }

    pub const fn leaf_bytes(&self) -> usize {
        (self.leaf_bits() + 7) / 8
    }

    /// Total output length of the message digest function `H_msg`.
    pub const fn digest_bytes(&self) -> usize {
        self.fors_msg_bytes() + self.tree_bytes() + self.leaf_bytes()
    }

    /// Fixed signature length: randomizer, FORS signature, hypertree
    /// signature.
    pub const fn signature_bytes(&self) -> usize {
        self.n + self.fors_bytes() + self.layers * self.wots_bytes() + self.full_height * self.n
    }

    /// Verifying key length: public seed and hypertree root.
    pub const fn verifying_key_bytes(&self) -> usize {
        2 * self.n
    }

    /// Signing key length: secret seed, PRF key, public seed, cached root.
    pub const fn signing_key_bytes(&self) -> usize {
        4 * self.n
    }

    /// Seed material consumed by deterministic key generation.
    pub const fn keygen_seed_bytes(&self) -> usize {
        3 * self.n
    }
}

macro_rules! parameter_set {
    ($ident:ident, $id:ident, $name:literal, $family:ident,
     n: $n:literal, h: $h:literal, d: $d:literal, hp: $hp:literal,
     a: $a:literal, k: $k:literal) => {
        pub static $ident: SlhParams = SlhParams {
            id: ParameterSetId::$id,
            name: $name,
            family: HashFamily::$family,
            n: $n,
            full_height: $h,
            layers: $d,
            tree_height: $hp,
            fors_height: $a,
            fors_trees: $k,
        };
    };
}

parameter_set!(SHAKE_128S, Shake128s, "SLH-DSA-SHAKE-128s", Shake, n: 16, h: 63, d: 7, hp: 9, a: 12, k: 14);
parameter_set!(SHAKE_128F, Shake128f, "SLH-DSA-SHAKE-128f", Shake, n: 16, h: 66, d: 22, hp: 3, a: 6, k: 33);
parameter_set!(SHAKE_192S, Shake192s, "SLH-DSA-SHAKE-192s", Shake, n: 24, h: 63, d: 7, hp: 9, a: 14, k: 17);
parameter_set!(SHAKE_192F, Shake192f, "SLH-DSA-SHAKE-192f", Shake, n: 24, h: 66, d: 22, hp: 3, a: 8, k: 33);
parameter_set!(SHAKE_256S, Shake256s, "SLH-DSA-SHAKE-256s", Shake, n: 32, h: 64, d: 8, hp: 8, a: 14, k: 22);
parameter_set!(SHAKE_256F, Shake256f, "SLH-DSA-SHAKE-256f", Shake, n: 32, h: 68, d: 17, hp: 4, a: 9, k: 35);
parameter_set!(SHA2_128S, Sha2_128s, "SLH-DSA-SHA2-128s", Sha2, n: 16, h: 63, d: 7, hp: 9, a: 12, k: 14);
parameter_set!(SHA2_128F, Sha2_128f, "SLH-DSA-SHA2-128f", Sha2, n: 16, h: 66, d: 22, hp: 3, a: 6, k: 33);
parameter_set!(SHA2_192S, Sha2_192s, "SLH-DSA-SHA2-192s", Sha2, n: 24, h: 63, d: 7, hp: 9, a: 14, k: 17);
parameter_set!(SHA2_192F, Sha2_192f, "SLH-DSA-SHA2-192f", Sha2, n: 24, h: 66, d: 22, hp: 3, a: 8, k: 33);
parameter_set!(SHA2_256S, Sha2_256s, "SLH-DSA-SHA2-256s", Sha2, n: 32, h: 64, d: 8, hp: 8, a: 14, k: 22);
parameter_set!(SHA2_256F, Sha2_256f, "SLH-DSA-SHA2-256f", Sha2, n: 32, h: 68, d: 17, hp: 4, a: 9, k: 35);
