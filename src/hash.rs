//! Derived hash functions.
//!
//! The scheme uses five functions derived from the base hash: the keyed
//! tweakable hash `thash` (the FIPS `F`/`H`/`T` functions, distinguished only
//! by their block count), the secret-value PRF, the randomizer PRF
//! `prf_msg`, and the message digest `h_msg`. Each family implements them
//! with its own input encodings; [`SlhHasher`] selects the family once per
//! parameter set and dispatches by value.

pub(crate) mod sha2;
pub(crate) mod shake;

use crate::adrs::Adrs;
use crate::hash::sha2::Sha2Hasher;
use crate::hash::shake::ShakeHasher;
use crate::params::{HashFamily, SlhParams};
use crate::utils::bytes_to_u64;

/// Family dispatch for the derived hash functions, bound to one public seed.
#[derive(Clone)]
pub(crate) enum SlhHasher {
    Shake(ShakeHasher),
    Sha2(Sha2Hasher),
}

impl SlhHasher {
    pub fn new(params: &'static SlhParams, pub_seed: &[u8]) -> Self {
        match params.family {
            HashFamily::Shake => Self::Shake(ShakeHasher::new(params, pub_seed)),
            HashFamily::Sha2 => Self::Sha2(Sha2Hasher::new(params, pub_seed)),
        }
    }

    pub fn params(&self) -> &'static SlhParams {
        match self {
            Self::Shake(h) => h.params,
            Self::Sha2(h) => h.params,
        }
    }

    /// Tweakable hash over `in_blocks` concatenated `n`-byte blocks.
    pub fn thash(&self, output: &mut [u8], input: &[u8], in_blocks: usize, adrs: &Adrs) {
        match self {
            Self::Shake(h) => h.thash(output, input, in_blocks, adrs),
            Self::Sha2(h) => h.thash(output, input, in_blocks, adrs),
        }
    }

    /// Single-block `thash` modifying its input in place.
    pub fn thash_inplace(&self, inout: &mut [u8], adrs: &Adrs) {
        let mut out = [0u8; 32];
        let n = self.params().n;
        self.thash(&mut out[..n], inout, 1, adrs);
        inout[..n].copy_from_slice(&out[..n]);
    }

    /// Secret-value PRF: derives an `n`-byte chain or leaf secret from the
    /// secret seed at the given address.
    pub fn prf(&self, output: &mut [u8], sk_seed: &[u8], adrs: &Adrs) {
        match self {
            Self::Shake(h) => h.prf(output, sk_seed, adrs),
            Self::Sha2(h) => h.prf(output, sk_seed, adrs),
        }
    }

    /// Randomizer PRF: derives the signature randomizer `R` from the PRF
    /// key, the per-signature randomness, and the message.
    pub fn prf_msg(&self, output: &mut [u8], sk_prf: &[u8], opt_rand: &[u8], m: &[u8]) {
        match self {
            Self::Shake(h) => h.prf_msg(output, sk_prf, opt_rand, m),
            Self::Sha2(h) => h.prf_msg(output, sk_prf, opt_rand, m),
        }
    }

    /// Message digest: hashes `R`, the verifying key, and the message into
    /// the FORS message bits plus the hypertree leaf position.
    pub fn h_msg(&self, r: &[u8], pk_root: &[u8], m: &[u8]) -> (Vec<u8>, u64, u32) {
        let params = self.params();
        let mut digest = vec![0u8; params.digest_bytes()];
        match self {
            Self::Shake(h) => h.h_msg(&mut digest, r, pk_root, m),
            Self::Sha2(h) => h.h_msg(&mut digest, r, pk_root, m),
        }

        let fors_msg_bytes = params.fors_msg_bytes();
        let tree_end = fors_msg_bytes + params.tree_bytes();

        let idx_tree = bytes_to_u64(&digest[fors_msg_bytes..tree_end])
            & (u64::MAX >> (64 - params.tree_bits()));
        let idx_leaf = (bytes_to_u64(&digest[tree_end..]) as u32)
            & (u32::MAX >> (32 - params.leaf_bits()));

        digest.truncate(fors_msg_bytes);
        (digest, idx_tree, idx_leaf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adrs::AdrsType;
    use crate::params::ParameterSetId;

    #[test]
    fn families_separate_domains() {
        // Identical inputs under the two families must not collide.
        let pub_seed = [7u8; 16];
        let shake = SlhHasher::new(ParameterSetId::Shake128f.params(), &pub_seed);
        let sha2 = SlhHasher::new(ParameterSetId::Sha2_128f.params(), &pub_seed);

        let adrs = Adrs::from(AdrsType::WotsHash);
        let input = [42u8; 16];
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        shake.thash(&mut a, &input, 1, &adrs);
        sha2.thash(&mut b, &input, 1, &adrs);
        assert_ne!(a, b);
    }

    #[test]
    fn thash_depends_on_the_address() {
        let pub_seed = [1u8; 16];
        let hasher = SlhHasher::new(ParameterSetId::Shake128f.params(), &pub_seed);

        let input = [3u8; 16];
        let mut adrs = Adrs::from(AdrsType::WotsHash);
        let mut out1 = [0u8; 16];
        hasher.thash(&mut out1, &input, 1, &adrs);

        adrs.set_chain_addr(1);
        let mut out2 = [0u8; 16];
        hasher.thash(&mut out2, &input, 1, &adrs);
        assert_ne!(out1, out2);
    }

    #[test]
    fn thash_inplace_matches_thash() {
        for id in [ParameterSetId::Shake128f, ParameterSetId::Sha2_128f] {
            let pub_seed = [9u8; 16];
            let hasher = SlhHasher::new(id.params(), &pub_seed);
            let adrs = Adrs::from(AdrsType::WotsHash);

            let mut buf = [0x5au8; 16];
            let mut out = [0u8; 16];
            hasher.thash(&mut out, &buf, 1, &adrs);
            hasher.thash_inplace(&mut buf, &adrs);
            assert_eq!(buf, out);
        }
    }

    #[test]
    fn h_msg_indices_stay_in_range() {
        for id in ParameterSetId::ALL {
            let params = id.params();
            let pub_seed = vec![0x11u8; params.n];
            let hasher = SlhHasher::new(params, &pub_seed);

            let r = vec![0x22u8; params.n];
            let root = vec![0x33u8; params.n];
            let (md, idx_tree, idx_leaf) = hasher.h_msg(&r, &root, b"digest splitting");

            assert_eq!(md.len(), params.fors_msg_bytes());
            if params.tree_bits() < 64 {
                assert!(idx_tree < 1u64 << params.tree_bits());
            }
            assert!(idx_leaf < 1u32 << params.leaf_bits());
        }
    }
}
