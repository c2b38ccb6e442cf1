//! # SLH-DSA scheme
//!
//! The orchestrator composing the FORS and hypertree components into the
//! public operations: key generation, randomized and deterministic signing,
//! and verification. A [`SlhDsa`] value is a stateless handle bound to one
//! parameter set; every operation is a pure function of its inputs (plus
//! entropy where requested).

use crate::adrs::{Adrs, AdrsType};
use crate::error::{Error, Result};
use crate::fors::Fors;
use crate::hash::SlhHasher;
use crate::hypertree::Hypertree;
use crate::params::{ParameterSetId, SlhParams, MAX_CONTEXT_BYTES};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

/// Secret signing key: secret seed, PRF key, and the public seed and cached
/// hypertree root it was generated with. Wiped from memory when dropped.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SigningKey {
    sk_seed: Vec<u8>,
    sk_prf: Vec<u8>,
    pk_seed: Vec<u8>,
    pk_root: Vec<u8>,
}

impl SigningKey {
    /// Serializes as `sk_seed || sk_prf || pk_seed || pk_root`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 * self.sk_seed.len());
        bytes.extend_from_slice(&self.sk_seed);
        bytes.extend_from_slice(&self.sk_prf);
        bytes.extend_from_slice(&self.pk_seed);
        bytes.extend_from_slice(&self.pk_root);
        bytes
    }
}

/// Public verifying key: public seed and hypertree root.
#[derive(Clone, Zeroize)]
pub struct VerifyingKey {
    pk_seed: Vec<u8>,
    pk_root: Vec<u8>,
}

impl VerifyingKey {
    /// Serializes as `pk_seed || pk_root`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(2 * self.pk_seed.len());
        bytes.extend_from_slice(&self.pk_seed);
        bytes.extend_from_slice(&self.pk_root);
        bytes
    }
}

/// A detached signature: randomizer, FORS signature, hypertree signature.
#[derive(Clone)]
pub struct Signature(Vec<u8>);

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Signature> for Vec<u8> {
    fn from(sig: Signature) -> Self {
        sig.0
    }
}

/// Stateless handle for one parameter set.
#[derive(Copy, Clone, Debug)]
pub struct SlhDsa {
    params: &'static SlhParams,
}

impl SlhDsa {
    pub fn new(id: ParameterSetId) -> Self {
        Self { params: id.params() }
    }

    pub fn params(&self) -> &'static SlhParams {
        self.params
    }

    /// Generates a fresh key pair from the operating system's entropy
    /// source.
    pub fn keygen(&self) -> (SigningKey, VerifyingKey) {
        self.keygen_with_rng(&mut OsRng)
    }

    /// Generates a key pair from a caller-supplied randomness source.
    pub fn keygen_with_rng<R: CryptoRng + RngCore>(&self, rng: &mut R) -> (SigningKey, VerifyingKey) {
        let mut seed = Zeroizing::new(vec![0u8; self.params.keygen_seed_bytes()]);
        rng.fill_bytes(&mut seed);
        self.keygen_internal(&seed)
    }

    /// Deterministic key generation from `sk_seed || sk_prf || pk_seed`
    /// (3n bytes).
    pub fn keygen_from_seed(&self, seed: &[u8]) -> Result<(SigningKey, VerifyingKey)> {
        let expected = self.params.keygen_seed_bytes();
        if seed.len() != expected {
            return Err(Error::InvalidSeedLength(expected, seed.len()));
        }
        Ok(self.keygen_internal(seed))
    }

    fn keygen_internal(&self, seed: &[u8]) -> (SigningKey, VerifyingKey) {
        let n = self.params.n;
        let sk_seed = seed[..n].to_vec();
        let sk_prf = seed[n..2 * n].to_vec();
        let pk_seed = seed[2 * n..3 * n].to_vec();

        let hasher = SlhHasher::new(self.params, &pk_seed);
        let pk_root = Hypertree::new(&hasher).root(&sk_seed);

        let sk = SigningKey {
            sk_seed,
            sk_prf,
            pk_seed: pk_seed.clone(),
            pk_root: pk_root.clone(),
        };
        let vk = VerifyingKey { pk_seed, pk_root };
        (sk, vk)
    }

    /// The verifying key embedded in a signing key.
    pub fn verifying_key_for(&self, sk: &SigningKey) -> VerifyingKey {
        VerifyingKey {
            pk_seed: sk.pk_seed.clone(),
            pk_root: sk.pk_root.clone(),
        }
    }

    /// Deserializes and validates a signing key.
    pub fn signing_key_from_bytes(&self, bytes: &[u8]) -> Result<SigningKey> {
        let n = self.params.n;
        let expected = self.params.signing_key_bytes();
        if bytes.len() != expected {
            return Err(Error::InvalidKeyLength(expected, bytes.len()));
        }
        Ok(SigningKey {
            sk_seed: bytes[..n].to_vec(),
            sk_prf: bytes[n..2 * n].to_vec(),
            pk_seed: bytes[2 * n..3 * n].to_vec(),
            pk_root: bytes[3 * n..].to_vec(),
        })
    }

    /// Deserializes and validates a verifying key.
    pub fn verifying_key_from_bytes(&self, bytes: &[u8]) -> Result<VerifyingKey> {
        let n = self.params.n;
        let expected = self.params.verifying_key_bytes();
        if bytes.len() != expected {
            return Err(Error::InvalidKeyLength(expected, bytes.len()));
        }
        Ok(VerifyingKey {
            pk_seed: bytes[..n].to_vec(),
            pk_root: bytes[n..].to_vec(),
        })
    }

    /// Randomized signing: a fresh randomizer makes repeated signatures over
    /// the same message distinct.
    pub fn sign(&self, message: &[u8], context: &[u8], sk: &SigningKey) -> Result<Signature> {
        self.sign_with_rng(&mut OsRng, message, context, sk)
    }

    pub fn sign_with_rng<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        message: &[u8],
        context: &[u8],
        sk: &SigningKey,
    ) -> Result<Signature> {
        let mut addrnd = vec![0u8; self.params.n];
        rng.fill_bytes(&mut addrnd);
        self.sign_internal(message, context, sk, &addrnd)
    }

    /// Deterministic signing: identical inputs yield byte-identical
    /// signatures. The randomizer is derived with the public seed standing
    /// in for the per-signature randomness.
    pub fn sign_deterministic(
        &self,
        message: &[u8],
        context: &[u8],
        sk: &SigningKey,
    ) -> Result<Signature> {
        self.sign_internal(message, context, sk, &sk.pk_seed)
    }

    fn sign_internal(
        &self,
        message: &[u8],
        context: &[u8],
        sk: &SigningKey,
        opt_rand: &[u8],
    ) -> Result<Signature> {
        let n = self.params.n;
        let m_prime = self.frame_message(message, context)?;

        let hasher = SlhHasher::new(self.params, &sk.pk_seed);

        let mut sig = Vec::with_capacity(self.params.signature_bytes());
        let mut r = vec![0u8; n];
        hasher.prf_msg(&mut r, &sk.sk_prf, opt_rand, &m_prime);
        sig.extend_from_slice(&r);

        let (md, idx_tree, idx_leaf) = hasher.h_msg(&r, &sk.pk_root, &m_prime);

        let mut adrs = Adrs::from(AdrsType::ForsTree);
        adrs.set_tree_addr(idx_tree);
        adrs.set_keypair_addr(idx_leaf);
        let fors = Fors::new(&hasher);
        let (fors_sig, fors_pk) = fors.sign(&md, &sk.sk_seed, adrs);
        sig.extend_from_slice(&fors_sig);

        let ht = Hypertree::new(&hasher);
        sig.extend_from_slice(&ht.sign(&fors_pk, &sk.sk_seed, idx_tree, idx_leaf));

        Ok(Signature(sig))
    }

    /// Verifies a detached signature.
    ///
    /// Structural problems (wrong lengths, oversized context) are errors; a
    /// cryptographic mismatch is the regular `Ok(false)` outcome.
    pub fn verify(
        &self,
        signature: &[u8],
        message: &[u8],
        context: &[u8],
        vk: &VerifyingKey,
    ) -> Result<bool> {
        let n = self.params.n;
        let expected = self.params.signature_bytes();
        if signature.len() != expected {
            return Err(Error::InvalidSignatureLength(expected, signature.len()));
        }
        let m_prime = self.frame_message(message, context)?;

        let hasher = SlhHasher::new(self.params, &vk.pk_seed);

        let r = &signature[..n];
        let fors_sig = &signature[n..n + self.params.fors_bytes()];
        let ht_sig = &signature[n + self.params.fors_bytes()..];

        let (md, idx_tree, idx_leaf) = hasher.h_msg(r, &vk.pk_root, &m_prime);

        let mut adrs = Adrs::from(AdrsType::ForsTree);
        adrs.set_tree_addr(idx_tree);
        adrs.set_keypair_addr(idx_leaf);
        let fors_pk = Fors::new(&hasher).pk_from_sig(fors_sig, &md, adrs);

        let root = Hypertree::new(&hasher).root_from_sig(ht_sig, &fors_pk, idx_tree, idx_leaf);

        Ok(root.ct_eq(&vk.pk_root).into())
    }

    /// The pure-variant message framing: a zero marker byte, the context
    /// length, the context, and the message itself.
    fn frame_message(&self, message: &[u8], context: &[u8]) -> Result<Vec<u8>> {
        if context.len() > MAX_CONTEXT_BYTES {
            return Err(Error::InvalidContextLength(context.len()));
        }
        let mut m_prime = Vec::with_capacity(2 + context.len() + message.len());
        m_prime.push(0);
        m_prime.push(context.len() as u8);
        m_prime.extend_from_slice(context);
        m_prime.extend_from_slice(message);
        Ok(m_prime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use rand::RngCore;

    const FAST_SETS: [ParameterSetId; 3] = [
        ParameterSetId::Shake128f,
        ParameterSetId::Sha2_128f,
        ParameterSetId::Sha2_192f,
    ];

    #[test]
    fn sign_verify_roundtrip() {
        for id in FAST_SETS {
            let slh = SlhDsa::new(id);
            let (sk, vk) = slh.keygen();

            let message = b"round trip message";
            let context = b"ctx";
            let sig = slh.sign(message, context, &sk).unwrap();
            assert_eq!(sig.as_ref().len(), slh.params().signature_bytes());
            assert!(
                slh.verify(sig.as_ref(), message, context, &vk).unwrap(),
                "{}",
                id.name()
            );

            // Wrong message and wrong context are rejected.
            assert!(!slh.verify(sig.as_ref(), b"other message", context, &vk).unwrap());
            assert!(!slh.verify(sig.as_ref(), message, b"", &vk).unwrap());
        }
    }

    #[test]
    fn abc_scenario_under_a_fast_128_bit_set() {
        let slh = SlhDsa::new(ParameterSetId::Shake128f);
        let (sk, vk) = slh.keygen();

        let sig = slh.sign(b"abc", b"", &sk).unwrap();
        assert!(slh.verify(sig.as_ref(), b"abc", b"", &vk).unwrap());

        let det1 = slh.sign_deterministic(b"abc", b"", &sk).unwrap();
        let det2 = slh.sign_deterministic(b"abc", b"", &sk).unwrap();
        assert_eq!(det1.as_ref(), det2.as_ref());

        let mut corrupted = det1.as_ref().to_vec();
        let last = corrupted.len() - 1;
        corrupted[last] ^= 1;
        assert!(!slh.verify(&corrupted, b"abc", b"", &vk).unwrap());
    }

    #[test]
    fn randomized_signatures_differ() {
        let slh = SlhDsa::new(ParameterSetId::Shake128f);
        let (sk, vk) = slh.keygen();

        let a = slh.sign(b"message", b"", &sk).unwrap();
        let b = slh.sign(b"message", b"", &sk).unwrap();
        assert_ne!(a.as_ref(), b.as_ref());
        assert!(slh.verify(a.as_ref(), b"message", b"", &vk).unwrap());
        assert!(slh.verify(b.as_ref(), b"message", b"", &vk).unwrap());
    }

    #[test]
    fn keygen_from_seed_is_deterministic() {
        let slh = SlhDsa::new(ParameterSetId::Shake128f);
        let mut seed = vec![0u8; slh.params().keygen_seed_bytes()];
        OsRng.fill_bytes(&mut seed);

        let (sk1, vk1) = slh.keygen_from_seed(&seed).unwrap();
        let (sk2, vk2) = slh.keygen_from_seed(&seed).unwrap();
        assert_eq!(sk1.to_bytes(), sk2.to_bytes());
        assert_eq!(vk1.to_bytes(), vk2.to_bytes());

        assert_eq!(
            slh.keygen_from_seed(&seed[1..]).err(),
            Some(Error::InvalidSeedLength(48, 47))
        );
    }

    #[test]
    fn tampering_any_region_invalidates() {
        let slh = SlhDsa::new(ParameterSetId::Shake128f);
        let (sk, vk) = slh.keygen();
        let params = slh.params();

        let message = b"tamper target";
        let sig = slh.sign_deterministic(message, b"", &sk).unwrap();
        assert!(slh.verify(sig.as_ref(), message, b"", &vk).unwrap());

        // One position in each region: randomizer, FORS, hypertree.
        let positions = [
            0,
            params.n + 1,
            params.n + params.fors_bytes() + 1,
            params.signature_bytes() - 1,
        ];
        for pos in positions {
            let mut forged = sig.as_ref().to_vec();
            forged[pos] ^= 0x01;
            assert!(
                !slh.verify(&forged, message, b"", &vk).unwrap(),
                "bit flip at {pos} accepted"
            );
        }
    }

    #[test]
    fn structural_errors_are_reported() {
        let slh = SlhDsa::new(ParameterSetId::Shake128f);
        let (sk, vk) = slh.keygen();
        let params = slh.params();

        let long_context = vec![0u8; 256];
        assert_eq!(
            slh.sign(b"m", &long_context, &sk).err(),
            Some(Error::InvalidContextLength(256))
        );

        let sig = slh.sign(b"m", b"", &sk).unwrap();
        assert_eq!(
            slh.verify(&sig.as_ref()[1..], b"m", b"", &vk).err(),
            Some(Error::InvalidSignatureLength(
                params.signature_bytes(),
                params.signature_bytes() - 1
            ))
        );

        assert_eq!(
            slh.signing_key_from_bytes(&[0u8; 63]).err(),
            Some(Error::InvalidKeyLength(64, 63))
        );
        assert_eq!(
            slh.verifying_key_from_bytes(&[0u8; 31]).err(),
            Some(Error::InvalidKeyLength(32, 31))
        );
    }

    #[test]
    fn maximum_context_length_is_accepted() {
        let slh = SlhDsa::new(ParameterSetId::Shake128f);
        let (sk, vk) = slh.keygen();

        let context = vec![0xa5u8; 255];
        let sig = slh.sign_deterministic(b"m", &context, &sk).unwrap();
        assert!(slh.verify(sig.as_ref(), b"m", &context, &vk).unwrap());
    }

    #[test]
    fn cross_parameter_signatures_are_rejected() {
        let shake = SlhDsa::new(ParameterSetId::Shake128f);
        let (sk, _) = shake.keygen();
        let sig = shake.sign_deterministic(b"m", b"", &sk).unwrap();

        // Different lengths: structural rejection.
        let small = SlhDsa::new(ParameterSetId::Shake128s);
        let vk_small = small
            .verifying_key_from_bytes(&[0u8; 32])
            .unwrap();
        assert_eq!(
            small.verify(sig.as_ref(), b"m", b"", &vk_small).err(),
            Some(Error::InvalidSignatureLength(7856, 17088))
        );

        // Matching lengths, different family: cryptographic rejection.
        let sha2 = SlhDsa::new(ParameterSetId::Sha2_128f);
        let vk_sha2 = sha2
            .verifying_key_from_bytes(&shake.verifying_key_for(&sk).to_bytes())
            .unwrap();
        assert!(!sha2.verify(sig.as_ref(), b"m", b"", &vk_sha2).unwrap());
    }

    #[test]
    fn key_serialization_roundtrips() {
        let slh = SlhDsa::new(ParameterSetId::Sha2_128f);
        let (sk, vk) = slh.keygen();
        let params = slh.params();

        let sk_bytes = sk.to_bytes();
        let vk_bytes = vk.to_bytes();
        assert_eq!(sk_bytes.len(), params.signing_key_bytes());
        assert_eq!(vk_bytes.len(), params.verifying_key_bytes());

        let sk2 = slh.signing_key_from_bytes(&sk_bytes).unwrap();
        let vk2 = slh.verifying_key_from_bytes(&vk_bytes).unwrap();
        assert_eq!(sk2.to_bytes(), sk_bytes);
        assert_eq!(vk2.to_bytes(), vk_bytes);

        // A restored signing key signs interchangeably with the original.
        let sig = slh.sign_deterministic(b"restored", b"", &sk2).unwrap();
        assert!(slh.verify(sig.as_ref(), b"restored", b"", &vk2).unwrap());
        assert_eq!(
            slh.verifying_key_for(&sk2).to_bytes(),
            vk.to_bytes()
        );
    }
}
