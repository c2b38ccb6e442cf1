//! # Winternitz One-Time Signature Scheme Plus (WOTS+)
//!
//! The one-time component of the hypertree. Each key pair is `len` hash
//! chains whose starting values are derived from the secret seed through the
//! PRF; the public key is the compression of all chain tips. Signing a
//! digest reveals one intermediate value per chain, positioned by the
//! digest's base-w digits plus a checksum, and verification completes the
//! chains and recompresses.
//!
//! Every chain and every chain step carries its own address, so no two hash
//! invocations anywhere in the hypertree share an input encoding. A key pair
//! is identified purely by the (layer, tree, key pair) fields of the address
//! handed in by the caller; nothing is stored.

use crate::adrs::{Adrs, AdrsType};
use crate::hash::SlhHasher;
use crate::params::{SlhParams, WOTS_LEN2, WOTS_LOGW, WOTS_W};
use crate::utils::base_2b;

pub(crate) struct WotsPlus<'a> {
    hasher: &'a SlhHasher,
    params: &'static SlhParams,
}

impl<'a> WotsPlus<'a> {
    pub fn new(hasher: &'a SlhHasher) -> Self {
        Self {
            hasher,
            params: hasher.params(),
        }
    }

    /// Derives the compressed public key of the key pair addressed by
    /// `adrs` (type `WotsHash`, key-pair field set).
    pub fn pk_gen(&self, sk_seed: &[u8], adrs: Adrs) -> Vec<u8> {
        let n = self.params.n;
        let len = self.params.wots_len();

        let mut sk_adrs = adrs;
        sk_adrs.set_type(AdrsType::WotsPrf);
        sk_adrs.set_keypair_addr(adrs.keypair_addr());

        let mut chain_adrs = adrs;
        let mut tips = vec![0u8; len * n];
        for i in 0..len {
            let tip = &mut tips[i * n..(i + 1) * n];
            sk_adrs.set_chain_addr(i as u32);
            self.hasher.prf(tip, sk_seed, &sk_adrs);
            chain_adrs.set_chain_addr(i as u32);
            self.gen_chain(tip, 0, WOTS_W - 1, chain_adrs);
        }

        self.compress(&tips, adrs)
    }

    /// Signs an `n`-byte digest: for digit `i`, reveals the chain value
    /// `digit` steps from the start.
    pub fn sign(&self, msg: &[u8], sk_seed: &[u8], adrs: Adrs) -> Vec<u8> {
        let n = self.params.n;
        let len = self.params.wots_len();
        let steps = self.chain_lengths(msg);

        let mut sk_adrs = adrs;
        sk_adrs.set_type(AdrsType::WotsPrf);
        sk_adrs.set_keypair_addr(adrs.keypair_addr());

        let mut chain_adrs = adrs;
        let mut sig = vec![0u8; len * n];
        for i in 0..len {
            let value = &mut sig[i * n..(i + 1) * n];
            sk_adrs.set_chain_addr(i as u32);
            self.hasher.prf(value, sk_seed, &sk_adrs);
            chain_adrs.set_chain_addr(i as u32);
            self.gen_chain(value, 0, steps[i] as usize, chain_adrs);
        }
        sig
    }

    /// Completes the chains of a signature and recompresses them into the
    /// candidate public key.
    pub fn pk_from_sig(&self, sig: &[u8], msg: &[u8], adrs: Adrs) -> Vec<u8> {
        let n = self.params.n;
        let len = self.params.wots_len();
        let steps = self.chain_lengths(msg);

        let mut chain_adrs = adrs;
        let mut tips = vec![0u8; len * n];
        for i in 0..len {
            let tip = &mut tips[i * n..(i + 1) * n];
            tip.copy_from_slice(&sig[i * n..(i + 1) * n]);
            chain_adrs.set_chain_addr(i as u32);
            self.gen_chain(
                tip,
                steps[i] as usize,
                WOTS_W - 1 - steps[i] as usize,
                chain_adrs,
            );
        }

        self.compress(&tips, adrs)
    }

    /// Final public-key compression: T_len over the chain tips.
    fn compress(&self, tips: &[u8], adrs: Adrs) -> Vec<u8> {
        let mut pk_adrs = adrs;
        pk_adrs.set_type(AdrsType::WotsPk);
        pk_adrs.set_keypair_addr(adrs.keypair_addr());

        let mut pk = vec![0u8; self.params.n];
        self.hasher
            .thash(&mut pk, tips, self.params.wots_len(), &pk_adrs);
        pk
    }

    /// Advances an `n`-byte value `steps` positions along its chain,
    /// starting at position `start`.
    fn gen_chain(&self, value: &mut [u8], start: usize, steps: usize, mut adrs: Adrs) {
        for i in start..(start + steps).min(WOTS_W) {
            adrs.set_hash_addr(i as u32);
            self.hasher.thash_inplace(value, &adrs);
        }
    }

    /// Splits a digest into its base-w digits and appends the checksum
    /// digits that protect against chain advancing.
    fn chain_lengths(&self, msg: &[u8]) -> Vec<u32> {
        let len1 = self.params.wots_len1();
        let mut lengths = vec![0u32; self.params.wots_len()];
        base_2b(&mut lengths[..len1], WOTS_LOGW, msg);

        let csum: u32 = lengths[..len1]
            .iter()
            .map(|&digit| (WOTS_W as u32 - 1) - digit)
            .sum();
        // Left-align the checksum bits before digit extraction.
        let shift = (8 - (WOTS_LEN2 * WOTS_LOGW) % 8) % 8;
        let csum_bytes = ((csum << shift) as u16).to_be_bytes();
        base_2b(&mut lengths[len1..], WOTS_LOGW, &csum_bytes);

        lengths
    }
}
