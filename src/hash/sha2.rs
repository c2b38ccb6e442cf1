//! SHA2 family.
//!
//! `F` and the secret-value PRF are SHA-256 at every security level; `H`,
//! `T_l`, `H_msg`, and `PRF_msg` move to SHA-512 above the 128-bit level.
//! The keyed functions hash the public seed padded to a full compression
//! block, so both states are absorbed once at construction and cloned per
//! call. Addresses enter in their 22-byte compressed form.

use crate::adrs::Adrs;
use crate::params::SlhParams;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

const SHA256_BLOCK_BYTES: usize = 64;
const SHA512_BLOCK_BYTES: usize = 128;

#[derive(Clone)]
pub(crate) struct Sha2Hasher {
    pub params: &'static SlhParams,
    pub_seed: Vec<u8>,
    state256: Sha256,
    state512: Sha512,
}

impl Sha2Hasher {
    pub fn new(params: &'static SlhParams, pub_seed: &[u8]) -> Self {
        let n = params.n;

        let mut block256 = [0u8; SHA256_BLOCK_BYTES];
        block256[..n].copy_from_slice(&pub_seed[..n]);
        let mut state256 = Sha256::new();
        state256.update(block256);

        let mut block512 = [0u8; SHA512_BLOCK_BYTES];
        block512[..n].copy_from_slice(&pub_seed[..n]);
        let mut state512 = Sha512::new();
        state512.update(block512);

        Self {
            params,
            pub_seed: pub_seed[..n].to_vec(),
            state256,
            state512,
        }
    }

    /// SHA-512 is used for the multi-block functions above the 128-bit
    /// security level.
    fn wide(&self) -> bool {
        self.params.n > 16
    }

    /// F (one block, always SHA-256):
    ///   Trunc_n(SHA-256(BlockPad(PK.seed) || ADRSc || M1))
    /// T_l / H (l >= 2 blocks):
    ///   Trunc_n(SHA-256 or SHA-512(BlockPad(PK.seed) || ADRSc || M))
    pub fn thash(&self, output: &mut [u8], input: &[u8], in_blocks: usize, adrs: &Adrs) {
        let n = self.params.n;
        if in_blocks == 1 || !self.wide() {
            let mut hasher = self.state256.clone();
            hasher.update(adrs.compressed());
            hasher.update(&input[..in_blocks * n]);
            output[..n].copy_from_slice(&hasher.finalize()[..n]);
        } else {
            let mut hasher = self.state512.clone();
            hasher.update(adrs.compressed());
            hasher.update(&input[..in_blocks * n]);
            output[..n].copy_from_slice(&hasher.finalize()[..n]);
        }
    }

    /// PRF(PK.seed, SK.seed, ADRS) =
    ///   Trunc_n(SHA-256(BlockPad(PK.seed) || ADRSc || SK.seed))
    pub fn prf(&self, output: &mut [u8], sk_seed: &[u8], adrs: &Adrs) {
        let n = self.params.n;
        let mut hasher = self.state256.clone();
        hasher.update(adrs.compressed());
        hasher.update(&sk_seed[..n]);
        output[..n].copy_from_slice(&hasher.finalize()[..n]);
    }

    /// PRF_msg(SK.prf, opt_rand, M) =
    ///   Trunc_n(HMAC-SHA-256/512(SK.prf, opt_rand || M))
    pub fn prf_msg(&self, output: &mut [u8], sk_prf: &[u8], opt_rand: &[u8], m: &[u8]) {
        let n = self.params.n;
        if self.wide() {
            let mut mac = Hmac::<Sha512>::new_from_slice(&sk_prf[..n])
                .expect("HMAC accepts keys of any length");
            mac.update(&opt_rand[..n]);
            mac.update(m);
            output[..n].copy_from_slice(&mac.finalize().into_bytes()[..n]);
        } else {
            let mut mac = Hmac::<Sha256>::new_from_slice(&sk_prf[..n])
                .expect("HMAC accepts keys of any length");
            mac.update(&opt_rand[..n]);
            mac.update(m);
            output[..n].copy_from_slice(&mac.finalize().into_bytes()[..n]);
        }
    }

    /// H_msg(R, PK.seed, PK.root, M) =
    ///   MGF1-SHA-256/512(R || PK.seed || SHA-256/512(R || PK.seed || PK.root || M), m)
    pub fn h_msg(&self, digest: &mut [u8], r: &[u8], pk_root: &[u8], m: &[u8]) {
        let n = self.params.n;
        let mut seed = Vec::with_capacity(2 * n + SHA512_BLOCK_BYTES / 2);
        seed.extend_from_slice(&r[..n]);
        seed.extend_from_slice(&self.pub_seed);

        if self.wide() {
            let mut hasher = Sha512::new();
            hasher.update(&r[..n]);
            hasher.update(&self.pub_seed);
            hasher.update(&pk_root[..n]);
            hasher.update(m);
            seed.extend_from_slice(&hasher.finalize()[..]);
            mgf1::<Sha512>(digest, &seed);
        } else {
            let mut hasher = Sha256::new();
            hasher.update(&r[..n]);
            hasher.update(&self.pub_seed);
            hasher.update(&pk_root[..n]);
            hasher.update(m);
            seed.extend_from_slice(&hasher.finalize()[..]);
            mgf1::<Sha256>(digest, &seed);
        }
    }
}

/// MGF1: fills `output` with HASH(seed || counter) blocks, counter big-endian
/// from zero.
fn mgf1<D: Digest>(output: &mut [u8], seed: &[u8]) {
    let mut offset = 0;
    let mut counter: u32 = 0;
    while offset < output.len() {
        let mut hasher = D::new();
        hasher.update(seed);
        hasher.update(counter.to_be_bytes());
        let block = hasher.finalize();
        let block = &block[..];
        let take = block.len().min(output.len() - offset);
        output[offset..offset + take].copy_from_slice(&block[..take]);
        offset += take;
        counter += 1;
    }
}
