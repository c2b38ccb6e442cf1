//! SHAKE family: every derived function is SHAKE256 over a straight
//! concatenation of its inputs, read out at `n` (or `m`) bytes.

use crate::adrs::Adrs;
use crate::params::SlhParams;
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};

#[derive(Clone, Debug)]
pub(crate) struct ShakeHasher {
    pub params: &'static SlhParams,
    pub_seed: Vec<u8>,
}

impl ShakeHasher {
    pub fn new(params: &'static SlhParams, pub_seed: &[u8]) -> Self {
        Self {
            params,
            pub_seed: pub_seed[..params.n].to_vec(),
        }
    }

    /// T_l(PK.seed, ADRS, M) = SHAKE256(PK.seed || ADRS || M, 8n)
    pub fn thash(&self, output: &mut [u8], input: &[u8], in_blocks: usize, adrs: &Adrs) {
        let n = self.params.n;
        let mut hasher = Shake256::default();
        hasher.update(&self.pub_seed);
        hasher.update(adrs.as_ref());
        hasher.update(&input[..in_blocks * n]);
        let mut reader = hasher.finalize_xof();
        reader.read(&mut output[..n]);
    }

    /// PRF(PK.seed, SK.seed, ADRS) = SHAKE256(PK.seed || ADRS || SK.seed, 8n)
    pub fn prf(&self, output: &mut [u8], sk_seed: &[u8], adrs: &Adrs) {
        self.thash(output, sk_seed, 1, adrs);
    }

    /// PRF_msg(SK.prf, opt_rand, M) = SHAKE256(SK.prf || opt_rand || M, 8n)
    pub fn prf_msg(&self, output: &mut [u8], sk_prf: &[u8], opt_rand: &[u8], m: &[u8]) {
        let n = self.params.n;
        let mut hasher = Shake256::default();
        hasher.update(&sk_prf[..n]);
        hasher.update(&opt_rand[..n]);
        hasher.update(m);
        let mut reader = hasher.finalize_xof();
        reader.read(&mut output[..n]);
    }

    /// H_msg(R, PK.seed, PK.root, M) = SHAKE256(R || PK.seed || PK.root || M, 8m)
    pub fn h_msg(&self, digest: &mut [u8], r: &[u8], pk_root: &[u8], m: &[u8]) {
        let n = self.params.n;
        let mut hasher = Shake256::default();
        hasher.update(&r[..n]);
        hasher.update(&self.pub_seed);
        hasher.update(&pk_root[..n]);
        hasher.update(m);
        let mut reader = hasher.finalize_xof();
        reader.read(digest);
    }
}
