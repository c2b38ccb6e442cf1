//! # Forest Of Random Subsets (FORS)
//!
//! The few-time component signing the actual message digest. The digest is
//! cut into `k` groups of `a` bits; group `i` selects one leaf of the `i`-th
//! Merkle tree of height `a`. Signing reveals each selected leaf's secret
//! value and sibling path; the public key is the compression of the `k`
//! roots and is itself the value the hypertree signs.
//!
//! All trees share the secret-seed derivation but occupy disjoint index
//! ranges of the address space, so their leaves never collide. The trees are
//! mutually independent and are processed in parallel.

use crate::adrs::{Adrs, AdrsType};
use crate::hash::SlhHasher;
use crate::params::SlhParams;
use crate::utils::base_2b;
use rayon::prelude::*;
use zeroize::Zeroize;

pub(crate) struct Fors<'a> {
    hasher: &'a SlhHasher,
    params: &'static SlhParams,
}

impl<'a> Fors<'a> {
    pub fn new(hasher: &'a SlhHasher) -> Self {
        Self {
            hasher,
            params: hasher.params(),
        }
    }

    /// Signs the digest and returns the signature alongside the public key
    /// the hypertree must authenticate. `adrs` carries the bottom-layer tree
    /// and key-pair position (type `ForsTree`).
    pub fn sign(&self, md: &[u8], sk_seed: &[u8], adrs: Adrs) -> (Vec<u8>, Vec<u8>) {
        let n = self.params.n;
        let k = self.params.fors_trees;
        let indices = self.indices(md);

        let per_tree: Vec<(Vec<u8>, Vec<u8>)> = (0..k)
            .into_par_iter()
            .map(|i| self.tree_sign(sk_seed, i, indices[i], adrs))
            .collect();

        let mut sig = Vec::with_capacity(self.params.fors_bytes());
        let mut roots = vec![0u8; k * n];
        for (i, (chunk, root)) in per_tree.iter().enumerate() {
            sig.extend_from_slice(chunk);
            roots[i * n..(i + 1) * n].copy_from_slice(root);
        }

        (sig, self.compress_roots(&roots, adrs))
    }

    /// Recomputes the public key a signature commits to. The result only
    /// matches the signer's key if every revealed leaf and path is intact.
    pub fn pk_from_sig(&self, sig: &[u8], md: &[u8], adrs: Adrs) -> Vec<u8> {
        let n = self.params.n;
        let a = self.params.fors_height;
        let k = self.params.fors_trees;
        let chunk_bytes = (a + 1) * n;
        let indices = self.indices(md);

        let roots: Vec<Vec<u8>> = (0..k)
            .into_par_iter()
            .map(|i| {
                let chunk = &sig[i * chunk_bytes..(i + 1) * chunk_bytes];
                self.tree_root(chunk, i, indices[i], adrs)
            })
            .collect();

        let mut concat = vec![0u8; k * n];
        for (i, root) in roots.iter().enumerate() {
            concat[i * n..(i + 1) * n].copy_from_slice(root);
        }
        self.compress_roots(&concat, adrs)
    }

    /// The digest's `k` leaf selectors, `a` bits each.
    fn indices(&self, md: &[u8]) -> Vec<u32> {
        let mut indices = vec![0u32; self.params.fors_trees];
        base_2b(&mut indices, self.params.fors_height, md);
        indices
    }

    /// Builds tree `tree` completely, returning its signature chunk (secret
    /// leaf value plus authentication path) and its root.
    fn tree_sign(&self, sk_seed: &[u8], tree: usize, selected: u32, adrs: Adrs) -> (Vec<u8>, Vec<u8>) {
        let n = self.params.n;
        let a = self.params.fors_height;
        let leaves = 1usize << a;
        let base = (tree << a) as u32;

        let mut sk_adrs = adrs;
        sk_adrs.set_type(AdrsType::ForsPrf);
        sk_adrs.set_keypair_addr(adrs.keypair_addr());

        let mut leaf_adrs = adrs;
        let mut chunk = Vec::with_capacity((a + 1) * n);
        chunk.resize(n, 0);

        let mut sk = vec![0u8; n];
        let mut level = vec![0u8; leaves * n];
        for j in 0..leaves {
            let idx = base + j as u32;
            sk_adrs.set_tree_index(idx);
            self.hasher.prf(&mut sk, sk_seed, &sk_adrs);
            if j == selected as usize {
                chunk[..n].copy_from_slice(&sk);
            }
            leaf_adrs.set_tree_height(0);
            leaf_adrs.set_tree_index(idx);
            self.hasher
                .thash(&mut level[j * n..(j + 1) * n], &sk, 1, &leaf_adrs);
        }
        sk.zeroize();

        // Hash the levels up, harvesting the sibling of the selected node at
        // each height.
        let mut node_adrs = adrs;
        let mut width = leaves;
        for z in 0..a {
            let sibling = ((selected as usize >> z) ^ 1) * n;
            chunk.extend_from_slice(&level[sibling..sibling + n]);

            width /= 2;
            let mut next = vec![0u8; width * n];
            for j in 0..width {
                node_adrs.set_tree_height(z as u32 + 1);
                node_adrs.set_tree_index((base >> (z + 1)) + j as u32);
                self.hasher.thash(
                    &mut next[j * n..(j + 1) * n],
                    &level[2 * j * n..(2 * j + 2) * n],
                    2,
                    &node_adrs,
                );
            }
            level = next;
        }

        (chunk, level)
    }

    /// Root of tree `tree` implied by one signature chunk.
    fn tree_root(&self, chunk: &[u8], tree: usize, selected: u32, adrs: Adrs) -> Vec<u8> {
        let n = self.params.n;
        let a = self.params.fors_height;
        let idx = ((tree << a) as u32) + selected;

        let mut leaf_adrs = adrs;
        leaf_adrs.set_tree_height(0);
        leaf_adrs.set_tree_index(idx);
        let mut node = vec![0u8; n];
        self.hasher.thash(&mut node, &chunk[..n], 1, &leaf_adrs);

        let auth = &chunk[n..];
        let mut node_adrs = adrs;
        let mut pair = vec![0u8; 2 * n];
        for z in 0..a {
            let sibling = &auth[z * n..(z + 1) * n];
            if (idx >> z) & 1 == 0 {
                pair[..n].copy_from_slice(&node);
                pair[n..].copy_from_slice(sibling);
            } else {
                pair[..n].copy_from_slice(sibling);
                pair[n..].copy_from_slice(&node);
            }
            node_adrs.set_tree_height(z as u32 + 1);
            node_adrs.set_tree_index(idx >> (z + 1));
            self.hasher.thash(&mut node, &pair, 2, &node_adrs);
        }
        node
    }

    /// T_k over the tree roots at a `ForsRoots` address.
    fn compress_roots(&self, roots: &[u8], adrs: Adrs) -> Vec<u8> {
        let mut pk_adrs = adrs;
        pk_adrs.set_type(AdrsType::ForsRoots);
        pk_adrs.set_keypair_addr(adrs.keypair_addr());

        let mut pk = vec![0u8; self.params.n];
        self.hasher
            .thash(&mut pk, roots, self.params.fors_trees, &pk_adrs);
        pk
    }
}
