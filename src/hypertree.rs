//! # Hypertree
//!
//! `d` layers of height-`h'` Merkle trees whose leaves are WOTS+ public
//! keys. Each layer's selected key pair signs the root of the tree below;
//! the bottom layer signs the FORS public key and the top layer's root is
//! the verifying key root. Which tree and leaf a layer uses is a fixed
//! bit-slice of the global leaf index drawn from the message digest.
//!
//! The layer walk is an iterative loop, and each subtree is materialized
//! level by level (leaves computed in parallel), so signing needs no
//! recursion and no state beyond the current tree.

use crate::adrs::{Adrs, AdrsType};
use crate::hash::SlhHasher;
use crate::params::SlhParams;
use crate::wots::WotsPlus;
use rayon::prelude::*;

pub(crate) struct Hypertree<'a> {
    hasher: &'a SlhHasher,
    params: &'static SlhParams,
}

impl<'a> Hypertree<'a> {
    pub fn new(hasher: &'a SlhHasher) -> Self {
        Self {
            hasher,
            params: hasher.params(),
        }
    }

    /// Root of the single top-layer tree; this is the value cached in the
    /// keys. Lower layers are never touched during key generation.
    pub fn root(&self, sk_seed: &[u8]) -> Vec<u8> {
        let levels = self.tree_levels(sk_seed, self.params.layers as u32 - 1, 0);
        levels[self.params.tree_height].clone()
    }

    /// Walks the layers bottom-up, signing `msg` (the FORS public key) with
    /// layer 0 and each tree root with the layer above it.
    pub fn sign(&self, msg: &[u8], sk_seed: &[u8], idx_tree: u64, idx_leaf: u32) -> Vec<u8> {
        let n = self.params.n;
        let hp = self.params.tree_height;
        let wots = WotsPlus::new(self.hasher);

        let mut sig = Vec::with_capacity(self.params.layers * self.params.xmss_bytes());
        let mut root = msg[..n].to_vec();
        let mut tree = idx_tree;
        let mut leaf = idx_leaf;

        for layer in 0..self.params.layers {
            let levels = self.tree_levels(sk_seed, layer as u32, tree);

            let mut adrs = Adrs::from(AdrsType::WotsHash);
            adrs.set_layer_addr(layer as u32);
            adrs.set_tree_addr(tree);
            adrs.set_keypair_addr(leaf);
            sig.extend_from_slice(&wots.sign(&root, sk_seed, adrs));

            for z in 0..hp {
                let sibling = ((leaf as usize >> z) ^ 1) * n;
                sig.extend_from_slice(&levels[z][sibling..sibling + n]);
            }

            root.copy_from_slice(&levels[hp]);
            leaf = (tree & ((1 << hp) - 1)) as u32;
            tree >>= hp;
        }
        sig
    }

    /// Reconstructs the top root a signature commits to, starting from the
    /// claimed FORS public key. Matches the verifying key root only for an
    /// authentic signature.
    pub fn root_from_sig(&self, sig: &[u8], msg: &[u8], idx_tree: u64, idx_leaf: u32) -> Vec<u8> {
        let n = self.params.n;
        let hp = self.params.tree_height;
        let wots_bytes = self.params.wots_bytes();
        let wots = WotsPlus::new(self.hasher);

        let mut node = msg[..n].to_vec();
        let mut pair = vec![0u8; 2 * n];
        let mut tree = idx_tree;
        let mut leaf = idx_leaf;

        for layer in 0..self.params.layers {
            let layer_sig = &sig[layer * self.params.xmss_bytes()..];
            let auth = &layer_sig[wots_bytes..];

            let mut adrs = Adrs::from(AdrsType::WotsHash);
            adrs.set_layer_addr(layer as u32);
            adrs.set_tree_addr(tree);
            adrs.set_keypair_addr(leaf);
            node = wots.pk_from_sig(&layer_sig[..wots_bytes], &node, adrs);

            let mut node_adrs = Adrs::from(AdrsType::Tree);
            node_adrs.set_layer_addr(layer as u32);
            node_adrs.set_tree_addr(tree);
            for z in 0..hp {
                let sibling = &auth[z * n..(z + 1) * n];
                if (leaf >> z) & 1 == 0 {
                    pair[..n].copy_from_slice(&node);
                    pair[n..].copy_from_slice(sibling);
                } else {
                    pair[..n].copy_from_slice(sibling);
                    pair[n..].copy_from_slice(&node);
                }
                node_adrs.set_tree_height(z as u32 + 1);
                node_adrs.set_tree_index(leaf >> (z + 1));
                self.hasher.thash(&mut node, &pair, 2, &node_adrs);
            }

            leaf = (tree & ((1 << hp) - 1)) as u32;
            tree >>= hp;
        }
        node
    }

    /// Materializes one subtree: `levels[0]` holds the `2^h'` WOTS+ leaf
    /// public keys, `levels[h']` the root.
    fn tree_levels(&self, sk_seed: &[u8], layer: u32, tree: u64) -> Vec<Vec<u8>> {
        let n = self.params.n;
        let hp = self.params.tree_height;
        let leaf_count = 1usize << hp;

        let leaves: Vec<Vec<u8>> = (0..leaf_count)
            .into_par_iter()
            .map(|keypair| {
                let wots = WotsPlus::new(self.hasher);
                let mut adrs = Adrs::from(AdrsType::WotsHash);
                adrs.set_layer_addr(layer);
                adrs.set_tree_addr(tree);
                adrs.set_keypair_addr(keypair as u32);
                wots.pk_gen(sk_seed, adrs)
            })
            .collect();

        let mut levels = Vec::with_capacity(hp + 1);
        let mut bottom = vec![0u8; leaf_count * n];
        for (i, leaf) in leaves.iter().enumerate() {
            bottom[i * n..(i + 1) * n].copy_from_slice(leaf);
        }
        levels.push(bottom);

        let mut node_adrs = Adrs::from(AdrsType::Tree);
        node_adrs.set_layer_addr(layer);
        node_adrs.set_tree_addr(tree);
        for z in 0..hp {
            let prev = &levels[z];
            let width = leaf_count >> (z + 1);
            let mut next = vec![0u8; width * n];
            for j in 0..width {
                node_adrs.set_tree_height(z as u32 + 1);
                node_adrs.set_tree_index(j as u32);
                self.hasher.thash(
                    &mut next[j * n..(j + 1) * n],
                    &prev[2 * j * n..(2 * j + 2) * n],
                    2,
                    &node_adrs,
                );
            }
            levels.push(next);
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterSetId;
    use rand::rngs::OsRng;
    use rand::RngCore;

    #[test]
    fn signature_authenticates_back_to_the_root() {
        for id in [ParameterSetId::Shake128f, ParameterSetId::Sha2_128f] {
            let params = id.params();
            let mut pub_seed = vec![0u8; params.n];
            let mut sk_seed = vec![0u8; params.n];
            let mut msg = vec![0u8; params.n];
            OsRng.fill_bytes(&mut pub_seed);
            OsRng.fill_bytes(&mut sk_seed);
            OsRng.fill_bytes(&mut msg);

            let hasher = SlhHasher::new(params, &pub_seed);
            let ht = Hypertree::new(&hasher);

            let root = ht.root(&sk_seed);
            let idx_tree = 0x2a5;
            let idx_leaf = 3;
            let sig = ht.sign(&msg, &sk_seed, idx_tree, idx_leaf);
            assert_eq!(
                sig.len(),
                params.layers * params.xmss_bytes(),
                "{}",
                params.name
            );
            assert_eq!(ht.root_from_sig(&sig, &msg, idx_tree, idx_leaf), root);

            // A different leaf position must not authenticate.
            assert_ne!(ht.root_from_sig(&sig, &msg, idx_tree, idx_leaf ^ 1), root);
        }
    }

    #[test]
    fn tampered_auth_path_breaks_authentication() {
        let params = ParameterSetId::Shake128f.params();
        let pub_seed = [5u8; 16];
        let sk_seed = [6u8; 16];
        let msg = [7u8; 16];

        let hasher = SlhHasher::new(params, &pub_seed);
        let ht = Hypertree::new(&hasher);
        let root = ht.root(&sk_seed);
        let sig = ht.sign(&msg, &sk_seed, 1, 0);

        let mut forged = sig;
        let last = forged.len() - 1;
        forged[last] ^= 1;
        assert_ne!(ht.root_from_sig(&forged, &msg, 1, 0), root);
    }
}
