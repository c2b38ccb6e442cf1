//! Hash addresses.
//!
//! Every hash call in the scheme is tagged with a 32-byte address describing
//! where in the overall structure the value being computed lives: hypertree
//! layer, tree index within the layer, the role of the hash (the type word),
//! and the type-specific key-pair/chain/height/index fields. The address is a
//! plain stack value, copied freely and rebuilt per call; it is what makes
//! the domain separation of the derived hash functions injective.

use crate::utils::{set_u32_at, set_u64_at};

/// Full address size.
pub(crate) const ADRS_BYTES: usize = 32;

/// Compressed address size used by the SHA2 family.
pub(crate) const COMPRESSED_ADRS_BYTES: usize = 22;

// Word offsets of the uncompressed layout: layer ‖ tree ‖ type ‖ three
// type-specific words. The tree field is twelve bytes; the four most
// significant are always zero, so it is written as a u64 at offset 8.
const OFFSET_LAYER: usize = 0;
const OFFSET_TREE: usize = 8;
const OFFSET_TYPE: usize = 16;
const OFFSET_KP_ADDR: usize = 20;
const OFFSET_CHAIN_ADDR: usize = 24;
const OFFSET_HASH_ADDR: usize = 28;
const OFFSET_TREE_HGT: usize = 24;
const OFFSET_TREE_INDEX: usize = 28;

/// The seven address types.
#[derive(Copy, Clone, Debug)]
#[repr(u32)]
pub(crate) enum AdrsType {
    /// Hashing along a WOTS+ chain.
    WotsHash = 0,
    /// Compressing a WOTS+ public key.
    WotsPk = 1,
    /// Hypertree Merkle tree node.
    Tree = 2,
    /// FORS Merkle tree node.
    ForsTree = 3,
    /// Compressing the FORS tree roots.
    ForsRoots = 4,
    /// Deriving a WOTS+ chain-start secret value.
    WotsPrf = 5,
    /// Deriving a FORS secret leaf value.
    ForsPrf = 6,
}

/// A 32-byte hash address in the uncompressed layout.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct Adrs([u8; ADRS_BYTES]);

impl AsRef<[u8]> for Adrs {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<AdrsType> for Adrs {
    fn from(adrs_type: AdrsType) -> Self {
        let mut adrs = Self([0; ADRS_BYTES]);
        adrs.set_type(adrs_type);
        adrs
    }
}

impl Adrs {
    /// Specify which level of the hypertree (the "layer") we're working on.
    pub fn set_layer_addr(&mut self, layer: u32) {
        set_u32_at(self.0.as_mut(), layer, OFFSET_LAYER);
    }

    /// Specify which Merkle tree within the layer (the "tree address") we're
    /// working on.
    pub fn set_tree_addr(&mut self, tree: u64) {
        set_u64_at(self.0.as_mut(), tree, OFFSET_TREE);
    }

    /// Specify what hash will be computed with this address, so that
    /// unrelated hashes never share an address. Resets the three
    /// type-specific words, matching the FIPS `setTypeAndClear` semantics:
    /// the caller sets whichever of them the new type needs.
    pub fn set_type(&mut self, adrs_type: AdrsType) {
        set_u32_at(self.0.as_mut(), adrs_type as u32, OFFSET_TYPE);
        self.0[OFFSET_KP_ADDR..].fill(0);
    }

    /// Specify which Merkle leaf we're working on; that is, which OTS
    /// key pair we're talking about.
    pub fn set_keypair_addr(&mut self, keypair: u32) {
        set_u32_at(self.0.as_mut(), keypair, OFFSET_KP_ADDR);
    }

    pub fn keypair_addr(&self) -> u32 {
        let b = &self.0;
        u32::from_be_bytes([
            b[OFFSET_KP_ADDR],
            b[OFFSET_KP_ADDR + 1],
            b[OFFSET_KP_ADDR + 2],
            b[OFFSET_KP_ADDR + 3],
        ])
    }

    /// Specify which chain within the OTS key pair we're working with.
    pub fn set_chain_addr(&mut self, chain: u32) {
        set_u32_at(self.0.as_mut(), chain, OFFSET_CHAIN_ADDR);
    }

    /// Specify the position along the chain.
    pub fn set_hash_addr(&mut self, hash: u32) {
        set_u32_at(self.0.as_mut(), hash, OFFSET_HASH_ADDR);
    }

    /// Specify the height of the node in the Merkle/FORS tree we are in.
    pub fn set_tree_height(&mut self, tree_height: u32) {
        set_u32_at(self.0.as_mut(), tree_height, OFFSET_TREE_HGT);
    }

    /// Specify the distance of the node from the left edge of the tree.
    pub fn set_tree_index(&mut self, tree_index: u32) {
        set_u32_at(self.0.as_mut(), tree_index, OFFSET_TREE_INDEX);
    }

    /// The 22-byte compressed form the SHA2 family hashes instead of the
    /// full address: one byte of layer, eight of tree, one of type, and the
    /// three type-specific words.
    pub fn compressed(&self) -> [u8; COMPRESSED_ADRS_BYTES] {
        let mut out = [0u8; COMPRESSED_ADRS_BYTES];
        out[0] = self.0[OFFSET_LAYER + 3];
        out[1..9].copy_from_slice(&self.0[OFFSET_TREE..OFFSET_TREE + 8]);
        out[9] = self.0[OFFSET_TYPE + 3];
        out[10..].copy_from_slice(&self.0[OFFSET_KP_ADDR..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_layout_is_fixed() {
        let mut adrs = Adrs::from(AdrsType::ForsTree);
        adrs.set_layer_addr(5);
        adrs.set_tree_addr(0x0102030405060708);
        adrs.set_keypair_addr(9);
        adrs.set_tree_height(2);
        adrs.set_tree_index(11);

        let bytes = adrs.as_ref();
        assert_eq!(&bytes[0..4], &[0, 0, 0, 5]);
        assert_eq!(&bytes[4..8], &[0; 4]);
        assert_eq!(&bytes[8..16], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&bytes[16..20], &[0, 0, 0, 3]);
        assert_eq!(&bytes[20..24], &[0, 0, 0, 9]);
        assert_eq!(&bytes[24..28], &[0, 0, 0, 2]);
        assert_eq!(&bytes[28..32], &[0, 0, 0, 11]);
    }

    #[test]
    fn set_type_resets_the_trailing_words() {
        let mut adrs = Adrs::from(AdrsType::WotsHash);
        adrs.set_keypair_addr(7);
        adrs.set_chain_addr(3);
        adrs.set_hash_addr(14);
        adrs.set_type(AdrsType::WotsPrf);
        assert_eq!(&adrs.as_ref()[20..32], &[0; 12]);
        assert_eq!(adrs.keypair_addr(), 0);
    }

    #[test]
    fn compressed_form_drops_the_padding() {
        let mut adrs = Adrs::from(AdrsType::WotsHash);
        adrs.set_layer_addr(1);
        adrs.set_tree_addr(2);
        adrs.set_keypair_addr(3);
        adrs.set_chain_addr(4);
        adrs.set_hash_addr(6);

        let c = adrs.compressed();
        assert_eq!(c.len(), COMPRESSED_ADRS_BYTES);
        assert_eq!(c[0], 1);
        assert_eq!(c[1..9], [0, 0, 0, 0, 0, 0, 0, 2]);
        assert_eq!(c[9], 0);
        assert_eq!(&c[10..14], &[0, 0, 0, 3]);
        assert_eq!(&c[14..18], &[0, 0, 0, 4]);
        assert_eq!(&c[18..22], &[0, 0, 0, 6]);
    }
}
