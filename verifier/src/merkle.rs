//! Merkle root reconstruction over an ordered authentication path.
//!
//! Pairing is positional, driven by each node's `is_left` flag: the flag
//! says on which side the *sibling* sits. There is no smaller-hash-first
//! convention here; implementations that sort hash pairs reconstruct the
//! wrong root.

use sha2::{Digest as _, Sha256};

/// SHA-256 digest size; every node in the tree is exactly this wide.
pub const HASH_LEN: usize = 32;

/// One level of the authentication path, ordered leaf-to-root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathNode {
    pub sibling_hash: [u8; HASH_LEN],
    /// True when the sibling is the left child at this level.
    pub is_left: bool,
}

/// Fold the path over `leaf_hash` and return the resulting root.
///
/// An empty path returns the leaf itself, so a single-leaf tree verifies
/// iff `leaf_hash == root`.
pub fn reconstruct_root(leaf_hash: [u8; HASH_LEN], path: &[PathNode]) -> [u8; HASH_LEN] {
    path.iter().fold(leaf_hash, |current, node| {
        let mut hasher = Sha256::new();
        if node.is_left {
            hasher.update(node.sibling_hash);
            hasher.update(current);
        } else {
            hasher.update(current);
            hasher.update(node.sibling_hash);
        }
        hasher.finalize().into()
    })
}

#[cfg(test)]
mod tests {
    use {super::*, crate::codec};

    fn h(data: &[u8]) -> [u8; HASH_LEN] {
        codec::sha256(data)
    }

    fn two_level_fixture() -> ([u8; HASH_LEN], Vec<PathNode>, [u8; HASH_LEN]) {
        let leaf = h(b"leaf");
        let path = vec![
            PathNode {
                sibling_hash: h(b"sibling-0"),
                is_left: false,
            },
            PathNode {
                sibling_hash: h(b"sibling-1"),
                is_left: true,
            },
        ];
        let root = reconstruct_root(leaf, &path);
        (leaf, path, root)
    }

    #[test]
    fn empty_path_returns_the_leaf() {
        let leaf = h(b"only");
        assert_eq!(reconstruct_root(leaf, &[]), leaf);
    }

    #[test]
    fn pairing_follows_the_position_flag() {
        let leaf = h(b"leaf");
        let sibling = h(b"sibling");

        let right = reconstruct_root(
            leaf,
            &[PathNode {
                sibling_hash: sibling,
                is_left: false,
            }],
        );
        let left = reconstruct_root(
            leaf,
            &[PathNode {
                sibling_hash: sibling,
                is_left: true,
            }],
        );

        // H(leaf || sibling) on one side, H(sibling || leaf) on the other.
        let expected_right = codec::sha256(&[leaf, sibling].concat());
        let expected_left = codec::sha256(&[sibling, leaf].concat());
        assert_eq!(right, expected_right);
        assert_eq!(left, expected_left);
        assert_ne!(left, right);
    }

    #[test]
    fn flipping_any_position_flag_changes_the_root() {
        let (leaf, path, root) = two_level_fixture();
        for i in 0..path.len() {
            let mut tampered = path.clone();
            tampered[i].is_left = !tampered[i].is_left;
            assert_ne!(reconstruct_root(leaf, &tampered), root);
        }
    }

    #[test]
    fn flipping_any_sibling_bit_changes_the_root() {
        let (leaf, path, root) = two_level_fixture();
        for i in 0..path.len() {
            for byte in 0..HASH_LEN {
                for bit in 0..8 {
                    let mut tampered = path.clone();
                    tampered[i].sibling_hash[byte] ^= 1 << bit;
                    assert_ne!(
                        reconstruct_root(leaf, &tampered),
                        root,
                        "path {i} byte {byte} bit {bit} must change the root"
                    );
                }
            }
        }
    }

    #[test]
    fn reconstruction_is_deterministic() {
        let (leaf, path, root) = two_level_fixture();
        assert_eq!(reconstruct_root(leaf, &path), root);
    }
}
