#![deny(clippy::pedantic)]

//! 叶子与内部节点均以默认参数的 Poseidon 哈希的二叉 Merkle 树。

use coset_poseidon::Poseidon;

pub use coset_merkle::{
    verify_tree, Leaf, Node, NodeHasher, Opening, PathElement, Payload, Side,
};
pub use coset_poseidon::Error;

/// Poseidon-Merkle 二叉树类型别名。
pub type Tree<T> = coset_merkle::Tree<T, PoseidonNodeHasher>;

/// 构建、重建过程中的错误类型别名。
pub type TreeError<T> = coset_merkle::Error<<T as Payload>::Error, Error>;

/// 将字节串写入一个新的默认参数 Poseidon 实例并取 32 字节摘要。
///
/// # Errors
///
/// 默认参数损坏时返回 [`Error`]。
pub fn hash_bytes(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    let mut poseidon = Poseidon::new();
    poseidon.write(bytes)?;
    poseidon.sum(&[])
}

/// 内部节点合并：`hash_bytes(left || right)`，与叶子使用同一原语和参数。
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseidonNodeHasher;

impl NodeHasher for PoseidonNodeHasher {
    type Error = Error;

    fn combine(left: &[u8], right: &[u8]) -> Result<Vec<u8>, Error> {
        let mut joined = Vec::with_capacity(left.len() + right.len());
        joined.extend_from_slice(left);
        joined.extend_from_slice(right);

        hash_bytes(&joined)
    }
}

/// 以字节内容为摘要来源的树条目。
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct Item<T> {
    pub data: T,
}

impl<T> Item<T> {
    #[must_use]
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: AsRef<[u8]>> Payload for Item<T> {
    type Error = Error;

    fn compute_hash(&self) -> Result<Vec<u8>, Error> {
        hash_bytes(self.data.as_ref())
    }
}

/// 以 [`PoseidonNodeHasher`] 校验 opening。
#[must_use]
pub fn verify_opening(opening: &Opening, leaf_hash: &[u8]) -> bool {
    opening.verify::<PoseidonNodeHasher>(leaf_hash)
}
