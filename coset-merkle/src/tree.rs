use core::fmt;
use core::marker::PhantomData;

use tracing::debug;

use crate::{Error, Leaf, Node, NodeHasher, Opening, Payload};

/// 基于负载列表构建的二叉 Merkle 树。
///
/// `root` 与 `merkle_root` 均为快照：只在构建或重建时刷新，
/// 直接改写它们会被 [`Tree::verify_tree`] 检出。
pub struct Tree<T, H> {
    pub root: Node,
    pub merkle_root: Vec<u8>,
    leaves: Vec<Leaf<T>>,
    hasher: PhantomData<fn() -> H>,
}

impl<T: fmt::Debug, H> fmt::Debug for Tree<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("merkle_root", &self.merkle_root)
            .field("leaves", &self.leaves)
            .finish()
    }
}

impl<T: Clone, H> Clone for Tree<T, H> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            merkle_root: self.merkle_root.clone(),
            leaves: self.leaves.clone(),
            hasher: PhantomData,
        }
    }
}

impl<T, H> Tree<T, H>
where
    T: Payload,
    H: NodeHasher,
{
    /// 由负载列表构建树。
    ///
    /// # Errors
    ///
    /// 列表为空、任一负载哈希失败或节点合并失败时返回错误，不产生半成品。
    pub fn new(payloads: Vec<T>) -> Result<Self, Error<T::Error, H::Error>> {
        if payloads.is_empty() {
            return Err(Error::EmptyPayloads);
        }

        let leaves = payloads
            .into_iter()
            .map(|payload| {
                payload.compute_hash().map(|hash| Leaf { payload, hash })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::<_, H::Error>::Payload)?;

        let root =
            build_root::<H, T::Error>(leaves.iter().map(|leaf| &leaf.hash))?;
        debug!(
            leaves = leaves.len(),
            root = %hex::encode(&root.hash),
            "merkle tree built"
        );

        Ok(Self {
            merkle_root: root.hash.clone(),
            root,
            leaves,
            hasher: PhantomData,
        })
    }

    /// 重新计算现有负载的摘要并重建整棵树。
    ///
    /// # Errors
    ///
    /// 任一负载哈希或节点合并失败时返回错误，此时树保持原状。
    pub fn rebuild_tree(&mut self) -> Result<(), Error<T::Error, H::Error>> {
        let hashes = self
            .leaves
            .iter()
            .map(|leaf| leaf.payload.compute_hash())
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::<_, H::Error>::Payload)?;

        let root = build_root::<H, T::Error>(hashes.iter())?;

        for (leaf, hash) in self.leaves.iter_mut().zip(hashes) {
            leaf.hash = hash;
        }
        self.merkle_root = root.hash.clone();
        self.root = root;
        debug!(
            leaves = self.leaves.len(),
            root = %hex::encode(&self.merkle_root),
            "merkle tree rebuilt"
        );

        Ok(())
    }

    /// 以新的负载列表整体替换叶子并重建。
    ///
    /// # Errors
    ///
    /// 失败条件同 [`Tree::new`]；失败时树保持原状。
    pub fn rebuild_tree_using(
        &mut self,
        payloads: Vec<T>,
    ) -> Result<(), Error<T::Error, H::Error>> {
        *self = Self::new(payloads)?;
        Ok(())
    }
}

impl<T, H: NodeHasher> Tree<T, H> {
    /// 仅依据当前叶子摘要重新计算根，并与 `merkle_root` 和 `root.hash` 比较。
    ///
    /// 合并失败视为校验不通过。
    #[must_use]
    pub fn verify_tree(&self) -> bool {
        let expected = match build_root::<H, ()>(
            self.leaves.iter().map(|leaf| &leaf.hash),
        ) {
            Ok(root) => root.hash,
            Err(_) => return false,
        };

        let consistent =
            expected == self.merkle_root && expected == self.root.hash;
        if !consistent {
            debug!(leaves = self.leaves.len(), "merkle root mismatch");
        }

        consistent
    }

    /// 为下标 `index` 处的叶子生成审计路径；越界时返回 `None`。
    #[must_use]
    pub fn opening(&self, index: usize) -> Option<Opening> {
        if index >= self.leaves.len() {
            return None;
        }
        Opening::new(&self.root, index)
    }
}

impl<T, H> Tree<T, H> {
    /// 判断是否有叶子携带与 `payload` 摘要逐字节相等的摘要。
    ///
    /// `payload` 自身哈希失败时返回 `false`。
    #[must_use]
    pub fn verify_content<P: Payload>(&self, payload: &P) -> bool {
        payload
            .compute_hash()
            .is_ok_and(|hash| self.leaves.iter().any(|leaf| leaf.hash == hash))
    }

    /// 按构建顺序返回叶子。
    #[must_use]
    pub fn leaves(&self) -> &[Leaf<T>] {
        &self.leaves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// 构建成功的树至少有一个叶子，因此恒为 `false`。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

/// 见 [`Tree::verify_tree`]。
#[must_use]
pub fn verify_tree<T, H: NodeHasher>(tree: &Tree<T, H>) -> bool {
    tree.verify_tree()
}

fn build_root<'a, H, P>(
    hashes: impl Iterator<Item = &'a Vec<u8>>,
) -> Result<Node, Error<P, H::Error>>
where
    H: NodeHasher,
{
    let level = hashes.map(|hash| Node::leaf(hash.clone())).collect();

    match Node::build::<H>(level) {
        Ok(Some(root)) => Ok(root),
        Ok(None) => Err(Error::EmptyPayloads),
        Err(err) => Err(Error::Hasher(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct Shape;

    impl NodeHasher for Shape {
        type Error = Infallible;

        fn combine(left: &[u8], right: &[u8]) -> Result<Vec<u8>, Infallible> {
            Ok(format!(
                "({},{})",
                String::from_utf8_lossy(left),
                String::from_utf8_lossy(right)
            )
            .into_bytes())
        }
    }

    /// 空串视为无法哈希的负载。
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Word(&'static str);

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Unhashable;

    impl Payload for Word {
        type Error = Unhashable;

        fn compute_hash(&self) -> Result<Vec<u8>, Unhashable> {
            if self.0.is_empty() {
                return Err(Unhashable);
            }
            Ok(self.0.as_bytes().to_vec())
        }
    }

    type ShapeTree = Tree<Word, Shape>;

    fn words(list: &[&'static str]) -> Vec<Word> {
        list.iter().copied().map(Word).collect()
    }

    fn shape_of(tree: &ShapeTree) -> String {
        String::from_utf8(tree.merkle_root.clone()).expect("ascii")
    }

    #[test]
    fn build_sets_both_roots() {
        let tree = ShapeTree::new(words(&["a", "b", "c"])).expect("valid");

        assert_eq!(shape_of(&tree), "((a,b),(c,c))");
        assert_eq!(tree.root.hash, tree.merkle_root);
        assert_eq!(tree.len(), 3);
        assert!(!tree.is_empty());
        assert_eq!(tree.leaves()[2].payload, Word("c"));
        assert_eq!(tree.leaves()[2].hash, b"c");
    }

    #[test]
    fn empty_payloads_rejected() {
        assert_eq!(
            ShapeTree::new(Vec::new()).map(|t| t.merkle_root),
            Err(Error::EmptyPayloads)
        );
    }

    #[test]
    fn payload_error_propagates() {
        assert_eq!(
            ShapeTree::new(words(&["a", "", "c"])).map(|t| t.merkle_root),
            Err(Error::Payload(Unhashable))
        );
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut tree = ShapeTree::new(words(&["a", "b"])).expect("valid");
        let before = tree.merkle_root.clone();

        tree.rebuild_tree().expect("same payloads");
        assert_eq!(tree.merkle_root, before);
        assert!(tree.verify_tree());
    }

    #[test]
    fn rebuild_refreshes_tampered_leaf_digest() {
        let mut tree = ShapeTree::new(words(&["a", "b"])).expect("valid");
        tree.leaves[0].hash = b"x".to_vec();
        assert!(!tree.verify_tree());

        tree.rebuild_tree().expect("same payloads");
        assert_eq!(tree.leaves()[0].hash, b"a");
        assert!(tree.verify_tree());
    }

    #[test]
    fn rebuild_using_replaces_leaves() {
        let mut tree = ShapeTree::new(words(&["a", "b"])).expect("valid");

        tree.rebuild_tree_using(words(&["x", "y", "z", "w"]))
            .expect("valid");
        assert_eq!(shape_of(&tree), "((x,y),(z,w))");
        assert!(tree.verify_content(&Word("w")));
        assert!(!tree.verify_content(&Word("a")));
    }

    #[test]
    fn failed_rebuild_leaves_tree_untouched() {
        let mut tree = ShapeTree::new(words(&["a", "b"])).expect("valid");
        let before = tree.clone();

        assert_eq!(
            tree.rebuild_tree_using(words(&["x", ""])),
            Err(Error::Payload(Unhashable))
        );
        assert_eq!(
            tree.rebuild_tree_using(Vec::new()),
            Err(Error::EmptyPayloads)
        );
        assert_eq!(tree.merkle_root, before.merkle_root);
        assert_eq!(tree.root, before.root);
        assert_eq!(tree.leaves(), before.leaves());
    }

    #[test]
    fn tampered_roots_fail_verification() {
        let tree = ShapeTree::new(words(&["a", "b", "c", "d"])).expect("valid");
        assert!(verify_tree(&tree));

        let mut merkle_tampered = tree.clone();
        merkle_tampered.merkle_root = vec![1];
        assert!(!merkle_tampered.verify_tree());

        let mut node_tampered = tree.clone();
        node_tampered.root.hash = vec![1];
        assert!(!node_tampered.verify_tree());
    }

    #[test]
    fn verify_content_by_digest() {
        let tree = ShapeTree::new(words(&["a", "b", "c"])).expect("valid");

        assert!(tree.verify_content(&Word("b")));
        assert!(!tree.verify_content(&Word("q")));
        assert!(!tree.verify_content(&Word("")));
        assert!(tree.verify_content(&&Word("c")));
    }

    #[test]
    fn opening_bounds() {
        let tree = ShapeTree::new(words(&["a", "b", "c"])).expect("valid");

        assert!(tree.opening(2).is_some());
        assert!(tree.opening(3).is_none());
    }
}
