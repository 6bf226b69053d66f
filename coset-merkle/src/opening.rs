use crate::{Node, NodeHasher};

/// 兄弟节点相对于当前路径节点的位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// 审计路径上的一层：兄弟摘要及其位置。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathElement {
    pub sibling: Vec<u8>,
    pub side: Side,
}

/// 单个叶子到根的审计路径（自底向上）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Opening {
    root: Vec<u8>,
    index: usize,
    path: Vec<PathElement>,
}

impl Opening {
    /// 基于树的根节点和叶子下标构造 opening。
    ///
    /// 落单节点以自身为右侧兄弟。下标超出叶子层时返回 `None`。
    pub(crate) fn new(root: &Node, index: usize) -> Option<Self> {
        let levels = root.levels();
        let mut path = Vec::with_capacity(levels.len().saturating_sub(1));
        let mut position = index;

        for level in levels.iter().skip(1).rev() {
            let node = level.get(position)?;

            let element = if position % 2 == 1 {
                PathElement {
                    sibling: level[position - 1].hash.clone(),
                    side: Side::Left,
                }
            } else {
                let sibling = level.get(position + 1).unwrap_or(node);
                PathElement {
                    sibling: sibling.hash.clone(),
                    side: Side::Right,
                }
            };

            path.push(element);
            position /= 2;
        }

        Some(Self {
            root: root.hash.clone(),
            index,
            path,
        })
    }

    /// 返回 opening 对应的根摘要。
    #[must_use]
    pub fn root(&self) -> &[u8] {
        &self.root
    }

    /// 叶子在构建顺序中的下标。
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn path(&self) -> &[PathElement] {
        &self.path
    }

    /// 沿路径由叶子摘要重算根摘要并与 opening 的根比较。
    ///
    /// 合并失败视为校验不通过。
    #[must_use]
    pub fn verify<H: NodeHasher>(&self, leaf_hash: &[u8]) -> bool {
        let mut current = leaf_hash.to_vec();

        for element in &self.path {
            let combined = match element.side {
                Side::Left => H::combine(&element.sibling, &current),
                Side::Right => H::combine(&current, &element.sibling),
            };

            match combined {
                Ok(hash) => current = hash,
                Err(_) => return false,
            }
        }

        current == self.root
    }
}
