use crate::NodeHasher;

/// 树中的一个已提交负载及其缓存摘要。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<T> {
    pub payload: T,
    pub hash: Vec<u8>,
}

/// Merkle 树节点。
///
/// 无子节点即为叶子节点。落单节点与自身合并时只挂在 `left`，`right` 为空。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub hash: Vec<u8>,
    pub left: Option<Box<Node>>,
    pub right: Option<Box<Node>>,
}

impl Node {
    /// 创建叶子节点。
    #[must_use]
    pub fn leaf(hash: Vec<u8>) -> Self {
        Self {
            hash,
            left: None,
            right: None,
        }
    }

    /// 由一对子节点构造父节点；`right` 缺失时左节点与自身合并。
    pub(crate) fn parent<H: NodeHasher>(
        left: Node,
        right: Option<Node>,
    ) -> Result<Self, H::Error> {
        let hash = match &right {
            Some(right) => H::combine(&left.hash, &right.hash)?,
            None => H::combine(&left.hash, &left.hash)?,
        };

        Ok(Self {
            hash,
            left: Some(Box::new(left)),
            right: right.map(Box::new),
        })
    }

    /// 判断是否为叶子节点。
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// 逐层自底向上构建，返回唯一的顶层节点。
    ///
    /// 每层相邻节点两两合并，奇数层的末尾节点与自身合并；
    /// 叶子层至少合并一次，因此单叶子树的根为 `combine(leaf, leaf)`。
    /// `level` 为空时返回 `None`。
    pub(crate) fn build<H: NodeHasher>(
        mut level: Vec<Node>,
    ) -> Result<Option<Self>, H::Error> {
        if level.is_empty() {
            return Ok(None);
        }

        loop {
            let mut parents = Vec::with_capacity(level.len().div_ceil(2));
            let mut nodes = level.into_iter();

            while let Some(left) = nodes.next() {
                parents.push(Self::parent::<H>(left, nodes.next())?);
            }

            if parents.len() == 1 {
                return Ok(parents.pop());
            }
            level = parents;
        }
    }

    /// 依次返回左、右子节点。
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.left.as_deref().into_iter().chain(self.right.as_deref())
    }

    /// 按层（自顶向下、从左到右）收集节点引用。
    pub(crate) fn levels(&self) -> Vec<Vec<&Node>> {
        let mut levels = Vec::new();
        let mut current = vec![self];

        while !current.is_empty() {
            let next: Vec<&Node> =
                current.iter().copied().flat_map(Node::children).collect();
            levels.push(current);
            current = next;
        }

        levels
    }
}
