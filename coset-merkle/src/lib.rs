#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! 二叉 Merkle 累加器。
//!
//! 叶子摘要由负载自身的 [`Payload::compute_hash`] 给出，
//! 内部节点摘要由可替换的 [`NodeHasher`] 两两合并得到。

mod error;
mod node;
mod opening;
mod tree;

pub use error::Error;
pub use node::*;
pub use opening::*;
pub use tree::*;

/// 能够计算自身摘要的负载。
///
/// 摘要必须是负载内容的纯函数，与其在树中的位置无关。
pub trait Payload {
    type Error;

    /// 计算负载摘要。
    ///
    /// # Errors
    ///
    /// 负载无法被哈希时返回实现方定义的错误。
    fn compute_hash(&self) -> Result<Vec<u8>, Self::Error>;
}

impl<P: Payload + ?Sized> Payload for &P {
    type Error = P::Error;

    fn compute_hash(&self) -> Result<Vec<u8>, Self::Error> {
        (**self).compute_hash()
    }
}

/// 内部节点合并函数：由左右子节点摘要得到父节点摘要。
pub trait NodeHasher {
    type Error;

    /// 合并两个子节点摘要。
    ///
    /// # Errors
    ///
    /// 底层哈希原语失败时返回实现方定义的错误。
    fn combine(left: &[u8], right: &[u8]) -> Result<Vec<u8>, Self::Error>;
}
