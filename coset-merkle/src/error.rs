/// Merkle 树构建与重建过程中的错误。
///
/// `P` 为负载哈希错误，`H` 为节点合并错误，二者均原样向上传递。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error<P, H> {
    /// 负载列表为空。
    #[error("cannot build a merkle tree without payloads")]
    EmptyPayloads,

    #[error("payload hashing failed: {0}")]
    Payload(P),

    #[error("node hashing failed: {0}")]
    Hasher(H),
}
