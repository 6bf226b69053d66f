use bulletproofs::ProofError;

/// 承诺与范围证明适配层的错误。
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 金额与承诺数量不一致。
    #[error("got {amounts} amounts for {commitments} commitments")]
    LengthMismatch { amounts: usize, commitments: usize },

    /// 聚合数量须为 1 到 16 之间的 2 的幂。
    #[error("cannot aggregate {count} values, expected a power of two up to {max}")]
    InvalidAggregation { count: usize, max: usize },

    /// 按金额与盲化因子重算的承诺与给定承诺不符。
    #[error("commitment {index} does not open to the given amount")]
    OpeningMismatch { index: usize },

    /// 证明未携带承诺，无法校验。
    #[error("proof carries no commitments")]
    MissingCommitments,

    #[error("encoded {what} of {found} exceeds the limit of {limit}")]
    TooLarge {
        what: &'static str,
        found: usize,
        limit: usize,
    },

    #[error("bulletproofs failure: {0:?}")]
    Proof(ProofError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
