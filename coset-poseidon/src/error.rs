// 模块说明：本文件实现 Poseidon 组件（src/error.rs）。

//

/// Poseidon 参数构造、整数转换与哈希过程中的错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 状态向量已写满（槽位 0 为域分离常量保留）。
    #[error("maximum width reached: the state already holds {width} elements")]
    WidthExceeded { width: usize },

    /// 轮密钥表不足以覆盖配置的轮数。
    #[error(
        "round key table too short: {required} keys required, {available} available"
    )]
    RoundKeysExhausted { required: usize, available: usize },

    /// MDS 矩阵不是 `width x width` 的方阵。
    #[error("MDS matrix must be {width}x{width}, found {rows} rows")]
    InvalidMdsMatrix { width: usize, rows: usize },

    #[error("unsupported permutation width {0}, expected 2..=64")]
    InvalidWidth(usize),

    /// 轮次计划所需的轮密钥总数超出 `usize`。
    #[error("round schedule for width {width} overflows the round key count")]
    RoundsOverflow { width: usize },

    /// 整数无法放入标量的前两个 32 位肢。
    #[error("value {0} does not fit into two 32-bit scalar limbs")]
    Conversion(u128),

    /// 生成 MDS 矩阵时遇到零元，没有乘法逆元。
    #[error("no multiplicative inverse for MDS entry ({row}, {column})")]
    NonInvertible { row: usize, column: usize },
}
