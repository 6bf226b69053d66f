// 模块说明：本文件实现 Poseidon 组件（src/params.rs）。

//

use curve25519_dalek::Scalar;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::hades::{derive_round_keys, generate_mds_matrix, MdsMatrix};
use crate::Error;

/// 默认置换宽度（状态向量长度）。
pub const WIDTH: usize = 5;

/// 默认前半段全轮数。
pub const FULL_ROUNDS_BEGINNING: usize = 4;

/// 默认部分轮数。
pub const PARTIAL_ROUNDS: usize = 59;

/// 默认后半段全轮数。
pub const FULL_ROUNDS_END: usize = 4;

/// 域分离常量为 `u64`，宽度上限由此决定。
pub(crate) const MAX_WIDTH: usize = 64;

static DEFAULT_PARAMETERS: Lazy<Parameters> = Lazy::new(|| {
    Parameters::generate(
        WIDTH,
        FULL_ROUNDS_BEGINNING,
        PARTIAL_ROUNDS,
        FULL_ROUNDS_END,
    )
    .unwrap_or_else(|err| unreachable!("default parameters are valid: {err}"))
});

/// 返回进程内共享的默认参数集。
pub fn default_parameters() -> &'static Parameters {
    &DEFAULT_PARAMETERS
}

/// Poseidon 置换参数：轮数、平铺的轮密钥表与 MDS 矩阵。
///
/// 构造后不可变，可在多个哈希会话之间只读共享。
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawParameters")
)]
pub struct Parameters {
    width: usize,
    full_rounds_beginning: usize,
    partial_rounds: usize,
    full_rounds_end: usize,
    round_keys: Vec<Scalar>,
    mds_matrix: MdsMatrix,
}

/// 反序列化时先读入原始字段，再经 [`Parameters::new`] 校验。
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawParameters {
    width: usize,
    full_rounds_beginning: usize,
    partial_rounds: usize,
    full_rounds_end: usize,
    round_keys: Vec<Scalar>,
    mds_matrix: MdsMatrix,
}

#[cfg(feature = "serde")]
impl TryFrom<RawParameters> for Parameters {
    type Error = Error;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        Self::new(
            raw.width,
            raw.full_rounds_beginning,
            raw.partial_rounds,
            raw.full_rounds_end,
            raw.round_keys,
            raw.mds_matrix,
        )
    }
}

impl Default for Parameters {
    fn default() -> Self {
        default_parameters().clone()
    }
}

impl Parameters {
    /// 由给定常量构造参数集，并校验轮密钥数量与矩阵形状。
    pub fn new(
        width: usize,
        full_rounds_beginning: usize,
        partial_rounds: usize,
        full_rounds_end: usize,
        round_keys: Vec<Scalar>,
        mds_matrix: MdsMatrix,
    ) -> Result<Self, Error> {
        let params = Self {
            width,
            full_rounds_beginning,
            partial_rounds,
            full_rounds_end,
            round_keys,
            mds_matrix,
        };
        params.validate()?;

        Ok(params)
    }

    /// 按宽度与轮数生成完整参数集：派生轮密钥并以 Cauchy 构造生成矩阵。
    pub fn generate(
        width: usize,
        full_rounds_beginning: usize,
        partial_rounds: usize,
        full_rounds_end: usize,
    ) -> Result<Self, Error> {
        check_width(width)?;

        let required = round_key_count(
            width,
            full_rounds_beginning,
            partial_rounds,
            full_rounds_end,
        )?;
        let round_keys = derive_round_keys(required);
        let mds_matrix = generate_mds_matrix(width)?;

        debug!(width, round_keys = required, "generated poseidon parameters");

        Self::new(
            width,
            full_rounds_beginning,
            partial_rounds,
            full_rounds_end,
            round_keys,
            mds_matrix,
        )
    }

    /// 校验参数集：宽度范围、轮密钥覆盖全部轮次、矩阵为方阵。
    pub fn validate(&self) -> Result<(), Error> {
        check_width(self.width)?;

        let required = self.required_round_keys()?;
        if self.round_keys.len() < required {
            return Err(Error::RoundKeysExhausted {
                required,
                available: self.round_keys.len(),
            });
        }

        let rows = self.mds_matrix.len();
        let square = rows == self.width
            && self.mds_matrix.iter().all(|line| line.len() == self.width);
        if !square {
            return Err(Error::InvalidMdsMatrix {
                width: self.width,
                rows,
            });
        }

        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn full_rounds_beginning(&self) -> usize {
        self.full_rounds_beginning
    }

    pub fn partial_rounds(&self) -> usize {
        self.partial_rounds
    }

    pub fn full_rounds_end(&self) -> usize {
        self.full_rounds_end
    }

    pub fn round_keys(&self) -> &[Scalar] {
        &self.round_keys
    }

    pub fn mds_matrix(&self) -> &MdsMatrix {
        &self.mds_matrix
    }

    #[cfg(test)]
    pub(crate) fn round_keys_mut(&mut self) -> &mut Vec<Scalar> {
        &mut self.round_keys
    }

    /// 整个轮次计划共需消耗的轮密钥数量；溢出时返回
    /// [`Error::RoundsOverflow`]。
    pub fn required_round_keys(&self) -> Result<usize, Error> {
        round_key_count(
            self.width,
            self.full_rounds_beginning,
            self.partial_rounds,
            self.full_rounds_end,
        )
    }
}

fn round_key_count(
    width: usize,
    full_rounds_beginning: usize,
    partial_rounds: usize,
    full_rounds_end: usize,
) -> Result<usize, Error> {
    full_rounds_beginning
        .checked_add(partial_rounds)
        .and_then(|rounds| rounds.checked_add(full_rounds_end))
        .and_then(|rounds| rounds.checked_mul(width))
        .ok_or(Error::RoundsOverflow { width })
}

fn check_width(width: usize) -> Result<(), Error> {
    if (2..=MAX_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(Error::InvalidWidth(width))
    }
}
