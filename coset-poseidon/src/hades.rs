//

mod mds_matrix;
mod round_constants;

use core::slice;

use curve25519_dalek::Scalar;

use crate::{Error, Parameters};

pub use mds_matrix::{generate_mds_matrix, unsigned_to_scalar, MdsMatrix, Unsigned};
pub use round_constants::{derive_round_keys, round_key, ROUND_KEY_TAG};

/// 对单个状态元素应用五次 S-Box：`x -> x^5`，以平方与乘法实现。
pub fn quintic_s_box(value: &mut Scalar) {
    let squared = *value * *value;
    *value = squared * squared * *value;
}

/// Hades 置换：前半全轮 + 部分轮 + 后半全轮。
///
/// 所有轮次从同一个轮密钥迭代器中按序取密钥，游标只前进不回退。
pub(crate) struct Permutation<'a> {
    params: &'a Parameters,
    round_keys: slice::Iter<'a, Scalar>,
}

impl<'a> Permutation<'a> {
    pub(crate) fn new(params: &'a Parameters) -> Self {
        Self {
            params,
            round_keys: params.round_keys().iter(),
        }
    }

    /// 为 state 的每个元素叠加下一个轮密钥。
    fn add_round_keys(&mut self, state: &mut [Scalar]) -> Result<(), Error> {
        for value in state.iter_mut() {
            let Some(key) = self.round_keys.next() else {
                return Err(Error::RoundKeysExhausted {
                    required: self.params.required_round_keys()?,
                    available: self.params.round_keys().len(),
                });
            };
            *value += key;
        }

        Ok(())
    }

    /// `state <- MDS x state`。
    fn apply_mds_matrix(&self, state: &mut [Scalar]) {
        let mixed: Vec<Scalar> = self
            .params
            .mds_matrix()
            .iter()
            .map(|line| {
                line.iter()
                    .zip(state.iter())
                    .map(|(entry, value)| entry * value)
                    .sum()
            })
            .collect();

        state.copy_from_slice(&mixed);
    }

    /// 执行一轮部分轮：全元素常量注入 + 仅首元素 S-Box + 矩阵混合。
    fn run_partial_round(&mut self, state: &mut [Scalar]) -> Result<(), Error> {
        self.add_round_keys(state)?;

        if let Some(first) = state.first_mut() {
            quintic_s_box(first);
        }

        self.apply_mds_matrix(state);

        Ok(())
    }

    /// 执行一轮全轮：常量注入 + 全元素 S-Box + 矩阵混合。
    fn run_full_round(&mut self, state: &mut [Scalar]) -> Result<(), Error> {
        self.add_round_keys(state)?;

        state.iter_mut().for_each(quintic_s_box);

        self.apply_mds_matrix(state);

        Ok(())
    }

    /// 执行完整轮次计划。`state` 长度须等于参数宽度。
    pub(crate) fn apply(mut self, state: &mut [Scalar]) -> Result<(), Error> {
        for _ in 0..self.params.full_rounds_beginning() {
            self.run_full_round(state)?;
        }

        for _ in 0..self.params.partial_rounds() {
            self.run_partial_round(state)?;
        }

        for _ in 0..self.params.full_rounds_end() {
            self.run_full_round(state)?;
        }

        Ok(())
    }
}
