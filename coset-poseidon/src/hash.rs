//

use curve25519_dalek::Scalar;
use sha2::Sha512;

use crate::hades::Permutation;
use crate::params::default_parameters;
use crate::{Error, Parameters};

/// 单个域元素规范编码的字节长度。
pub const DIGEST_SIZE: usize = 32;

/// Poseidon 哈希累加器。
///
/// 状态槽位 0 预置域分离常量 `(1 << (width - 1)) - 1`，
/// 其后最多写入 `width - 1` 个元素。`sum`/`finalize` 消耗累加器，不可复用。
#[derive(Debug, Clone)]
pub struct Poseidon<'a> {
    params: &'a Parameters,
    state: Vec<Scalar>,
}

impl Default for Poseidon<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Poseidon<'static> {
    /// 使用默认参数创建累加器。
    pub fn new() -> Self {
        Self::with_params(default_parameters())
    }

    /// 便捷接口：以默认参数一次性计算若干元素的摘要。
    pub fn digest(inputs: &[Scalar]) -> Result<Scalar, Error> {
        let mut poseidon = Self::new();
        for input in inputs {
            poseidon.write_scalar(*input)?;
        }
        poseidon.finalize()
    }
}

impl<'a> Poseidon<'a> {
    /// 使用给定参数创建累加器。
    pub fn with_params(params: &'a Parameters) -> Self {
        let capacity = params.width();
        let domain = (1u64 << (capacity - 1)) - 1;

        let mut state = Vec::with_capacity(capacity);
        state.push(Scalar::from(domain));

        Self { params, state }
    }

    /// 状态向量的最大长度（即置换宽度）。
    pub fn size(&self) -> usize {
        self.params.width()
    }

    /// 当前状态向量长度（含槽位 0）。
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// 是否还未写入任何负载元素。
    pub fn is_empty(&self) -> bool {
        self.state.len() <= 1
    }

    /// 将字节串经 SHA-512 宽归约为域元素后写入。
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, Error> {
        self.write_scalar(Scalar::hash_from_bytes::<Sha512>(bytes))
    }

    /// 追加一个域元素；状态已满时返回容量错误。
    pub fn write_scalar(&mut self, scalar: Scalar) -> Result<usize, Error> {
        let width = self.params.width();
        if self.state.len() >= width {
            return Err(Error::WidthExceeded { width });
        }

        self.state.push(scalar);

        Ok(DIGEST_SIZE)
    }

    /// 以零元补齐状态向量至置换宽度。
    pub fn pad(&mut self) {
        self.state.resize(self.params.width(), Scalar::ZERO);
    }

    /// 补齐并执行置换，返回状态中下标 1 的元素。
    pub fn finalize(mut self) -> Result<Scalar, Error> {
        self.pad();

        Permutation::new(self.params).apply(&mut self.state)?;

        Ok(self.state[1])
    }

    /// 计算摘要的规范字节编码。`_buf` 仅为兼容通用哈希接口，不参与计算。
    pub fn sum(self, _buf: &[u8]) -> Result<Vec<u8>, Error> {
        self.finalize().map(|digest| digest.to_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_separator() {
        let poseidon = Poseidon::new();

        assert_eq!(poseidon.len(), 1);
        assert!(poseidon.is_empty());
        assert_eq!(poseidon.state[0], Scalar::from(15u64));

        let params = Parameters::generate(3, 1, 1, 1).expect("valid");
        let poseidon = Poseidon::with_params(&params);
        assert_eq!(poseidon.state[0], Scalar::from(3u64));
    }

    #[test]
    fn width_is_enforced() {
        let mut poseidon = Poseidon::new();

        for _ in 0..4 {
            assert_eq!(poseidon.write_scalar(Scalar::ONE), Ok(DIGEST_SIZE));
        }
        assert_eq!(
            poseidon.write_scalar(Scalar::ONE),
            Err(Error::WidthExceeded { width: 5 })
        );
        assert_eq!(
            poseidon.write(b"overflow"),
            Err(Error::WidthExceeded { width: 5 })
        );
        assert_eq!(poseidon.len(), 5);
    }

    #[test]
    fn pad_fills_with_zero() {
        let mut poseidon = Poseidon::new();
        poseidon.write_scalar(Scalar::ONE).expect("room left");
        poseidon.pad();

        assert_eq!(poseidon.len(), 5);
        assert_eq!(poseidon.state[1], Scalar::ONE);
        assert!(poseidon.state[2..].iter().all(|s| *s == Scalar::ZERO));
    }

    #[test]
    fn write_reduces_bytes() {
        let mut from_bytes = Poseidon::new();
        from_bytes.write(b"Bella").expect("room left");

        let mut from_scalar = Poseidon::new();
        from_scalar
            .write_scalar(Scalar::hash_from_bytes::<Sha512>(b"Bella"))
            .expect("room left");

        assert_eq!(
            from_bytes.sum(&[]).expect("valid params"),
            from_scalar.sum(&[]).expect("valid params")
        );
    }

    #[test]
    fn sum_ignores_buffer() {
        let mut a = Poseidon::new();
        a.write_scalar(Scalar::from(42u64)).expect("room left");
        let mut b = a.clone();
        b.pad();

        assert_eq!(a.sum(b"ignored"), b.sum(&[]));
    }

    #[test]
    fn digest_of_ones() {
        let mut poseidon = Poseidon::new();
        for _ in 0..4 {
            poseidon.write_scalar(Scalar::ONE).expect("room left");
        }

        let digest = poseidon.sum(&[]).expect("valid params");
        assert_eq!(digest.len(), DIGEST_SIZE);
        assert_eq!(
            hex::encode(digest),
            "b46d96c45ba33a0125f8955e6435d9e9ee437110695b9a06ffecac2c288afb03"
        );
    }

    #[test]
    fn digest_of_nothing() {
        assert_eq!(
            hex::encode(Poseidon::new().sum(&[]).expect("valid params")),
            "b903170b14d1a77ee61bee5977a024afa78205a88e3406a30e38a252a04d270d"
        );
        assert_eq!(
            Poseidon::digest(&[]).map(|d| d.to_bytes().to_vec()),
            Poseidon::new().sum(&[])
        );
    }

    #[test]
    fn digest_helper_rejects_overflow() {
        let inputs = [Scalar::ONE; 5];
        assert_eq!(
            Poseidon::digest(&inputs),
            Err(Error::WidthExceeded { width: 5 })
        );
    }
}
