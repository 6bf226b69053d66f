//! 基于 Bulletproofs 的 Pedersen 承诺与 64 位聚合范围证明适配层。
//!
//! 协议本身由 `bulletproofs` 提供；这里只负责承诺开启值的保管、
//! 证明的线格式以及单值证明的便捷流程。

mod commitment;
mod error;
mod generators;
mod proof;

pub use commitment::{commit, Commitment};
pub use error::Error;
pub use proof::{prove, verify, Proof, MAX_PROOF_SIZE, TRANSCRIPT_LABEL};

pub use curve25519_dalek_ng::ristretto::CompressedRistretto;

/// 每个值的证明位宽。
pub const RANGE_BITS: usize = 64;

/// 单个证明最多聚合的值个数。
pub const MAX_AGGREGATION: usize = 16;

/// 为单个金额及其承诺生成证明，并校验承诺开启值。
///
/// # Errors
///
/// 见 [`prove`]。
pub fn gen_proof(amount: u64, commitment: &Commitment) -> Result<Proof, Error> {
    prove(&[amount], core::slice::from_ref(commitment), true)
}

/// 见 [`verify`]。
///
/// # Errors
///
/// 见 [`verify`]。
pub fn verify_proof(proof: &Proof) -> Result<bool, Error> {
    verify(proof)
}
