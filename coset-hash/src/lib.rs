#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! 字节哈希、校验和与熵源辅助函数。
//!
//! 与 Poseidon 置换无关，供校验、相等性检查及承诺协议内部使用。

mod entropy;
mod error;

pub use entropy::{rand_entropy, rand_entropy_from};
pub use error::Error;

use blake2::{Blake2b512, Blake2b};
use digest::consts::U32;
use digest::Digest;
use sha3::{Sha3_256, Sha3_512};
use xxhash_rust::xxh64::xxh64;

/// 32 字节输出的 BLAKE2b。
pub type Blake2b256 = Blake2b<U32>;

/// 用任意 [`Digest`] 实现一次性哈希 `bytes`。
///
/// # Errors
///
/// 当前所有摘要实现都不会失败；保留 `Result` 以统一哈希接口。
#[allow(clippy::unnecessary_wraps)]
pub fn perform_hash<D: Digest>(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    Ok(D::digest(bytes).to_vec())
}

/// BLAKE2b-256。
///
/// # Errors
///
/// 见 [`perform_hash`]。
pub fn blake2b_256(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    perform_hash::<Blake2b256>(bytes)
}

/// BLAKE2b-512。
///
/// # Errors
///
/// 见 [`perform_hash`]。
pub fn blake2b_512(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    perform_hash::<Blake2b512>(bytes)
}

/// SHA3-256。
///
/// # Errors
///
/// 见 [`perform_hash`]。
pub fn sha3_256(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    perform_hash::<Sha3_256>(bytes)
}

/// SHA3-512。
///
/// # Errors
///
/// 见 [`perform_hash`]。
pub fn sha3_512(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    perform_hash::<Sha3_512>(bytes)
}

/// 种子为 0 的 64 位 xxHash，按大端输出 8 字节。
///
/// 非密码学哈希，仅用于快速相等性检查与存储检索。
///
/// # Errors
///
/// 见 [`perform_hash`]。
#[allow(clippy::unnecessary_wraps)]
pub fn xxhash(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    Ok(xxh64(bytes, 0).to_be_bytes().to_vec())
}

/// 取 [`xxhash`] 输出的前 4 字节（大端）作为校验和。
///
/// # Errors
///
/// 见 [`perform_hash`]。
pub fn checksum(data: &[u8]) -> Result<u32, Error> {
    let hash = xxhash(data)?;
    let mut prefix = [0u8; 4];
    prefix.copy_from_slice(&hash[..4]);

    Ok(u32::from_be_bytes(prefix))
}

/// 计算 `data` 的校验和并与 `want` 比较；计算失败时返回 `false`。
#[must_use]
pub fn compare_checksum(data: &[u8], want: u32) -> bool {
    checksum(data).is_ok_and(|got| got == want)
}
