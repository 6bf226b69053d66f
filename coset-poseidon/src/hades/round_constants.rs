// 模块说明：本文件实现 Poseidon 组件（src/hades/round_constants.rs）。

//

use curve25519_dalek::Scalar;
use sha2::{Digest, Sha512};

/// 轮密钥派生所用的域分离前缀。
pub const ROUND_KEY_TAG: &[u8] = b"poseidon.round_key";

/// 派生第 `index` 个轮密钥：`Sha512(tag || index_le)` 宽归约到标量域。
pub fn round_key(index: u64) -> Scalar {
    let hasher = Sha512::new()
        .chain_update(ROUND_KEY_TAG)
        .chain_update(index.to_le_bytes());

    Scalar::from_hash(hasher)
}

/// 按顺序派生 `count` 个轮密钥，组成平铺的轮密钥表。
pub fn derive_round_keys(count: usize) -> Vec<Scalar> {
    (0..count as u64).map(round_key).collect()
}
