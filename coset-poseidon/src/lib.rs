// 模块说明：本文件实现 Poseidon 组件（src/lib.rs）。

//! 基于 ristretto255 标量域的 Poseidon（Hades 置换）哈希。
//!
//! - [`Parameters`]：宽度、轮数、轮密钥表与 MDS 矩阵；
//! - [`Poseidon`]：写入域元素或字节串，`sum` 时执行轮次计划并输出 32 字节摘要。

mod error;
pub use error::Error;

mod hades;
pub use hades::{
    derive_round_keys, generate_mds_matrix, quintic_s_box, round_key,
    unsigned_to_scalar, MdsMatrix, Unsigned, ROUND_KEY_TAG,
};

mod params;
pub use params::{
    default_parameters, Parameters, FULL_ROUNDS_BEGINNING, FULL_ROUNDS_END,
    PARTIAL_ROUNDS, WIDTH,
};

mod hash;
pub use hash::{Poseidon, DIGEST_SIZE};

pub use curve25519_dalek::Scalar;
