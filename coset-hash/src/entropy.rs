use rand_core::{OsRng, RngCore};
use tracing::trace;

use crate::Error;

/// 从操作系统随机源读取 `n` 字节。
///
/// # Errors
///
/// 随机源读取失败时返回 [`Error::Entropy`]，不会以零填充。
pub fn rand_entropy(n: u32) -> Result<Vec<u8>, Error> {
    rand_entropy_from(&mut OsRng, n)
}

/// 从任意 [`RngCore`] 读取 `n` 字节。
///
/// # Errors
///
/// 同 [`rand_entropy`]。
pub fn rand_entropy_from<R>(rng: &mut R, n: u32) -> Result<Vec<u8>, Error>
where
    R: RngCore + ?Sized,
{
    let mut entropy = vec![0u8; n as usize];
    rng.try_fill_bytes(&mut entropy)
        .map_err(|source| Error::Entropy {
            requested: n,
            source,
        })?;

    trace!(bytes = n, "entropy read");
    Ok(entropy)
}
