use core::fmt;

use curve25519_dalek_ng::ristretto::CompressedRistretto;
use curve25519_dalek_ng::scalar::Scalar;

use crate::generators;

/// 对 64 位金额的 Pedersen 承诺，保留开启值以便后续证明。
#[derive(Clone)]
pub struct Commitment {
    point: CompressedRistretto,
    amount: u64,
    blinding: Scalar,
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commitment")
            .field("point", &self.point)
            .finish_non_exhaustive()
    }
}

impl Commitment {
    /// 压缩后的承诺点。
    #[must_use]
    pub fn point(&self) -> &CompressedRistretto {
        &self.point
    }

    #[must_use]
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub(crate) fn blinding(&self) -> Scalar {
        self.blinding
    }

    /// 判断承诺是否以给定金额和自身盲化因子开启。
    pub(crate) fn opens_to(&self, amount: u64) -> bool {
        compute(amount, self.blinding) == self.point
    }
}

/// 以随机盲化因子承诺金额。
#[must_use]
pub fn commit(amount: u64) -> Commitment {
    let blinding = Scalar::random(&mut rand::thread_rng());

    Commitment {
        point: compute(amount, blinding),
        amount,
        blinding,
    }
}

fn compute(amount: u64, blinding: Scalar) -> CompressedRistretto {
    generators::pedersen()
        .commit(Scalar::from(amount), blinding)
        .compress()
}
