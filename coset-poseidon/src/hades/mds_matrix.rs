//

use curve25519_dalek::Scalar;

use crate::params::MAX_WIDTH;
use crate::Error;

/// `width x width` 的 MDS 扩散矩阵，按行存储。
pub type MdsMatrix = Vec<Vec<Scalar>>;

mod sealed {
    pub trait Sealed {}
}

/// 允许转换为标量的无符号整数类型。
pub trait Unsigned: sealed::Sealed + Copy {
    fn widen(self) -> u128;
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Unsigned for $ty {
                fn widen(self) -> u128 {
                    self as u128
                }
            }
        )*
    };
}

impl_unsigned!(u8, u16, u32, u64, u128, usize);

/// 将无符号整数写入标量：低 32 位放入第 0 肢，次 32 位放入第 1 肢，其余清零。
///
/// 仅用于矩阵生成中的小下标，不是通用的整数编码。
pub fn unsigned_to_scalar<N: Unsigned>(number: N) -> Result<Scalar, Error> {
    let value = number.widen();
    let value = u64::try_from(value).map_err(|_| Error::Conversion(value))?;
    let le_bytes = value.to_le_bytes();

    let mut limbs = [0u8; 32];
    limbs[..4].copy_from_slice(&le_bytes[..4]);
    limbs[4..8].copy_from_slice(&le_bytes[4..]);

    Ok(Scalar::from_bytes_mod_order(limbs))
}

/// 以 Cauchy 构造生成 MDS 矩阵：`M[i][j] = (x_i + y_j)^-1`，
/// 其中 `x_k = k`，`y_k = k + width`。宽度超过 64 时返回
/// [`Error::InvalidWidth`]。
pub fn generate_mds_matrix(width: usize) -> Result<MdsMatrix, Error> {
    if width > MAX_WIDTH {
        return Err(Error::InvalidWidth(width));
    }

    let mut xs = Vec::with_capacity(width);
    let mut ys = Vec::with_capacity(width);

    for k in 0..width {
        xs.push(unsigned_to_scalar(k)?);
        ys.push(unsigned_to_scalar(k + width)?);
    }

    let mut mds = Vec::with_capacity(width);
    for (row, x) in xs.iter().enumerate() {
        let mut line = Vec::with_capacity(width);
        for (column, y) in ys.iter().enumerate() {
            let sum = x + y;
            if sum == Scalar::ZERO {
                return Err(Error::NonInvertible { row, column });
            }
            line.push(sum.invert());
        }
        mds.push(line);
    }

    Ok(mds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limb_layout() {
        let scalar = unsigned_to_scalar(0x0000_0002_0000_0001u64)
            .expect("a u64 always fits two limbs");
        let bytes = scalar.to_bytes();

        assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[2, 0, 0, 0]);
        assert!(bytes[8..].iter().all(|b| *b == 0));
        assert_eq!(scalar, Scalar::from(0x0000_0002_0000_0001u64));
    }

    #[test]
    fn every_unsigned_type_converts() {
        assert_eq!(unsigned_to_scalar(7u8), Ok(Scalar::from(7u64)));
        assert_eq!(unsigned_to_scalar(7u16), Ok(Scalar::from(7u64)));
        assert_eq!(unsigned_to_scalar(7u32), Ok(Scalar::from(7u64)));
        assert_eq!(unsigned_to_scalar(7usize), Ok(Scalar::from(7u64)));
        assert_eq!(unsigned_to_scalar(7u128), Ok(Scalar::from(7u64)));
    }

    #[test]
    fn oversized_value_is_rejected() {
        let too_big = u128::from(u64::MAX) + 1;
        assert_eq!(unsigned_to_scalar(too_big), Err(Error::Conversion(too_big)));
    }

    #[test]
    fn cauchy_entries() {
        let width = 5;
        let mds = generate_mds_matrix(width).expect("width 5 is invertible");

        assert_eq!(mds.len(), width);
        for (i, line) in mds.iter().enumerate() {
            assert_eq!(line.len(), width);
            for (j, entry) in line.iter().enumerate() {
                let denominator = Scalar::from((i + j + width) as u64);
                assert_eq!(entry * denominator, Scalar::ONE);
                assert_eq!(*entry, mds[j][i]);
            }
        }
    }

    #[test]
    fn empty_matrix() {
        assert_eq!(generate_mds_matrix(0), Ok(Vec::new()));
    }

    #[test]
    fn oversized_width_is_rejected() {
        assert_eq!(generate_mds_matrix(64).map(|m| m.len()), Ok(64));
        assert_eq!(generate_mds_matrix(65), Err(Error::InvalidWidth(65)));
        assert_eq!(
            generate_mds_matrix(usize::MAX),
            Err(Error::InvalidWidth(usize::MAX))
        );
    }
}
