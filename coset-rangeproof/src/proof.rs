use std::io::{Read, Write};

use bulletproofs::{ProofError, RangeProof};
use curve25519_dalek_ng::ristretto::CompressedRistretto;
use curve25519_dalek_ng::scalar::Scalar;
use merlin::Transcript;
use tracing::debug;

use crate::{generators, Commitment, Error, MAX_AGGREGATION, RANGE_BITS};

/// 证明转录的域分离标签。
pub const TRANSCRIPT_LABEL: &[u8] = b"BulletProof.v1";

/// 聚合 16 个 64 位值时的证明字节长度：`32 * (9 + 2 * log2(64 * 16))`。
pub const MAX_PROOF_SIZE: usize = 32 * (9 + 2 * 10);

const POINT_SIZE: usize = 32;

/// 聚合范围证明及其对应的承诺。
///
/// 不携带承诺解码得到的证明只能比较，无法校验。
#[derive(Debug, Clone)]
pub struct Proof {
    commitments: Vec<CompressedRistretto>,
    proof: RangeProof,
}

impl Proof {
    #[must_use]
    pub fn commitments(&self) -> &[CompressedRistretto] {
        &self.commitments
    }

    /// 写出证明：可选的 `u32` LE 承诺数量及 32 字节承诺，
    /// 随后为 `u32` LE 证明长度及证明字节。
    ///
    /// # Errors
    ///
    /// 写入失败时返回 [`Error::Io`]。
    pub fn encode<W: Write>(
        &self,
        writer: &mut W,
        include_commitments: bool,
    ) -> Result<(), Error> {
        if include_commitments {
            write_len(writer, self.commitments.len())?;
            for commitment in &self.commitments {
                writer.write_all(commitment.as_bytes())?;
            }
        }

        let bytes = self.proof.to_bytes();
        write_len(writer, bytes.len())?;
        writer.write_all(&bytes)?;

        Ok(())
    }

    /// 读取 [`Proof::encode`] 的输出。
    ///
    /// # Errors
    ///
    /// 读取失败、长度超限或证明字节格式错误时返回错误。
    pub fn decode<R: Read>(
        reader: &mut R,
        include_commitments: bool,
    ) -> Result<Self, Error> {
        let mut commitments = Vec::new();

        if include_commitments {
            let count = read_len(reader, "commitment count", MAX_AGGREGATION)?;
            commitments.reserve(count);
            for _ in 0..count {
                let mut point = [0u8; POINT_SIZE];
                reader.read_exact(&mut point)?;
                commitments.push(CompressedRistretto(point));
            }
        }

        let size = read_len(reader, "proof size", MAX_PROOF_SIZE)?;
        let mut bytes = vec![0u8; size];
        reader.read_exact(&mut bytes)?;
        let proof = RangeProof::from_bytes(&bytes).map_err(Error::Proof)?;

        Ok(Self { commitments, proof })
    }

    /// 比较证明字节；`include_commitments` 为真时同时比较承诺。
    #[must_use]
    pub fn equals(&self, other: &Self, include_commitments: bool) -> bool {
        if include_commitments && self.commitments != other.commitments {
            return false;
        }

        self.proof.to_bytes() == other.proof.to_bytes()
    }
}

/// 为 `amounts` 生成聚合范围证明，`commitments[i]` 须承诺 `amounts[i]`。
///
/// `check_openings` 为真时先逐一重算承诺，不符即报错。
///
/// # Errors
///
/// 数量不一致、数量不是不超过 16 的 2 的幂、承诺不符或证明生成失败。
pub fn prove(
    amounts: &[u64],
    commitments: &[Commitment],
    check_openings: bool,
) -> Result<Proof, Error> {
    if amounts.len() != commitments.len() {
        return Err(Error::LengthMismatch {
            amounts: amounts.len(),
            commitments: commitments.len(),
        });
    }
    check_aggregation(amounts.len())?;

    if check_openings {
        for (index, (amount, commitment)) in
            amounts.iter().zip(commitments).enumerate()
        {
            if !commitment.opens_to(*amount) {
                return Err(Error::OpeningMismatch { index });
            }
        }
    }

    let blindings: Vec<Scalar> =
        commitments.iter().map(Commitment::blinding).collect();

    let mut transcript = Transcript::new(TRANSCRIPT_LABEL);
    let (proof, points) = RangeProof::prove_multiple(
        generators::bulletproof(),
        generators::pedersen(),
        &mut transcript,
        amounts,
        &blindings,
        RANGE_BITS,
    )
    .map_err(Error::Proof)?;

    debug!(values = amounts.len(), "range proof generated");

    Ok(Proof {
        commitments: points,
        proof,
    })
}

/// 校验证明；证明不成立时返回 `Ok(false)`。
///
/// # Errors
///
/// 证明不含承诺、承诺数量非法或底层报告非校验类错误。
pub fn verify(proof: &Proof) -> Result<bool, Error> {
    if proof.commitments.is_empty() {
        return Err(Error::MissingCommitments);
    }
    check_aggregation(proof.commitments.len())?;

    let mut transcript = Transcript::new(TRANSCRIPT_LABEL);
    match proof.proof.verify_multiple(
        generators::bulletproof(),
        generators::pedersen(),
        &mut transcript,
        &proof.commitments,
        RANGE_BITS,
    ) {
        Ok(()) => Ok(true),
        Err(ProofError::VerificationError) => {
            debug!(values = proof.commitments.len(), "range proof rejected");
            Ok(false)
        }
        Err(err) => Err(Error::Proof(err)),
    }
}

fn check_aggregation(count: usize) -> Result<(), Error> {
    if count == 0 || count > MAX_AGGREGATION || !count.is_power_of_two() {
        return Err(Error::InvalidAggregation {
            count,
            max: MAX_AGGREGATION,
        });
    }
    Ok(())
}

fn write_len<W: Write>(writer: &mut W, len: usize) -> Result<(), Error> {
    let len = u32::try_from(len).map_err(|_| Error::TooLarge {
        what: "length prefix",
        found: len,
        limit: u32::MAX as usize,
    })?;
    writer.write_all(&len.to_le_bytes())?;
    Ok(())
}

fn read_len<R: Read>(
    reader: &mut R,
    what: &'static str,
    limit: usize,
) -> Result<usize, Error> {
    let mut prefix = [0u8; 4];
    reader.read_exact(&mut prefix)?;

    let found = u32::from_le_bytes(prefix) as usize;
    if found > limit {
        return Err(Error::TooLarge { what, found, limit });
    }
    Ok(found)
}
