use bulletproofs::{BulletproofGens, PedersenGens};
use once_cell::sync::Lazy;

use crate::{MAX_AGGREGATION, RANGE_BITS};

static PEDERSEN: Lazy<PedersenGens> = Lazy::new(PedersenGens::default);

static BULLETPROOF: Lazy<BulletproofGens> =
    Lazy::new(|| BulletproofGens::new(RANGE_BITS, MAX_AGGREGATION));

pub(crate) fn pedersen() -> &'static PedersenGens {
    &PEDERSEN
}

pub(crate) fn bulletproof() -> &'static BulletproofGens {
    &BULLETPROOF
}
