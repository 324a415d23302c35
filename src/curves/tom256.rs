use crypto_bigint::U256;

use crate::curves::secp256k1::{Secp256k1, Secp256k1FqParams, Secp256k1FrParams};
use crate::fields::field::Field;
use crate::groups::curve_params::{CurveParams, Cycle};

/// tom256 is the field-swapped twin of secp256k1:
/// - tom256 Fq = secp256k1 Fr (the field prime is secp256k1's group order)
/// - tom256 Fr = secp256k1 Fq (the group order is secp256k1's field prime)
pub type Tom256k1Fq = Field<Secp256k1FrParams>;
pub type Tom256k1Fr = Field<Secp256k1FqParams>;

/// tom256: `y^2 = x^3 + 7` over secp256k1's scalar field.
///
/// The generator was fixed by the curve's designers; that its order is
/// exactly secp256k1's field prime is re-checked by the registry at
/// construction time rather than trusted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tom256k1;

impl CurveParams for Tom256k1 {
    type BaseFieldParams = Secp256k1FrParams;
    type ScalarFieldParams = Secp256k1FqParams;

    const NAME: &'static str = "tom256";

    const COEFF_A: U256 = U256::ZERO;
    const COEFF_B: U256 = U256::from_u8(7);

    const GENERATOR_X: U256 =
        U256::from_be_hex("ac81a9587b8da43a9519bd50d96191fd8f2c4f66b8f1550e366e3c7f9ed18897");
    const GENERATOR_Y: U256 =
        U256::from_be_hex("6ad7d16db13c428e5dce61c8bfe2b3860a306d201f059826120e7ac684ee209f");
}

impl Cycle<Secp256k1> for Tom256k1 {}
impl Cycle<Tom256k1> for Secp256k1 {}
