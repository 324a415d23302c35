use crypto_bigint::U256;

use crate::fields::field::Field;
use crate::fields::field_params::FieldParams;
use crate::groups::curve_params::CurveParams;

// ---------------------------------------------------------------------------
// secp256k1 base field (Fq)
// ---------------------------------------------------------------------------

pub struct Secp256k1FqParams;

impl FieldParams for Secp256k1FqParams {
    /// p = 2^256 - 2^32 - 977
    const MODULUS: U256 =
        U256::from_be_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
}

pub type Secp256k1Fq = Field<Secp256k1FqParams>;

// ---------------------------------------------------------------------------
// secp256k1 scalar field (Fr)
// ---------------------------------------------------------------------------

pub struct Secp256k1FrParams;

impl FieldParams for Secp256k1FrParams {
    /// The group order n.
    const MODULUS: U256 =
        U256::from_be_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");
}

pub type Secp256k1Fr = Field<Secp256k1FrParams>;

// ---------------------------------------------------------------------------
// Curve
// ---------------------------------------------------------------------------

/// secp256k1: `y^2 = x^3 + 7` over Fq.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1;

impl CurveParams for Secp256k1 {
    type BaseFieldParams = Secp256k1FqParams;
    type ScalarFieldParams = Secp256k1FrParams;

    const NAME: &'static str = "secp256k1";

    const COEFF_A: U256 = U256::ZERO;
    const COEFF_B: U256 = U256::from_u8(7);

    const GENERATOR_X: U256 =
        U256::from_be_hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
    const GENERATOR_Y: U256 =
        U256::from_be_hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8");
}
