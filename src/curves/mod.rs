// Named curves and the runtime registry.

pub mod definition;
pub mod secp256k1;
pub mod tom256;

pub use definition::{CheckedPoint, CurveDefinition};
pub use secp256k1::{Secp256k1, Secp256k1Fq, Secp256k1Fr};
pub use tom256::{Tom256k1, Tom256k1Fq, Tom256k1Fr};

use std::sync::LazyLock;

use crate::fields::field_params::FieldParams;
use crate::groups::curve_params::CurveParams;
use crate::Error;

/// Build and validate the runtime definition of a typed curve.
///
/// This runs the full [`CurveDefinition::new`] validation against the
/// curve's compile-time constants, so a typed parameter set can be checked
/// once instead of trusted.
pub fn definition_of<C: CurveParams>() -> Result<CurveDefinition, Error> {
    CurveDefinition::new(
        C::NAME,
        <C::BaseFieldParams as FieldParams>::MODULUS,
        C::COEFF_A,
        C::COEFF_B,
        <C::ScalarFieldParams as FieldParams>::MODULUS,
        C::GENERATOR_X,
        C::GENERATOR_Y,
    )
}

/// The well-known curves, validated once on first access and immutable
/// afterwards.
static REGISTRY: LazyLock<Vec<CurveDefinition>> = LazyLock::new(|| {
    vec![
        // NOTE expect is fine: these constants are fixed and covered by
        // tests; failing to validate them is unrecoverable.
        definition_of::<Secp256k1>().expect("secp256k1 parameters validate"),
        definition_of::<Tom256k1>().expect("tom256 parameters validate"),
    ]
});

/// Look up a well-known curve by name (`"secp256k1"`, `"tom256"`).
pub fn by_name(name: &str) -> Option<&'static CurveDefinition> {
    REGISTRY.iter().find(|curve| curve.name() == name)
}
