use crypto_bigint::U256;

use crate::fields::field::Field;
use crate::fields::field_params::FieldParams;

/// Trait defining a short-Weierstrass curve `y^2 = x^3 + a*x + b` over the
/// base field, together with the scalar field of its prime-order group.
///
/// Constants are stored as canonical integers (already reduced into the base
/// field); the provided constructors turn them into field elements. Marker
/// types implementing this trait are the curve identities of the typed
/// layer: two different implementors give unrelated point types, so points
/// of different curves cannot meet in one operation.
///
/// Parameter sets should be checked once with
/// [`crate::curves::definition_of`] (the registry does this for the built-in
/// curves); the trait itself performs no validation.
pub trait CurveParams: 'static + Send + Sync + Sized {
    type BaseFieldParams: FieldParams;
    type ScalarFieldParams: FieldParams;

    /// Registry name of the curve.
    const NAME: &'static str;

    /// Curve coefficient `a`, standard form.
    const COEFF_A: U256;

    /// Curve coefficient `b`, standard form.
    const COEFF_B: U256;

    /// Generator x-coordinate, standard form.
    const GENERATOR_X: U256;

    /// Generator y-coordinate, standard form.
    const GENERATOR_Y: U256;

    fn coeff_a() -> BaseField<Self> {
        Field::new_unchecked(Self::COEFF_A)
    }

    fn coeff_b() -> BaseField<Self> {
        Field::new_unchecked(Self::COEFF_B)
    }

    fn generator_x() -> BaseField<Self> {
        Field::new_unchecked(Self::GENERATOR_X)
    }

    fn generator_y() -> BaseField<Self> {
        Field::new_unchecked(Self::GENERATOR_Y)
    }
}

/// An element of the curve's base field.
pub type BaseField<C> = Field<<C as CurveParams>::BaseFieldParams>;

/// A multiplier of curve points, reduced modulo the group order.
pub type Scalar<C> = Field<<C as CurveParams>::ScalarFieldParams>;

/// Marker for a pair of curves forming a cycle: this curve's base field
/// modulus is the other curve's group order and vice versa, so scalars of
/// one curve are field elements of the other.
pub trait Cycle<C: CurveParams>: CurveParams {
    fn is_cycle() -> bool {
        <Self::BaseFieldParams as FieldParams>::MODULUS
            == <C::ScalarFieldParams as FieldParams>::MODULUS
            && <Self::ScalarFieldParams as FieldParams>::MODULUS
                == <C::BaseFieldParams as FieldParams>::MODULUS
    }
}
