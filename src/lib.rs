//! Finite-field and short-Weierstrass elliptic-curve arithmetic built around
//! the secp256k1 / tom256 cycle of curves.
//!
//! tom256 is defined over the prime field whose modulus is secp256k1's group
//! order, and its own group order is secp256k1's field prime. One curve's
//! scalars are therefore the other curve's field elements, which is what
//! makes the pair usable for recursive two-curve protocols.
//!
//! The crate has two layers:
//!
//! - a typed core ([`fields::Field`], [`groups::Element`]) generic over
//!   parameter traits, where mixing elements of different curves is a compile
//!   error and scalar multiplication is constant-time by default;
//! - a runtime layer ([`curves::CurveDefinition`], [`curves::CheckedPoint`])
//!   for parameter sets assembled and validated at runtime, backing the
//!   named-curve registry ([`curves::by_name`]).
//!
//! Operations that take a secret scalar or exponent run in time independent
//! of its bit pattern; every variable-time fast path carries a `_vartime`
//! suffix so callers cannot downgrade by accident.

pub mod curves;
pub mod fields;
pub mod groups;


pub use crypto_bigint::U256;

pub use curves::{by_name, CheckedPoint, CurveDefinition, Secp256k1, Tom256k1};
pub use fields::{Field, FieldParams};
pub use groups::{AffineElement, CurveParams, Cycle, Element, MultiMult, Scalar};

/// Errors reported by curve and field operations.
///
/// All failures are deterministic: retrying the same inputs fails the same
/// way, and a failed constructor yields no value.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A curve parameter set failed validation. The payload names the check
    /// that rejected it.
    #[error("invalid curve parameters: {0}")]
    InvalidCurve(&'static str),
    /// Affine coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    PointNotOnCurve,
    /// Two operands belong to different curve parameter sets.
    #[error("operands belong to different curves")]
    CurveMismatch,
    /// Multiplicative inverse of zero.
    #[error("division by zero")]
    DivisionByZero,
}
