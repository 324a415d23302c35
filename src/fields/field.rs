use std::cmp::Ordering;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crypto_bigint::{Encoding, U256, Zero};
use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::field_params::FieldParams;
use super::modular;
use crate::Error;

/// An element of the prime field described by `P`.
///
/// The value is always fully reduced into `[0, P::MODULUS)`; no operation
/// exposes an unreduced intermediate. Elements of fields with different
/// parameter types are different Rust types, so a curve's field elements and
/// its scalars cannot be mixed by accident.
pub struct Field<P: FieldParams>(U256, PhantomData<P>);

// Manual Clone/Copy: PhantomData<P> must not force bounds on P.
impl<P: FieldParams> Clone for Field<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FieldParams> Copy for Field<P> {}

impl<P: FieldParams> std::fmt::Debug for Field<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field(0x{:x})", self.0)
    }
}

impl<P: FieldParams> Field<P> {
    /// The additive identity.
    pub const ZERO: Self = Self(U256::ZERO, PhantomData);

    /// The multiplicative identity.
    pub const ONE: Self = Self(U256::ONE, PhantomData);

    /// Construct from an arbitrary 256-bit integer, reducing modulo the
    /// field's modulus.
    pub fn new(value: U256) -> Self {
        Self(modular::reduce(&value, &P::MODULUS), PhantomData)
    }

    /// Construct from a value already known to be canonical (`< MODULUS`).
    ///
    /// For trusted constants such as curve parameters; no reduction is
    /// performed.
    pub const fn new_unchecked(value: U256) -> Self {
        Self(value, PhantomData)
    }

    /// Construct from a small integer.
    pub fn from_u64(value: u64) -> Self {
        Self::new(U256::from_u64(value))
    }

    /// The canonical integer representative in `[0, MODULUS)`.
    pub fn inner(&self) -> &U256 {
        &self.0
    }

    /// Decode from fixed-width big-endian bytes, reducing modulo the modulus.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self::new(U256::from_be_bytes(bytes))
    }

    /// Encode to fixed-width big-endian bytes (the byte length of the
    /// modulus, left-zero-padded). Round-trips with [`Field::from_be_bytes`]
    /// for every element.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes()
    }

    /// Sample a uniform field element.
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(modular::random_mod(rng, &P::MODULUS), PhantomData)
    }

    pub fn is_zero(&self) -> bool {
        bool::from(self.0.is_zero())
    }

    /// Field squaring.
    pub fn square(&self) -> Self {
        Self(modular::mul_mod(&self.0, &self.0, &P::MODULUS), PhantomData)
    }

    /// `self^exponent` in constant time.
    ///
    /// Use this whenever the exponent is secret; the running time does not
    /// depend on the exponent's bit pattern.
    pub fn pow(&self, exponent: &U256) -> Self {
        Self(
            modular::exp_mod(&self.0, exponent, &P::MODULUS),
            PhantomData,
        )
    }

    /// `self^exponent`, variable-time in the exponent. Public exponents only.
    pub fn pow_vartime(&self, exponent: &U256) -> Self {
        Self(
            modular::exp_mod_vartime(&self.0, exponent, &P::MODULUS),
            PhantomData,
        )
    }

    /// Multiplicative inverse; fails with [`Error::DivisionByZero`] for zero.
    pub fn invert(&self) -> Result<Self, Error> {
        modular::inv_mod(&self.0, &P::MODULUS).map(|value| Self(value, PhantomData))
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: FieldParams> Add for Field<P> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(modular::add_mod(&self.0, &rhs.0, &P::MODULUS), PhantomData)
    }
}

impl<P: FieldParams> AddAssign for Field<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: FieldParams> Sub for Field<P> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(modular::sub_mod(&self.0, &rhs.0, &P::MODULUS), PhantomData)
    }
}

impl<P: FieldParams> SubAssign for Field<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: FieldParams> Mul for Field<P> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(modular::mul_mod(&self.0, &rhs.0, &P::MODULUS), PhantomData)
    }
}

impl<P: FieldParams> MulAssign for Field<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: FieldParams> Neg for Field<P> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(modular::neg_mod(&self.0, &P::MODULUS), PhantomData)
    }
}

impl<P: FieldParams> ConstantTimeEq for Field<P> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl<P: FieldParams> ConditionallySelectable for Field<P> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(U256::conditional_select(&a.0, &b.0, choice), PhantomData)
    }
}

impl<P: FieldParams> PartialEq for Field<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<P: FieldParams> Eq for Field<P> {}

// Both operands are canonical, so integer order is well defined. Needed by
// the Bos-Coster multi-scalar heap.
impl<P: FieldParams> PartialOrd for Field<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: FieldParams> Ord for Field<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SmallParams;
    impl FieldParams for SmallParams {
        const MODULUS: U256 = U256::from_u8(17);
    }
    type SmallField = Field<SmallParams>;

    struct OrderParams;
    impl FieldParams for OrderParams {
        // secp256k1 group order
        const MODULUS: U256 = U256::from_be_hex(
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
        );
    }
    type OrderField = Field<OrderParams>;

    #[test]
    fn construction_reduces() {
        let a = SmallField::new(U256::from_u8(35));
        assert_eq!(a, SmallField::from_u64(1));
    }

    #[test]
    fn small_modulus_operations() {
        let a = SmallField::from_u64(15);
        let b = SmallField::from_u64(9);
        assert_eq!(a + b, SmallField::from_u64(7));
        assert_eq!(a * b, SmallField::from_u64(16));
        assert_eq!(a - b, SmallField::from_u64(6));
        assert_eq!(b - a, SmallField::from_u64(11));
    }

    #[test]
    fn large_modulus_operations() {
        let a = OrderField::new(U256::from_be_hex(
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        ));
        let b = OrderField::new(U256::from_be_hex(
            "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        ));
        assert_eq!(
            a + b,
            OrderField::new(U256::from_be_hex(
                "c1f940f620808011b3455e91dc9813afffb3b123d4537cf2f63a51eb1208ec50"
            ))
        );
        assert_eq!(
            a * b,
            OrderField::new(U256::from_be_hex(
                "805714a252d0c0b58910907e85b5b801fff610a36bdf46847a4bf5d9ae2d10ed"
            ))
        );
        assert_eq!(
            a - b,
            OrderField::new(U256::from_be_hex(
                "31838c07d338f746f7fb6699c076025e058448928748d4bfbdaab0cb1be742e0"
            ))
        );
        assert_eq!(
            b - a,
            OrderField::new(U256::from_be_hex(
                "ce7c73f82cc708b9080499663f89fda0b52a945427ffcb7c0227adc1b44efe61"
            ))
        );
        assert_eq!(a - b, -(b - a));
    }

    #[test]
    fn additive_inverse_cancels() {
        let a = OrderField::from_u64(123456789);
        assert_eq!(a + (-a), OrderField::ZERO);
        assert_eq!(-OrderField::ZERO, OrderField::ZERO);
    }

    #[test]
    fn multiplicative_inverse_cancels() {
        let a = OrderField::from_u64(7);
        assert_eq!(a * a.invert().unwrap(), OrderField::ONE);
        let b = OrderField::new(U256::from_be_hex(
            "c51e4753afdec1e6b6c6a5b992f43f8dd0c7a8933072708b6522468b2ffb06fd",
        ));
        assert_eq!(b * b.invert().unwrap(), OrderField::ONE);
    }

    #[test]
    fn inverting_zero_fails() {
        assert_eq!(OrderField::ZERO.invert(), Err(Error::DivisionByZero));
    }

    #[test]
    fn pow_agrees_with_vartime() {
        let base = OrderField::from_u64(3);
        let exponent = U256::from_be_hex(
            "d37f628ece72a462f0145cbefe3f0b355ee8332d37acdd83a358016aea029db7",
        );
        assert_eq!(base.pow(&exponent), base.pow_vartime(&exponent));
    }

    #[test]
    fn pow_small() {
        let a = OrderField::from_u64(3);
        assert_eq!(a.pow(&U256::from_u8(3)), OrderField::from_u64(27));
        assert_eq!(a.pow(&U256::ZERO), OrderField::ONE);
    }

    #[test]
    fn square_equals_mul() {
        let a = OrderField::from_u64(42);
        assert_eq!(a.square(), a * a);
    }

    #[test]
    fn byte_round_trip() {
        let a = OrderField::new(U256::from_be_hex(
            "ac81a9587b8da43a9519bd50d96191fd8f2c4f66b8f1550e366e3c7f9ed18897",
        ));
        assert_eq!(OrderField::from_be_bytes(a.to_be_bytes()), a);
        assert_eq!(OrderField::from_be_bytes(OrderField::ZERO.to_be_bytes()), OrderField::ZERO);

        // decoding reduces non-canonical input
        let max = OrderField::from_be_bytes([0xff; 32]);
        assert!(max.inner() < &OrderParams::MODULUS);
    }

    #[test]
    fn conditional_select() {
        let a = OrderField::from_u64(1);
        let b = OrderField::from_u64(2);
        assert_eq!(OrderField::conditional_select(&a, &b, Choice::from(0)), a);
        assert_eq!(OrderField::conditional_select(&a, &b, Choice::from(1)), b);
    }

    #[test]
    fn random_is_reduced() {
        let mut rng = rand_core::OsRng;
        for _ in 0..10 {
            let a = SmallField::random(&mut rng);
            assert!(a.inner() < &SmallParams::MODULUS);
        }
    }
}
