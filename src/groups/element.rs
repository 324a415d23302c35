use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConditionallySelectable};

use crate::fields::field::Field;
use crate::groups::affine_element::AffineElement;
use crate::groups::curve_params::{BaseField, CurveParams, Scalar};
use crate::groups::scalar_mul;

/// A curve point in homogeneous projective coordinates `(X : Y : Z)`,
/// representing the affine point `(X/Z, Y/Z)`. The identity is `(0 : 1 : 0)`.
///
/// Addition and doubling use complete formulas: a single branch-free code
/// path covers `P + Q`, `P + P`, `P + (-P)` and identity operands. That
/// uniformity is what the constant-time scalar multiplication in
/// [`crate::groups::scalar_mul`] relies on.
pub struct Element<C: CurveParams> {
    x: BaseField<C>,
    y: BaseField<C>,
    z: BaseField<C>,
}

impl<C: CurveParams> Clone for Element<C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParams> Copy for Element<C> {}

impl<C: CurveParams> std::fmt::Debug for Element<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_identity() {
            write!(f, "Element(identity)")
        } else {
            write!(f, "Element({:?}, {:?}, {:?})", self.x, self.y, self.z)
        }
    }
}

// ---------------------------------------------------------------------------
// Constructors and accessors
// ---------------------------------------------------------------------------

impl<C: CurveParams> Element<C> {
    /// The identity element.
    pub const IDENTITY: Self = Self {
        x: Field::ZERO,
        y: Field::ONE,
        z: Field::ZERO,
    };

    /// The curve's generator point.
    pub const GENERATOR: Self = Self {
        x: Field::new_unchecked(C::GENERATOR_X),
        y: Field::new_unchecked(C::GENERATOR_Y),
        z: Field::ONE,
    };

    /// Construct from raw projective coordinates. The coordinates are not
    /// checked against the curve equation; use [`AffineElement::new`] for
    /// untrusted input.
    pub const fn new_unchecked(x: BaseField<C>, y: BaseField<C>, z: BaseField<C>) -> Self {
        Self { x, y, z }
    }

    /// A uniformly random group element (random scalar times the generator).
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self::GENERATOR.mul(&Scalar::<C>::random(rng))
    }

    pub fn x(&self) -> &BaseField<C> {
        &self.x
    }

    pub fn y(&self) -> &BaseField<C> {
        &self.y
    }

    pub fn z(&self) -> &BaseField<C> {
        &self.z
    }

    /// On-curve points with `z == 0` are exactly the identity class.
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Check the projective curve equation
    /// `y^2*z == x^3 + a*x*z^2 + b*z^3`.
    pub fn is_on_curve(&self) -> bool {
        let y2z = self.y.square() * self.z;
        let x3 = self.x.square() * self.x;
        let z2 = self.z.square();
        let axz2 = C::coeff_a() * self.x * z2;
        let bz3 = C::coeff_b() * z2 * self.z;
        y2z == x3 + axz2 + bz3
    }
}

// ---------------------------------------------------------------------------
// Group law
// ---------------------------------------------------------------------------

impl<C: CurveParams> Element<C> {
    /// Complete projective addition (Renes-Costello-Batina, generic `a`).
    ///
    /// Valid for every pair of inputs including doubling, inverse pairs and
    /// the identity; contains no data-dependent branches.
    pub fn add_complete(&self, rhs: &Self) -> Self {
        let a = C::coeff_a();
        let b3 = C::coeff_b() + C::coeff_b() + C::coeff_b();

        let t0 = self.x * rhs.x;
        let t1 = self.y * rhs.y;
        let t2 = self.z * rhs.z;

        // t3 = x1*y2 + x2*y1
        let mut t3 = (self.x + self.y) * (rhs.x + rhs.y);
        t3 -= t0 + t1;
        // t4 = x1*z2 + x2*z1
        let mut t4 = (self.x + self.z) * (rhs.x + rhs.z);
        t4 -= t0 + t2;
        // t5 = y1*z2 + y2*z1
        let mut t5 = (self.y + self.z) * (rhs.y + rhs.z);
        t5 -= t1 + t2;

        let w = a * t4 + b3 * t2;
        let u = t1 - w;
        let v = t1 + w;

        // m = 3*x1*x2 + a*z1*z2
        let m = t0 + t0 + t0 + a * t2;
        // n = 3*b*(x1*z2 + x2*z1) + a*(x1*x2 - a*z1*z2)
        let n = b3 * t4 + a * (t0 - a * t2);

        Self {
            x: u * t3 - n * t5,
            y: u * v + m * n,
            z: v * t5 + m * t3,
        }
    }

    pub fn double(&self) -> Self {
        self.add_complete(self)
    }

    /// Convert to affine form. The identity class (`z == 0`) maps to the
    /// affine identity; everything else is divided through by `z`.
    pub fn to_affine(&self) -> AffineElement<C> {
        match self.z.invert() {
            Ok(z_inv) => AffineElement::new_unchecked(self.x * z_inv, self.y * z_inv),
            // z == 0 encodes the identity
            Err(_) => AffineElement::IDENTITY,
        }
    }

    /// Convert a batch of points to affine (`z == 1`) form in place using a
    /// single field inversion (Montgomery's trick). Identity points are left
    /// untouched.
    pub fn batch_normalize(elements: &mut [Self]) {
        if elements.is_empty() {
            return;
        }

        // Forward pass: prefix products of the z-coordinates.
        let mut prefixes = Vec::with_capacity(elements.len());
        let mut accumulator = BaseField::<C>::ONE;
        for element in elements.iter() {
            prefixes.push(accumulator);
            if !element.is_identity() {
                accumulator *= element.z;
            }
        }

        // One inversion for the whole batch; the accumulated product is a
        // product of nonzero values.
        let mut accumulator = accumulator.invert().unwrap_or(BaseField::<C>::ONE);

        // Backward pass: peel off individual z-inverses.
        for (element, prefix) in elements.iter_mut().zip(prefixes).rev() {
            if !element.is_identity() {
                let z_inv = accumulator * prefix;
                accumulator *= element.z;
                element.x *= z_inv;
                element.y *= z_inv;
                element.z = BaseField::<C>::ONE;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scalar multiplication (delegating to the engine)
// ---------------------------------------------------------------------------

impl<C: CurveParams> Element<C> {
    /// `scalar * self`, constant-time. See [`scalar_mul::mul`].
    pub fn mul(&self, scalar: &Scalar<C>) -> Self {
        scalar_mul::mul(self, scalar)
    }

    /// `scalar * self`, variable-time. Public scalars only.
    pub fn mul_vartime(&self, scalar: &Scalar<C>) -> Self {
        scalar_mul::mul_vartime(self, scalar)
    }

    /// `d * self + e * other` in one pass, constant-time.
    pub fn double_mul(&self, d: &Scalar<C>, other: &Self, e: &Scalar<C>) -> Self {
        scalar_mul::double_mul(d, self, e, other)
    }

    /// `d * self + e * other`, variable-time. Public scalars only.
    pub fn double_mul_vartime(&self, d: &Scalar<C>, other: &Self, e: &Scalar<C>) -> Self {
        scalar_mul::double_mul_vartime(d, self, e, other)
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<C: CurveParams> std::ops::Add for Element<C> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add_complete(&rhs)
    }
}

impl<'a, 'b, C: CurveParams> std::ops::Add<&'b Element<C>> for &'a Element<C> {
    type Output = Element<C>;
    #[inline]
    fn add(self, rhs: &'b Element<C>) -> Element<C> {
        self.add_complete(rhs)
    }
}

impl<C: CurveParams> std::ops::AddAssign for Element<C> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.add_complete(&rhs);
    }
}

impl<C: CurveParams> std::ops::Add<AffineElement<C>> for Element<C> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: AffineElement<C>) -> Self {
        self.add_complete(&Element::from(rhs))
    }
}

impl<C: CurveParams> std::ops::Sub for Element<C> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.add_complete(&-rhs)
    }
}

impl<'a, 'b, C: CurveParams> std::ops::Sub<&'b Element<C>> for &'a Element<C> {
    type Output = Element<C>;
    #[inline]
    fn sub(self, rhs: &'b Element<C>) -> Element<C> {
        self.add_complete(&-*rhs)
    }
}

impl<C: CurveParams> std::ops::SubAssign for Element<C> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.add_complete(&-rhs);
    }
}

impl<C: CurveParams> std::ops::Neg for Element<C> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl<C: CurveParams> std::ops::Mul<Scalar<C>> for Element<C> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Scalar<C>) -> Self {
        Element::mul(&self, &rhs)
    }
}

impl<'a, 'b, C: CurveParams> std::ops::Mul<&'b Scalar<C>> for &'a Element<C> {
    type Output = Element<C>;
    #[inline]
    fn mul(self, rhs: &'b Scalar<C>) -> Element<C> {
        Element::mul(self, rhs)
    }
}

/// Projective equality: cross-multiply to compare the underlying affine
/// points without inverting.
impl<C: CurveParams> PartialEq for Element<C> {
    fn eq(&self, other: &Self) -> bool {
        let x_cross = self.x * other.z == other.x * self.z;
        let y_cross = self.y * other.z == other.y * self.z;
        x_cross && y_cross
    }
}

impl<C: CurveParams> Eq for Element<C> {}

impl<C: CurveParams> ConditionallySelectable for Element<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: BaseField::<C>::conditional_select(&a.x, &b.x, choice),
            y: BaseField::<C>::conditional_select(&a.y, &b.y, choice),
            z: BaseField::<C>::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<C: CurveParams> From<AffineElement<C>> for Element<C> {
    fn from(affine: AffineElement<C>) -> Self {
        match (affine.x(), affine.y()) {
            (Some(x), Some(y)) => Self::new_unchecked(*x, *y, Field::ONE),
            _ => Self::IDENTITY,
        }
    }
}

impl<C: CurveParams> From<&AffineElement<C>> for Element<C> {
    fn from(affine: &AffineElement<C>) -> Self {
        Self::from(*affine)
    }
}
