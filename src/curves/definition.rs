// Runtime curve parameter sets.
//
// `CurveDefinition` is the validated form of a parameter tuple
// `(name, p, a, b, n, Gx, Gy)`. Construction re-derives every claimed
// property instead of trusting it: primality of both moduli, the
// non-singularity of the curve, the generator's membership, and that the
// stated order actually annihilates the generator. A definition that exists
// is therefore a well-formed curve.
//
// `CheckedPoint` provides textbook affine arithmetic over a definition. It
// is variable-time and exists for parameter validation and for ad-hoc curves
// assembled at runtime; secret scalars belong on the typed engine in
// `crate::groups`.

use crypto_bigint::{U256, Zero};
use rand_core::OsRng;

use crate::fields::modular;
use crate::Error;

/// A validated set of short-Weierstrass curve parameters.
///
/// Immutable once constructed; every accessor returns the canonical reduced
/// value that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveDefinition {
    name: &'static str,
    prime_modulus: U256,
    coeff_a: U256,
    coeff_b: U256,
    order: U256,
    generator_x: U256,
    generator_y: U256,
}

impl CurveDefinition {
    /// Validate and construct a curve parameter set.
    ///
    /// Fails with [`Error::InvalidCurve`] naming the first check that
    /// rejected the input:
    /// - `p` must be an odd prime and `a, b, Gx, Gy` canonical in `[0, p)`;
    /// - the discriminant `4a^3 + 27b^2` must be nonzero mod `p`;
    /// - `(Gx, Gy)` must satisfy `y^2 = x^3 + a*x + b`;
    /// - `n` must be prime and `n * G` must be the identity. Together with
    ///   the Hasse bound this pins `n` as the exact order of the generated
    ///   group, so a wrong hardcoded order cannot slip through.
    pub fn new(
        name: &'static str,
        prime_modulus: U256,
        coeff_a: U256,
        coeff_b: U256,
        order: U256,
        generator_x: U256,
        generator_y: U256,
    ) -> Result<Self, Error> {
        let p = &prime_modulus;

        if p.to_words()[0] & 1 == 0 {
            return Err(Error::InvalidCurve("field modulus is even"));
        }
        if !is_prime(p) {
            return Err(Error::InvalidCurve("field modulus is not prime"));
        }
        for value in [&coeff_a, &coeff_b, &generator_x, &generator_y] {
            if value >= p {
                return Err(Error::InvalidCurve("parameter is not reduced"));
            }
        }

        // 4a^3 + 27b^2 != 0 (mod p), otherwise the curve is singular
        let a_cubed = modular::mul_mod(&modular::mul_mod(&coeff_a, &coeff_a, p), &coeff_a, p);
        let b_squared = modular::mul_mod(&coeff_b, &coeff_b, p);
        let discriminant = modular::add_mod(
            &modular::mul_mod(&U256::from_u8(4), &a_cubed, p),
            &modular::mul_mod(&U256::from_u8(27), &b_squared, p),
            p,
        );
        if bool::from(discriminant.is_zero()) {
            return Err(Error::InvalidCurve("curve is singular"));
        }

        if !satisfies_equation(p, &coeff_a, &coeff_b, &generator_x, &generator_y) {
            return Err(Error::InvalidCurve("generator is not on the curve"));
        }

        if !is_prime(&order) {
            return Err(Error::InvalidCurve("order is not prime"));
        }

        let generator = Some((generator_x, generator_y));
        if scalar_mul_raw(p, &coeff_a, &order, generator).is_some() {
            return Err(Error::InvalidCurve("order does not annihilate the generator"));
        }

        Ok(Self {
            name,
            prime_modulus,
            coeff_a,
            coeff_b,
            order,
            generator_x,
            generator_y,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn prime_modulus(&self) -> &U256 {
        &self.prime_modulus
    }

    pub fn coeff_a(&self) -> &U256 {
        &self.coeff_a
    }

    pub fn coeff_b(&self) -> &U256 {
        &self.coeff_b
    }

    pub fn order(&self) -> &U256 {
        &self.order
    }

    pub fn generator_x(&self) -> &U256 {
        &self.generator_x
    }

    pub fn generator_y(&self) -> &U256 {
        &self.generator_y
    }
}

fn is_prime(value: &U256) -> bool {
    crypto_primes::is_prime_with_rng(&mut OsRng, value)
}

fn satisfies_equation(p: &U256, a: &U256, b: &U256, x: &U256, y: &U256) -> bool {
    let x_cubed = modular::mul_mod(&modular::mul_mod(x, x, p), x, p);
    let ax = modular::mul_mod(a, x, p);
    let rhs = modular::add_mod(&modular::add_mod(&x_cubed, &ax, p), b, p);
    modular::mul_mod(y, y, p) == rhs
}

// Affine point arithmetic over raw parameters. `None` is the identity.
// Inputs must be on the curve; the chord-and-tangent case split then
// guarantees every inverted denominator is nonzero.
type RawPoint = Option<(U256, U256)>;

fn add_raw(p: &U256, a: &U256, lhs: RawPoint, rhs: RawPoint) -> RawPoint {
    let (x1, y1) = match lhs {
        None => return rhs,
        Some(coords) => coords,
    };
    let (x2, y2) = match rhs {
        None => return lhs,
        Some(coords) => coords,
    };

    let lambda = if x1 == x2 {
        if bool::from(modular::add_mod(&y1, &y2, p).is_zero()) {
            // inverse points (this also covers doubling a point with y = 0)
            return None;
        }
        // tangent: (3*x^2 + a) / (2*y)
        let numerator = modular::add_mod(
            &modular::mul_mod(&U256::from_u8(3), &modular::mul_mod(&x1, &x1, p), p),
            a,
            p,
        );
        let denominator = modular::add_mod(&y1, &y1, p);
        let Ok(inverse) = modular::inv_mod(&denominator, p) else {
            // 2y == 0 was handled by the inverse-points case above
            return None;
        };
        modular::mul_mod(&numerator, &inverse, p)
    } else {
        // chord: (y2 - y1) / (x2 - x1)
        let numerator = modular::sub_mod(&y2, &y1, p);
        let denominator = modular::sub_mod(&x2, &x1, p);
        let Ok(inverse) = modular::inv_mod(&denominator, p) else {
            // x2 != x1 in this branch
            return None;
        };
        modular::mul_mod(&numerator, &inverse, p)
    };

    let lambda_squared = modular::mul_mod(&lambda, &lambda, p);
    let x3 = modular::sub_mod(&modular::sub_mod(&lambda_squared, &x1, p), &x2, p);
    let y3 = modular::sub_mod(
        &modular::mul_mod(&lambda, &modular::sub_mod(&x1, &x3, p), p),
        &y1,
        p,
    );
    Some((x3, y3))
}

fn scalar_mul_raw(p: &U256, a: &U256, scalar: &U256, point: RawPoint) -> RawPoint {
    let words = scalar.to_words();
    let mut accumulator = None;
    for i in (0..scalar.bits_vartime() as usize).rev() {
        accumulator = add_raw(p, a, accumulator, accumulator);
        if (words[i / 64] >> (i % 64)) & 1 == 1 {
            accumulator = add_raw(p, a, accumulator, point);
        }
    }
    accumulator
}

/// A point on a runtime-defined curve: the identity or an affine pair, plus
/// a reference to the curve it lives on.
///
/// Binary operations verify that both operands reference the same parameter
/// set and fail with [`Error::CurveMismatch`] otherwise. All arithmetic here
/// is variable-time.
#[derive(Clone, Copy, Debug)]
pub struct CheckedPoint<'a> {
    curve: &'a CurveDefinition,
    coordinates: Option<(U256, U256)>,
}

impl<'a> CheckedPoint<'a> {
    pub fn identity(curve: &'a CurveDefinition) -> Self {
        Self {
            curve,
            coordinates: None,
        }
    }

    pub fn generator(curve: &'a CurveDefinition) -> Self {
        Self {
            curve,
            coordinates: Some((curve.generator_x, curve.generator_y)),
        }
    }

    /// Construct from affine coordinates, verifying the curve equation.
    pub fn new(curve: &'a CurveDefinition, x: U256, y: U256) -> Result<Self, Error> {
        let p = &curve.prime_modulus;
        if &x >= p || &y >= p {
            return Err(Error::PointNotOnCurve);
        }
        if !satisfies_equation(p, &curve.coeff_a, &curve.coeff_b, &x, &y) {
            return Err(Error::PointNotOnCurve);
        }
        Ok(Self {
            curve,
            coordinates: Some((x, y)),
        })
    }

    pub fn curve(&self) -> &'a CurveDefinition {
        self.curve
    }

    pub fn is_identity(&self) -> bool {
        self.coordinates.is_none()
    }

    pub fn x(&self) -> Option<&U256> {
        self.coordinates.as_ref().map(|(x, _)| x)
    }

    pub fn y(&self) -> Option<&U256> {
        self.coordinates.as_ref().map(|(_, y)| y)
    }

    pub fn negate(&self) -> Self {
        Self {
            curve: self.curve,
            coordinates: self
                .coordinates
                .map(|(x, y)| (x, modular::neg_mod(&y, &self.curve.prime_modulus))),
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        if self.curve != other.curve {
            return Err(Error::CurveMismatch);
        }
        Ok(Self {
            curve: self.curve,
            coordinates: add_raw(
                &self.curve.prime_modulus,
                &self.curve.coeff_a,
                self.coordinates,
                other.coordinates,
            ),
        })
    }

    pub fn sub(&self, other: &Self) -> Result<Self, Error> {
        self.add(&other.negate())
    }

    pub fn double(&self) -> Self {
        Self {
            curve: self.curve,
            coordinates: add_raw(
                &self.curve.prime_modulus,
                &self.curve.coeff_a,
                self.coordinates,
                self.coordinates,
            ),
        }
    }

    /// `scalar * self`, with the scalar first reduced modulo the curve
    /// order. Variable-time.
    pub fn scalar_mul(&self, scalar: &U256) -> Self {
        let reduced = modular::reduce(scalar, &self.curve.order);
        Self {
            curve: self.curve,
            coordinates: scalar_mul_raw(
                &self.curve.prime_modulus,
                &self.curve.coeff_a,
                &reduced,
                self.coordinates,
            ),
        }
    }
}

impl PartialEq for CheckedPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.curve == other.curve && self.coordinates == other.coordinates
    }
}

impl Eq for CheckedPoint<'_> {}
