use crate::fields::field::Field;
use crate::groups::curve_params::{BaseField, CurveParams};
use crate::groups::element::Element;
use crate::Error;

/// A curve point in affine form: either the identity ("point at infinity")
/// or a coordinate pair satisfying the curve equation.
///
/// Value type with no mutation after construction. The checked constructor
/// is the only public way to build a point from untrusted coordinates.
pub struct AffineElement<C: CurveParams> {
    coordinates: Option<(BaseField<C>, BaseField<C>)>,
}

impl<C: CurveParams> Clone for AffineElement<C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParams> Copy for AffineElement<C> {}

impl<C: CurveParams> std::fmt::Debug for AffineElement<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.coordinates {
            None => write!(f, "AffineElement(identity)"),
            Some((x, y)) => write!(f, "AffineElement({:?}, {:?})", x, y),
        }
    }
}

impl<C: CurveParams> AffineElement<C> {
    /// The identity element.
    pub const IDENTITY: Self = Self { coordinates: None };

    /// The curve's generator point.
    pub const GENERATOR: Self = Self {
        coordinates: Some((
            Field::new_unchecked(C::GENERATOR_X),
            Field::new_unchecked(C::GENERATOR_Y),
        )),
    };

    /// Construct a point from coordinates, verifying the curve equation.
    ///
    /// Fails with [`Error::PointNotOnCurve`] if `(x, y)` does not satisfy
    /// `y^2 = x^3 + a*x + b`.
    pub fn new(x: BaseField<C>, y: BaseField<C>) -> Result<Self, Error> {
        let point = Self::new_unchecked(x, y);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::PointNotOnCurve)
        }
    }

    /// Construct a point from coordinates without checking the curve
    /// equation. For trusted inputs (constants, outputs of group
    /// operations); feeding an off-curve point into group arithmetic
    /// produces garbage results.
    pub const fn new_unchecked(x: BaseField<C>, y: BaseField<C>) -> Self {
        Self {
            coordinates: Some((x, y)),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.coordinates.is_none()
    }

    /// The x-coordinate; `None` for the identity.
    pub fn x(&self) -> Option<&BaseField<C>> {
        self.coordinates.as_ref().map(|(x, _)| x)
    }

    /// The y-coordinate; `None` for the identity.
    pub fn y(&self) -> Option<&BaseField<C>> {
        self.coordinates.as_ref().map(|(_, y)| y)
    }

    /// Check `y^2 == x^3 + a*x + b`. The identity is on every curve.
    pub fn is_on_curve(&self) -> bool {
        match &self.coordinates {
            None => true,
            Some((x, y)) => {
                let rhs = x.square() * *x + C::coeff_a() * *x + C::coeff_b();
                y.square() == rhs
            }
        }
    }
}

impl<C: CurveParams> PartialEq for AffineElement<C> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.coordinates, &other.coordinates) {
            (None, None) => true,
            (Some((x0, y0)), Some((x1, y1))) => x0 == x1 && y0 == y1,
            _ => false,
        }
    }
}

impl<C: CurveParams> Eq for AffineElement<C> {}

impl<C: CurveParams> std::ops::Neg for AffineElement<C> {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            coordinates: self.coordinates.map(|(x, y)| (x, -y)),
        }
    }
}

impl<C: CurveParams> From<Element<C>> for AffineElement<C> {
    fn from(element: Element<C>) -> Self {
        element.to_affine()
    }
}

impl<C: CurveParams> From<&Element<C>> for AffineElement<C> {
    fn from(element: &Element<C>) -> Self {
        element.to_affine()
    }
}
