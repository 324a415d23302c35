pub mod affine_element;
pub mod curve_params;
pub mod element;
pub mod multi_mul;
pub mod scalar_mul;

pub use affine_element::AffineElement;
pub use curve_params::{BaseField, CurveParams, Cycle, Scalar};
pub use element::Element;
pub use multi_mul::MultiMult;
