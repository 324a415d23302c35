use crypto_bigint::U256;

/// Trait defining the parameters of a prime field.
///
/// Implementors are zero-sized marker types; the modulus lives at the type
/// level so that elements of different fields are different Rust types and
/// cannot be mixed. `MODULUS` must be an odd prime greater than three;
/// see [`crate::curves::CurveDefinition`] for runtime validation of
/// parameter sets before they are promoted to types.
pub trait FieldParams: 'static + Send + Sync + Sized {
    /// The prime modulus.
    const MODULUS: U256;
}
