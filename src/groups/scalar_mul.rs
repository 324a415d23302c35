// Scalar multiplication engine.
//
// Two disciplines, chosen by the caller:
//
// - constant-time (`mul`, `double_mul`): fixed iteration counts, both the
//   "add" and the "skip" value computed every round, the result picked with
//   a constant-time select. For secret scalars (private keys, nonces).
// - variable-time (`*_vartime`): windowed multiplication that branches on
//   scalar digits. Faster; strictly for public scalars (e.g. verification).
//
// Scalars arrive already reduced modulo the group order, since `Scalar<C>`
// enforces that invariant by construction. A zero scalar yields the
// identity.

use crypto_bigint::U256;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::groups::curve_params::{CurveParams, Scalar};
use crate::groups::element::Element;

const WINDOW_BITS: usize = 4;

#[inline]
fn bit(words: &[u64; 4], index: usize) -> u64 {
    (words[index / 64] >> (index % 64)) & 1
}

/// `scalar * point` in constant time.
///
/// Double-and-add-always over all 256 bits, most significant first. Each
/// iteration doubles the accumulator, computes the added value with the
/// complete addition formula, and keeps it or not via a constant-time
/// select; control flow and memory access never depend on the scalar.
pub fn mul<C: CurveParams>(point: &Element<C>, scalar: &Scalar<C>) -> Element<C> {
    let words = scalar.inner().to_words();
    let mut accumulator = Element::<C>::IDENTITY;

    for i in (0..U256::BITS as usize).rev() {
        accumulator = accumulator.double();
        let with_point = accumulator.add_complete(point);
        let take = Choice::from(bit(&words, i) as u8);
        accumulator = Element::conditional_select(&accumulator, &with_point, take);
    }
    accumulator
}

/// `scalar * point`, variable-time.
///
/// Fixed 4-bit windows over a 16-entry table of small multiples; skips the
/// addition on zero windows and starts at the scalar's highest set bit.
pub fn mul_vartime<C: CurveParams>(point: &Element<C>, scalar: &Scalar<C>) -> Element<C> {
    let mut table = [Element::<C>::IDENTITY; 1 << WINDOW_BITS];
    for i in 1..table.len() {
        table[i] = table[i - 1].add_complete(point);
    }

    let words = scalar.inner().to_words();
    let windows = (scalar.inner().bits_vartime() as usize + WINDOW_BITS - 1) / WINDOW_BITS;

    let mut accumulator = Element::<C>::IDENTITY;
    for w in (0..windows).rev() {
        for _ in 0..WINDOW_BITS {
            accumulator = accumulator.double();
        }
        let digit = ((words[w / 16] >> ((w % 16) * WINDOW_BITS)) & 0xf) as usize;
        if digit != 0 {
            accumulator = accumulator.add_complete(&table[digit]);
        }
    }
    accumulator
}

/// `d * p + e * q` in one constant-time pass (Straus's trick).
///
/// One shared doubling per bit; the addend is looked up in the
/// `{identity, P, Q, P+Q}` table by reading every entry and selecting with
/// `ct_eq`, then added unconditionally. The complete formula makes adding
/// the identity a no-op, so zero bit pairs cost the same as any other.
pub fn double_mul<C: CurveParams>(
    d: &Scalar<C>,
    p: &Element<C>,
    e: &Scalar<C>,
    q: &Element<C>,
) -> Element<C> {
    let table = [
        Element::<C>::IDENTITY,
        *p,
        *q,
        p.add_complete(q),
    ];

    let d_words = d.inner().to_words();
    let e_words = e.inner().to_words();
    let mut accumulator = Element::<C>::IDENTITY;

    for i in (0..U256::BITS as usize).rev() {
        accumulator = accumulator.double();
        let index = (bit(&d_words, i) | (bit(&e_words, i) << 1)) as u8;

        let mut addend = table[0];
        for (j, entry) in table.iter().enumerate().skip(1) {
            addend.conditional_assign(entry, index.ct_eq(&(j as u8)));
        }
        accumulator = accumulator.add_complete(&addend);
    }
    accumulator
}

/// `d * p + e * q`, variable-time. Public scalars only.
pub fn double_mul_vartime<C: CurveParams>(
    d: &Scalar<C>,
    p: &Element<C>,
    e: &Scalar<C>,
    q: &Element<C>,
) -> Element<C> {
    let table = [
        Element::<C>::IDENTITY,
        *p,
        *q,
        p.add_complete(q),
    ];

    let d_words = d.inner().to_words();
    let e_words = e.inner().to_words();
    let bits = d.inner().bits_vartime().max(e.inner().bits_vartime()) as usize;

    let mut accumulator = Element::<C>::IDENTITY;
    for i in (0..bits).rev() {
        accumulator = accumulator.double();
        let index = (bit(&d_words, i) | (bit(&e_words, i) << 1)) as usize;
        if index != 0 {
            accumulator = accumulator.add_complete(&table[index]);
        }
    }
    accumulator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{Secp256k1, Tom256k1};
    use crate::U256;

    type SecElement = Element<Secp256k1>;
    type SecScalar = Scalar<Secp256k1>;
    type TomElement = Element<Tom256k1>;
    type TomScalar = Scalar<Tom256k1>;

    fn naive_mul<C: CurveParams>(point: &Element<C>, count: u64) -> Element<C> {
        let mut sum = Element::<C>::IDENTITY;
        for _ in 0..count {
            sum += *point;
        }
        sum
    }

    #[test]
    fn ladder_matches_repeated_addition() {
        let g = SecElement::GENERATOR;
        for count in [0u64, 1, 2, 3, 12, 255, 256] {
            let expected = naive_mul(&g, count);
            assert_eq!(mul(&g, &SecScalar::from_u64(count)), expected);
            assert_eq!(mul_vartime(&g, &SecScalar::from_u64(count)), expected);
        }
    }

    #[test]
    fn ladder_matches_repeated_addition_tom() {
        let g = TomElement::GENERATOR;
        for count in [0u64, 1, 7, 12, 100] {
            let expected = naive_mul(&g, count);
            assert_eq!(mul(&g, &TomScalar::from_u64(count)), expected);
            assert_eq!(mul_vartime(&g, &TomScalar::from_u64(count)), expected);
        }
    }

    #[test]
    fn zero_scalar_gives_identity() {
        let g = SecElement::GENERATOR;
        assert_eq!(mul(&g, &SecScalar::ZERO), SecElement::IDENTITY);
        assert_eq!(mul_vartime(&g, &SecScalar::ZERO), SecElement::IDENTITY);
    }

    #[test]
    fn order_times_generator_is_identity() {
        // n * G = O, exercised through n - 1 (the ladder reduces n to zero
        // before it ever reaches this code)
        let g = SecElement::GENERATOR;
        let n_minus_one = SecScalar::ZERO - SecScalar::ONE;
        let almost = mul(&g, &n_minus_one);
        assert_eq!(almost + g, SecElement::IDENTITY);
        assert_eq!(almost, -g);
    }

    #[test]
    fn constant_time_and_vartime_agree_on_large_scalars() {
        let d = SecScalar::new(U256::from_be_hex(
            "c51e4753afdec1e6b6c6a5b992f43f8dd0c7a8933072708b6522468b2ffb06fd",
        ));
        let g = SecElement::GENERATOR;
        assert_eq!(mul(&g, &d), mul_vartime(&g, &d));
    }

    #[test]
    fn double_mul_matches_two_multiplications() {
        let d = TomScalar::new(U256::from_be_hex(
            "c51e4753afdec1e6b6c6a5b992f43f8dd0c7a8933072708b6522468b2ffb06fd",
        ));
        let e = TomScalar::new(U256::from_be_hex(
            "d37f628ece72a462f0145cbefe3f0b355ee8332d37acdd83a358016aea029db7",
        ));
        let g = TomElement::GENERATOR;
        let h = mul(&g, &TomScalar::from_u64(250));

        let expected = mul(&g, &d) + mul(&h, &e);
        assert_eq!(double_mul(&d, &g, &e, &h), expected);
        assert_eq!(double_mul_vartime(&d, &g, &e, &h), expected);
    }

    #[test]
    fn double_mul_small_scalar_pairs() {
        let g = TomElement::GENERATOR;
        let h = mul(&g, &TomScalar::from_u64(250));
        for (a, b) in [(3u64, 12u64), (36, 220), (189, 89), (92, 105)] {
            let a = TomScalar::from_u64(a);
            let b = TomScalar::from_u64(b);
            let expected = mul(&h, &a) + mul(&g, &b);
            assert_eq!(double_mul(&a, &h, &b, &g), expected);
            assert_eq!(double_mul(&b, &g, &a, &h), expected);
        }
    }

    #[test]
    fn double_mul_with_zero_scalars() {
        let g = SecElement::GENERATOR;
        let h = g.double();
        let e = SecScalar::from_u64(5);
        assert_eq!(double_mul(&SecScalar::ZERO, &g, &e, &h), mul(&h, &e));
        assert_eq!(
            double_mul(&SecScalar::ZERO, &g, &SecScalar::ZERO, &h),
            SecElement::IDENTITY
        );
    }
}
