// Multi-scalar multiplication via the Bos-Coster algorithm.
//
// Repeatedly rewrites the two largest terms
// `a*P + b*Q  ->  (a-b)*P + b*(P+Q)` (for `a >= b`) until one term remains,
// trading scalar size for cheap point additions. Variable-time: the schedule
// depends on the scalar values, so this is for public inputs (batch
// verification style workloads), not secrets.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::groups::curve_params::{CurveParams, Scalar};
use crate::groups::element::Element;

/// A scalar-point pair queued for evaluation.
///
/// Ordered by scalar so the heap surfaces the largest term first.
pub struct Pair<C: CurveParams> {
    pub scalar: Scalar<C>,
    pub point: Element<C>,
}

impl<C: CurveParams> Clone for Pair<C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParams> Copy for Pair<C> {}

impl<C: CurveParams> PartialEq for Pair<C> {
    fn eq(&self, other: &Self) -> bool {
        self.scalar == other.scalar
    }
}

impl<C: CurveParams> Eq for Pair<C> {}

impl<C: CurveParams> PartialOrd for Pair<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: CurveParams> Ord for Pair<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scalar.cmp(&other.scalar)
    }
}

/// Accumulator for sums of scalar multiples `sum_i k_i * P_i`.
pub struct MultiMult<C: CurveParams> {
    pairs: Vec<Pair<C>>,
}

impl<C: CurveParams> Default for MultiMult<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CurveParams> MultiMult<C> {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Queue `scalar * point` for evaluation.
    pub fn insert(&mut self, point: Element<C>, scalar: Scalar<C>) {
        self.pairs.push(Pair { point, scalar });
    }

    /// Evaluate the queued sum. An empty accumulator evaluates to the
    /// identity.
    pub fn evaluate(&self) -> Element<C> {
        if self.pairs.is_empty() {
            return Element::<C>::IDENTITY;
        }
        if self.pairs.len() == 1 {
            return self.pairs[0].point.mul_vartime(&self.pairs[0].scalar);
        }

        let mut heap: BinaryHeap<Pair<C>> = self.pairs.iter().copied().collect();
        loop {
            // unwrap is fine: the pre-loop length checks and push below keep
            // the heap non-empty
            let largest = heap.pop().unwrap();
            let Some(mut second) = heap.peek_mut() else {
                return largest.point.mul_vartime(&largest.scalar);
            };

            let Pair {
                scalar: second_scalar,
                point: second_point,
            } = *second;

            if second_scalar == Scalar::<C>::ZERO {
                // every remaining term is zero
                return largest.point.mul_vartime(&largest.scalar);
            }

            // a*P + b*Q = (a-b)*P + b*(P+Q), with a >= b by heap order
            let reduced = Pair {
                point: largest.point,
                scalar: largest.scalar - second_scalar,
            };
            *second = Pair {
                point: largest.point + second_point,
                scalar: second_scalar,
            };
            drop(second);

            if reduced.scalar != Scalar::<C>::ZERO {
                heap.push(reduced);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::Secp256k1;
    use crate::U256;

    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    type SecElement = Element<Secp256k1>;
    type SecScalar = Scalar<Secp256k1>;

    #[test]
    fn empty_sum_is_identity() {
        let multimult = MultiMult::<Secp256k1>::new();
        assert_eq!(multimult.evaluate(), SecElement::IDENTITY);
    }

    #[test]
    fn single_term() {
        let mut multimult = MultiMult::<Secp256k1>::new();
        multimult.insert(SecElement::GENERATOR, SecScalar::ONE);
        assert_eq!(multimult.evaluate(), SecElement::GENERATOR);
    }

    #[test]
    fn equal_scalars_collapse() {
        let g = SecElement::GENERATOR;
        let scalar = SecScalar::from_u64(42);

        let mut multimult = MultiMult::<Secp256k1>::new();
        multimult.insert(g, scalar);
        multimult.insert(g.double(), scalar);

        let expected = g.mul(&scalar) + g.double().mul(&scalar);
        assert_eq!(multimult.evaluate(), expected);
    }

    #[test]
    fn matches_individual_multiplications() {
        let scalars = [
            "83fec693ac341a0f8f3f0e6a5b18af130f3fbc2b06a00ea55743fa89e031cb5e",
            "d125353892a829607afcb23febb06e84c9745f1bf040bc6d1b64672a3b9148fd",
            "f76c1fa7e623e38096a97fa0af4d19cce9a6d2cf62451f38d60245aed85e425f",
            "7fc351545f19ec3aecd29b4a5149a2fa56c0731cf34031e90eed16e2b78f1fa3",
        ]
        .map(|hex| SecScalar::new(U256::from_be_hex(hex)));

        let mut multimult = MultiMult::<Secp256k1>::new();
        let mut expected = SecElement::IDENTITY;
        let mut point = SecElement::GENERATOR;
        for scalar in scalars {
            expected += point.mul(&scalar);
            multimult.insert(point, scalar);
            point = point.double();
        }

        assert_eq!(multimult.evaluate(), expected);
    }

    #[test]
    fn random_terms() {
        let mut rng = ChaCha20Rng::seed_from_u64(54);
        let mut multimult = MultiMult::<Secp256k1>::new();
        let mut expected = SecElement::IDENTITY;
        for _ in 0..8 {
            let point = SecElement::random(&mut rng);
            let scalar = SecScalar::random(&mut rng);
            expected += point.mul(&scalar);
            multimult.insert(point, scalar);
        }
        assert_eq!(multimult.evaluate(), expected);
    }
}
