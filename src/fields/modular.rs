// Modular arithmetic over a runtime modulus.
//
// Everything here operates on plain `U256` values paired with an explicit
// modulus, so the same routines serve both the typed `Field<P>` elements
// (which fix the modulus at the type level) and runtime curve definitions
// (where the modulus is only known when the parameter set is built).
//
// Operands are expected to be already reduced into `[0, modulus)`; every
// function returns a reduced value. The modulus must be greater than one.

use crypto_bigint::{Encoding, U256, U512, Zero};
use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConditionallySelectable};

use crate::Error;

const TWO: U256 = U256::from_u8(2);

/// Reduce an arbitrary 256-bit value into `[0, modulus)`.
pub fn reduce(value: &U256, modulus: &U256) -> U256 {
    // NOTE unwrap is fine: the modulus is nonzero by the trait/validation
    // contract.
    let (_, remainder) = value.div_rem(&modulus.to_nz().unwrap());
    remainder
}

/// `(lhs + rhs) mod modulus`, constant-time.
pub fn add_mod(lhs: &U256, rhs: &U256, modulus: &U256) -> U256 {
    lhs.add_mod(rhs, modulus)
}

/// `(lhs - rhs) mod modulus`, constant-time.
pub fn sub_mod(lhs: &U256, rhs: &U256, modulus: &U256) -> U256 {
    lhs.sub_mod(rhs, modulus)
}

/// `-value mod modulus`, constant-time.
pub fn neg_mod(value: &U256, modulus: &U256) -> U256 {
    value.neg_mod(modulus)
}

/// Zero-extend to 512 bits (limbs are little-endian).
fn widen(value: &U256) -> U512 {
    let words = value.to_words();
    U512::from_words([words[0], words[1], words[2], words[3], 0, 0, 0, 0])
}

/// `(lhs * rhs) mod modulus`.
///
/// The product is formed in 512 bits and reduced with a constant-time
/// division, so no intermediate wider than the modulus escapes.
pub fn mul_mod(lhs: &U256, rhs: &U256, modulus: &U256) -> U256 {
    let product = widen(lhs).wrapping_mul(&widen(rhs));
    // NOTE unwrap is fine: the modulus is nonzero.
    let (_, remainder) = product.div_rem(&widen(modulus).to_nz().unwrap());

    // remainder < modulus < 2^256, so the upper half is zero
    let words = remainder.to_words();
    U256::from_words([words[0], words[1], words[2], words[3]])
}

/// `base^exponent mod modulus` in constant time.
///
/// Fixed 256 iterations over the exponent bits from least significant to
/// most significant. Every iteration performs both the squaring and the
/// multiply; the multiply's result is kept or discarded with a constant-time
/// select, never a branch, so the running time is independent of the
/// exponent's bit pattern.
pub fn exp_mod(base: &U256, exponent: &U256, modulus: &U256) -> U256 {
    let mut result = U256::ONE;
    let mut power = reduce(base, modulus);
    let words = exponent.to_words();

    for i in 0..U256::BITS as usize {
        let bit = Choice::from(((words[i / 64] >> (i % 64)) & 1) as u8);
        let multiplied = mul_mod(&result, &power, modulus);
        result = U256::conditional_select(&result, &multiplied, bit);
        power = mul_mod(&power, &power, modulus);
    }
    result
}

/// `base^exponent mod modulus`, variable-time in the exponent.
///
/// Square-and-multiply that skips the multiply on zero bits and stops at the
/// exponent's highest set bit. Only for public exponents; secret exponents
/// must go through [`exp_mod`].
pub fn exp_mod_vartime(base: &U256, exponent: &U256, modulus: &U256) -> U256 {
    let mut result = U256::ONE;
    let mut power = reduce(base, modulus);
    let words = exponent.to_words();

    for i in 0..exponent.bits_vartime() as usize {
        if (words[i / 64] >> (i % 64)) & 1 == 1 {
            result = mul_mod(&result, &power, modulus);
        }
        power = mul_mod(&power, &power, modulus);
    }
    result
}

/// Multiplicative inverse via Fermat's little theorem: `value^(modulus - 2)`.
///
/// Runs in constant time for nonzero inputs. Fails with
/// [`Error::DivisionByZero`] when `value` is zero; division is only defined
/// through this inverse.
pub fn inv_mod(value: &U256, modulus: &U256) -> Result<U256, Error> {
    if bool::from(value.is_zero()) {
        return Err(Error::DivisionByZero);
    }
    let exponent = modulus.wrapping_sub(&TWO);
    Ok(exp_mod(value, &exponent, modulus))
}

/// Sample a uniform value in `[0, modulus)` by rejection.
pub fn random_mod<R: CryptoRng + RngCore>(rng: &mut R, modulus: &U256) -> U256 {
    loop {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        let candidate = U256::from_be_bytes(bytes);
        if candidate < *modulus {
            return candidate;
        }
    }
}
