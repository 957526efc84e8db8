// ============================================================================
// Wide 128-bit Integer
// Two-word signed arithmetic used as a precision-preserving intermediate
// ============================================================================

use crate::errors::{NumericError, NumericResult};
use std::cmp::Ordering;
use std::fmt;

/// Digit base of the long-division routines (2^32).
const BASE: u64 = 1 << 32;

/// Low 32-bit digit mask.
const LO_MASK: u64 = BASE - 1;

/// Signed 128-bit integer emulated as two 64-bit words.
///
/// `lo` holds the unsigned low-order bits and `hi` the sign-extended
/// high-order bits, so the pair represents the two's-complement value
/// `hi * 2^64 + lo` (with `lo` read as unsigned). For a value that fits in
/// 64 bits, `hi` is the arithmetic sign-extension of `lo`.
///
/// Values of this type only live for the duration of a single [`Amount`]
/// operation: the kernel lifts `(units, nanos)` pairs into `Wide128`, works
/// in 128-bit space, and projects the result back out with the exact
/// narrowing accessors. Every operation returns a fresh value; division
/// returns the `(quotient, remainder)` pair rather than overwriting an
/// operand, so there is no post-division aliasing hazard to reason about.
///
/// All arithmetic is carried out at the 64-bit word level with explicit
/// carry, borrow, and overflow handling. The [`i128`] conversions exist for
/// diagnostics and test oracles, not for computation.
///
/// [`Amount`]: crate::amount::Amount
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wide128 {
    lo: u64,
    hi: i64,
}

impl Wide128 {
    /// Zero value
    pub const ZERO: Self = Self { lo: 0, hi: 0 };

    /// Maximum representable value (2^127 - 1)
    pub const MAX: Self = Self {
        lo: u64::MAX,
        hi: i64::MAX,
    };

    /// Minimum representable value (-2^127)
    pub const MIN: Self = Self { lo: 0, hi: i64::MIN };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Sign-extend a 64-bit value into 128 bits.
    #[inline]
    pub const fn from_i64(value: i64) -> Self {
        Self {
            lo: value as u64,
            hi: value >> 63,
        }
    }

    /// Direct two-word construction.
    #[inline]
    pub const fn from_words(lo: u64, hi: i64) -> Self {
        Self { lo, hi }
    }

    /// Construct from a native 128-bit value (diagnostics / test oracle).
    #[inline]
    pub const fn from_i128(value: i128) -> Self {
        Self {
            lo: value as u64,
            hi: (value >> 64) as i64,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The unsigned low-order word.
    #[inline]
    pub const fn low(self) -> u64 {
        self.lo
    }

    /// The sign-extended high-order word.
    #[inline]
    pub const fn high(self) -> i64 {
        self.hi
    }

    /// Convert to the native 128-bit value (diagnostics / test oracle).
    #[inline]
    pub const fn to_i128(self) -> i128 {
        ((self.hi as i128) << 64) | (self.lo as u128 as i128)
    }

    /// Check if both words are zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Check if the value is negative (sign bit of the high word).
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.hi < 0
    }

    /// True iff the value survives narrowing to 64 bits: the high word must
    /// equal the sign-extension of the low word.
    #[inline]
    pub const fn fits_i64(self) -> bool {
        self.hi == (self.lo as i64) >> 63
    }

    /// True iff the value survives narrowing to 32 bits.
    #[inline]
    pub const fn fits_i32(self) -> bool {
        self.fits_i64() && (self.lo as i64) == (self.lo as i64 as i32) as i64
    }

    /// Narrow to 64 bits.
    ///
    /// # Errors
    /// Returns `Overflow` if the discarded high word is not the correct
    /// sign-extension.
    #[inline]
    pub fn to_i64_exact(self) -> NumericResult<i64> {
        if self.fits_i64() {
            Ok(self.lo as i64)
        } else {
            Err(NumericError::Overflow)
        }
    }

    /// Narrow to 32 bits.
    ///
    /// # Errors
    /// Returns `Overflow` if the value does not fit.
    #[inline]
    pub fn to_i32_exact(self) -> NumericResult<i32> {
        let value = self.to_i64_exact()?;
        i32::try_from(value).map_err(|_| NumericError::Overflow)
    }

    /// Leading zero count across both words (0..=128).
    #[inline]
    pub const fn leading_zeros(self) -> u32 {
        if self.hi != 0 {
            (self.hi as u64).leading_zeros()
        } else {
            64 + self.lo.leading_zeros()
        }
    }

    // ========================================================================
    // Additive Arithmetic
    // ========================================================================

    /// Add one, propagating the carry into the high word.
    ///
    /// # Errors
    /// Returns `Overflow` on signed overflow of the high word.
    #[inline]
    pub fn checked_inc(self) -> NumericResult<Self> {
        let (lo, carry) = self.lo.overflowing_add(1);
        let hi = if carry {
            self.hi.checked_add(1).ok_or(NumericError::Overflow)?
        } else {
            self.hi
        };
        Ok(Self { lo, hi })
    }

    /// Subtract one, propagating the borrow into the high word.
    ///
    /// # Errors
    /// Returns `Overflow` on signed overflow of the high word.
    #[inline]
    pub fn checked_dec(self) -> NumericResult<Self> {
        let (lo, borrow) = self.lo.overflowing_sub(1);
        let hi = if borrow {
            self.hi.checked_sub(1).ok_or(NumericError::Overflow)?
        } else {
            self.hi
        };
        Ok(Self { lo, hi })
    }

    /// Add a 32-bit term, widened to 128 bits, with carry propagation.
    ///
    /// # Errors
    /// Returns `Overflow` iff the result's sign is inconsistent with the
    /// shared sign of both operands (the two's-complement overflow test).
    #[inline]
    pub fn checked_add_i32(self, term: i32) -> NumericResult<Self> {
        let wide = Self::from_i64(i64::from(term));
        let (lo, carry) = self.lo.overflowing_add(wide.lo);
        let hi = self.hi.wrapping_add(wide.hi).wrapping_add(i64::from(carry));
        if (self.hi < 0) == (wide.hi < 0) && (hi < 0) != (self.hi < 0) {
            return Err(NumericError::Overflow);
        }
        Ok(Self { lo, hi })
    }

    /// 128-bit subtraction with borrow propagation and no overflow check;
    /// the caller guarantees the result is in range.
    #[inline]
    pub fn wrapping_sub(self, rhs: Self) -> Self {
        let (lo, borrow) = self.lo.overflowing_sub(rhs.lo);
        let hi = self.hi.wrapping_sub(rhs.hi).wrapping_sub(i64::from(borrow));
        Self { lo, hi }
    }

    // ========================================================================
    // Multiplication
    // ========================================================================

    /// Exact 64×32→128 product of two non-negative values.
    ///
    /// The unsigned parameter types encode the non-negativity contract;
    /// callers take absolute values first and reapply the sign afterward.
    #[inline]
    pub const fn mul_positive(a: u64, b: u32) -> Self {
        let (lo, hi) = mul_words(a, b as u64);
        Self { lo, hi: hi as i64 }
    }

    /// Product of two non-negative 128-bit values.
    ///
    /// # Errors
    /// Returns `Overflow` when the true 256-bit product does not fit in a
    /// signed 128-bit value. The discarded high bits are checked rather
    /// than silently truncated.
    pub fn checked_mul_positive(self, rhs: Self) -> NumericResult<Self> {
        debug_assert!(!self.is_negative() && !rhs.is_negative());
        let a_hi = self.hi as u64;
        let b_hi = rhs.hi as u64;
        if a_hi != 0 && b_hi != 0 {
            return Err(NumericError::Overflow);
        }
        let (lo, carry) = mul_words(self.lo, rhs.lo);
        let (cross_a, spill_a) = mul_words(self.lo, b_hi);
        let (cross_b, spill_b) = mul_words(a_hi, rhs.lo);
        if spill_a != 0 || spill_b != 0 {
            return Err(NumericError::Overflow);
        }
        let hi = carry
            .checked_add(cross_a)
            .and_then(|h| h.checked_add(cross_b))
            .ok_or(NumericError::Overflow)?;
        if hi > i64::MAX as u64 {
            return Err(NumericError::Overflow);
        }
        Ok(Self { lo, hi: hi as i64 })
    }

    /// Full signed multiply by a 32-bit value.
    ///
    /// # Errors
    /// Returns `Overflow` when the product does not fit in 128 bits.
    pub fn checked_mul_i32(self, multiplier: i32) -> NumericResult<Self> {
        if multiplier == 0 || self.is_zero() {
            return Ok(Self::ZERO);
        }
        let negative = self.is_negative() != (multiplier < 0);
        let (mag_lo, mag_hi) = self.magnitude();
        let m = u64::from(multiplier.unsigned_abs());
        let (lo, carry) = mul_words(mag_lo, m);
        let (hi_word, spill) = mul_words(mag_hi, m);
        if spill != 0 {
            return Err(NumericError::Overflow);
        }
        let hi = hi_word.checked_add(carry).ok_or(NumericError::Overflow)?;
        Self::from_magnitude(lo, hi, negative)
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// Logical right shift, treating the 128-bit value as unsigned.
    #[inline]
    pub const fn shift_right_unsigned(self, n: u32) -> Self {
        let hi = self.hi as u64;
        match n {
            0 => self,
            1..=63 => Self {
                lo: (self.lo >> n) | (hi << (64 - n)),
                hi: (hi >> n) as i64,
            },
            64..=127 => Self {
                lo: hi >> (n - 64),
                hi: 0,
            },
            _ => Self::ZERO,
        }
    }

    /// High word of `value << n` for `n < 64`, without materializing the
    /// full shifted value. Used to build the normalized divisor's top word
    /// during long division.
    #[inline]
    const fn high_word_shl(value: Self, n: u32) -> u64 {
        let hi = value.hi as u64;
        if n == 0 {
            hi
        } else {
            (hi << n) | (value.lo >> (64 - n))
        }
    }

    // ========================================================================
    // Division
    // ========================================================================

    /// Unsigned-style division of a non-negative value by a non-negative
    /// 64-bit divisor, returning `(quotient, remainder)`.
    ///
    /// Three cases, selected by magnitude to minimize work: a single-word
    /// dividend uses native division; a dividend whose high word is below
    /// the divisor needs one 128-by-64 long-division call; otherwise the
    /// high and low quotient words are computed separately and composed.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `divisor` is zero.
    pub fn div_rem_u64(self, divisor: u64) -> NumericResult<(Self, u64)> {
        if divisor == 0 {
            return Err(NumericError::DivisionByZero);
        }
        debug_assert!(!self.is_negative());
        let hi = self.hi as u64;
        if hi == 0 {
            return Ok((Self::from_words(self.lo / divisor, 0), self.lo % divisor));
        }
        if hi < divisor {
            let (q, r) = div_128_by_64(hi, self.lo, divisor);
            return Ok((Self::from_words(q, 0), r));
        }
        let quotient_hi = hi / divisor;
        let (quotient_lo, remainder) = div_128_by_64(hi % divisor, self.lo, divisor);
        Ok((Self::from_words(quotient_lo, quotient_hi as i64), remainder))
    }

    /// Unsigned-style division of a non-negative value by a non-negative
    /// 128-bit divisor, returning `(quotient, remainder)`.
    ///
    /// A single-word divisor delegates to [`Self::div_rem_u64`]. A two-word
    /// divisor runs one normalize/shift/estimate/correct round: the divisor
    /// is normalized so its top bit is set, the quotient is estimated from
    /// the halved dividend against the normalized divisor's top word, the
    /// estimate is decremented if non-zero (it may overshoot by one), and a
    /// final subtract-and-compare corrects it by at most one more unit.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `divisor` is zero.
    pub fn div_rem(self, divisor: Self) -> NumericResult<(Self, Self)> {
        if divisor.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        debug_assert!(!self.is_negative() && !divisor.is_negative());
        if divisor.hi == 0 {
            let (quotient, remainder) = self.div_rem_u64(divisor.lo)?;
            return Ok((quotient, Self::from_words(remainder, 0)));
        }

        // Divisor spans both words, so the quotient fits in one.
        let shift = (divisor.hi as u64).leading_zeros();
        let top = Self::high_word_shl(divisor, shift);
        let halved = self.shift_right_unsigned(1);
        let (estimate, _) = div_128_by_64(halved.hi as u64, halved.lo, top);
        let mut quotient = estimate >> (63 - shift);
        if quotient != 0 {
            quotient -= 1;
        }
        let product = Self::from_words(quotient, 0).checked_mul_positive(divisor)?;
        let mut remainder = self.wrapping_sub(product);
        if remainder >= divisor {
            quotient += 1;
            remainder = remainder.wrapping_sub(divisor);
        }
        Ok((Self::from_words(quotient, 0), remainder))
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Unsigned magnitude as a `(lo, hi)` word pair. Handles the minimum
    /// value: `-2^127` yields the unsigned pair `(0, 2^63)`.
    #[inline]
    const fn magnitude(self) -> (u64, u64) {
        if self.hi >= 0 {
            (self.lo, self.hi as u64)
        } else {
            let lo = (!self.lo).wrapping_add(1);
            let hi = (!(self.hi as u64)).wrapping_add(if self.lo == 0 { 1 } else { 0 });
            (lo, hi)
        }
    }

    /// Rebuild a signed value from an unsigned magnitude and a sign flag.
    ///
    /// # Errors
    /// Returns `Overflow` when the magnitude exceeds the signed 128-bit
    /// range for the requested sign.
    #[inline]
    fn from_magnitude(lo: u64, hi: u64, negative: bool) -> NumericResult<Self> {
        const SIGN_BIT: u64 = 1 << 63;
        if negative {
            if hi > SIGN_BIT || (hi == SIGN_BIT && lo != 0) {
                return Err(NumericError::Overflow);
            }
            let neg_lo = (!lo).wrapping_add(1);
            let neg_hi = (!hi).wrapping_add(u64::from(lo == 0));
            Ok(Self {
                lo: neg_lo,
                hi: neg_hi as i64,
            })
        } else if hi > i64::MAX as u64 {
            Err(NumericError::Overflow)
        } else {
            Ok(Self { lo, hi: hi as i64 })
        }
    }
}

/// Widening 64×64→128 multiply from 32-bit half-word cross products.
const fn mul_words(a: u64, b: u64) -> (u64, u64) {
    let a_lo = a & LO_MASK;
    let a_hi = a >> 32;
    let b_lo = b & LO_MASK;
    let b_hi = b >> 32;

    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    // mid holds at most three 32-bit digits plus carries; it cannot overflow
    let mid = (ll >> 32) + (lh & LO_MASK) + (hl & LO_MASK);
    let lo = (ll & LO_MASK) | (mid << 32);
    let hi = hh + (lh >> 32) + (hl >> 32) + (mid >> 32);
    (lo, hi)
}

/// 128-by-64 long division: divides the two-word dividend `(u1, u0)` by
/// `v`, returning `(quotient, remainder)`.
///
/// This is Knuth's Algorithm D restricted to a one-word divisor split into
/// two 32-bit digits: normalize the divisor so its top bit is set, estimate
/// each 32-bit quotient digit by dividing the top words, and correct the
/// estimate downward while it overshoots.
///
/// Precondition: `u1 < v` (the quotient fits in one word) and `v != 0`.
fn div_128_by_64(u1: u64, u0: u64, v: u64) -> (u64, u64) {
    debug_assert!(v != 0);
    debug_assert!(u1 < v);

    let shift = v.leading_zeros();
    let v = v << shift;
    let vn1 = v >> 32;
    let vn0 = v & LO_MASK;

    let un32 = if shift == 0 {
        u1
    } else {
        (u1 << shift) | (u0 >> (64 - shift))
    };
    let un10 = u0 << shift;
    let un1 = un10 >> 32;
    let un0 = un10 & LO_MASK;

    // First quotient digit.
    let mut q1 = un32 / vn1;
    let mut rhat = un32 % vn1;
    loop {
        if q1 >= BASE || q1 * vn0 > rhat * BASE + un1 {
            q1 -= 1;
            rhat += vn1;
            if rhat < BASE {
                continue;
            }
        }
        break;
    }

    // Two-word remainder after the first digit; wrapping ops are exact here
    // because the true value is below 2^64.
    let un21 = un32
        .wrapping_mul(BASE)
        .wrapping_add(un1)
        .wrapping_sub(q1.wrapping_mul(v));

    // Second quotient digit.
    let mut q0 = un21 / vn1;
    let mut rhat = un21 % vn1;
    loop {
        if q0 >= BASE || q0 * vn0 > rhat * BASE + un0 {
            q0 -= 1;
            rhat += vn1;
            if rhat < BASE {
                continue;
            }
        }
        break;
    }

    let remainder = un21
        .wrapping_mul(BASE)
        .wrapping_add(un0)
        .wrapping_sub(q0.wrapping_mul(v))
        >> shift;
    (q1 * BASE + q0, remainder)
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Wide128 {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialOrd for Wide128 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Wide128 {
    /// Compares high words first (signed), then low words as unsigned.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.hi.cmp(&other.hi).then_with(|| self.lo.cmp(&other.lo))
    }
}

impl From<i64> for Wide128 {
    #[inline]
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i128> for Wide128 {
    #[inline]
    fn from(value: i128) -> Self {
        Self::from_i128(value)
    }
}

impl From<Wide128> for i128 {
    #[inline]
    fn from(value: Wide128) -> Self {
        value.to_i128()
    }
}

impl fmt::Debug for Wide128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wide128({})", self.to_i128())
    }
}

impl fmt::Display for Wide128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i128())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::NumericError;

    #[test]
    fn test_sign_extension() {
        let positive = Wide128::from_i64(42);
        assert_eq!(positive.low(), 42);
        assert_eq!(positive.high(), 0);

        let negative = Wide128::from_i64(-1);
        assert_eq!(negative.low(), u64::MAX);
        assert_eq!(negative.high(), -1);
        assert_eq!(negative.to_i128(), -1);
    }

    #[test]
    fn test_i128_round_trip() {
        for value in [
            0i128,
            1,
            -1,
            i128::from(i64::MAX),
            i128::from(i64::MIN),
            i128::MAX,
            i128::MIN,
            1 << 64,
            -(1 << 64),
        ] {
            assert_eq!(Wide128::from_i128(value).to_i128(), value);
        }
    }

    #[test]
    fn test_exact_narrowing() {
        assert_eq!(Wide128::from_i64(i64::MAX).to_i64_exact(), Ok(i64::MAX));
        assert_eq!(Wide128::from_i64(i64::MIN).to_i64_exact(), Ok(i64::MIN));
        assert_eq!(
            Wide128::from_i128(i128::from(i64::MAX) + 1).to_i64_exact(),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            Wide128::from_i128(i128::from(i64::MIN) - 1).to_i64_exact(),
            Err(NumericError::Overflow)
        );

        assert_eq!(Wide128::from_i64(-5).to_i32_exact(), Ok(-5));
        assert_eq!(
            Wide128::from_i64(i64::from(i32::MAX) + 1).to_i32_exact(),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_fits_predicates() {
        assert!(Wide128::from_i64(0).fits_i32());
        assert!(Wide128::from_i64(i64::from(i32::MIN)).fits_i32());
        assert!(!Wide128::from_i64(i64::from(i32::MIN) - 1).fits_i32());
        assert!(Wide128::from_i64(i64::MIN).fits_i64());
        assert!(!Wide128::MAX.fits_i64());
        assert!(!Wide128::MIN.fits_i64());
    }

    #[test]
    fn test_comparison() {
        let small = Wide128::from_i64(-3);
        let large = Wide128::from_i128(1 << 100);
        assert!(small < large);
        assert!(Wide128::ZERO > small);
        assert!(Wide128::MIN < Wide128::MAX);

        // Same high word: low words compare as unsigned.
        let a = Wide128::from_words(1, 5);
        let b = Wide128::from_words(u64::MAX, 5);
        assert!(a < b);
    }

    #[test]
    fn test_increment_carry() {
        let before = Wide128::from_words(u64::MAX, 0);
        let after = before.checked_inc().unwrap();
        assert_eq!(after.to_i128(), 1i128 << 64);
    }

    #[test]
    fn test_increment_overflow() {
        assert_eq!(Wide128::MAX.checked_inc(), Err(NumericError::Overflow));
    }

    #[test]
    fn test_decrement_borrow() {
        let before = Wide128::from_i128(1i128 << 64);
        let after = before.checked_dec().unwrap();
        assert_eq!(after.to_i128(), (1i128 << 64) - 1);
    }

    #[test]
    fn test_decrement_overflow() {
        assert_eq!(Wide128::MIN.checked_dec(), Err(NumericError::Overflow));
    }

    #[test]
    fn test_checked_add_i32() {
        let base = Wide128::from_words(u64::MAX - 1, 7);
        let sum = base.checked_add_i32(5).unwrap();
        assert_eq!(sum.to_i128(), base.to_i128() + 5);

        let negative = Wide128::from_i64(-10).checked_add_i32(3).unwrap();
        assert_eq!(negative.to_i128(), -7);

        assert_eq!(Wide128::MAX.checked_add_i32(1), Err(NumericError::Overflow));
        assert_eq!(Wide128::MIN.checked_add_i32(-1), Err(NumericError::Overflow));
    }

    #[test]
    fn test_wrapping_sub() {
        let a = Wide128::from_i128(1 << 90);
        let b = Wide128::from_i128((1 << 90) - 12345);
        assert_eq!(a.wrapping_sub(b).to_i128(), 12345);
        assert_eq!(Wide128::ZERO.wrapping_sub(Wide128::from_i64(1)).to_i128(), -1);
    }

    #[test]
    fn test_mul_positive() {
        let product = Wide128::mul_positive(u64::MAX, u32::MAX);
        let expected = u128::from(u64::MAX) * u128::from(u32::MAX);
        assert_eq!(product.to_i128(), expected as i128);

        assert_eq!(Wide128::mul_positive(0, 5).to_i128(), 0);
        assert_eq!(
            Wide128::mul_positive(1_000_000_007, 1_000_000_000).to_i128(),
            1_000_000_007i128 * 1_000_000_000
        );
    }

    #[test]
    fn test_checked_mul_positive() {
        let a = Wide128::from_i128(1 << 70);
        let b = Wide128::from_i64(1 << 20);
        assert_eq!(
            a.checked_mul_positive(b).unwrap().to_i128(),
            1i128 << 90
        );

        // Discarded high bits must be flagged, not truncated.
        let big = Wide128::from_i128(1 << 100);
        assert_eq!(
            big.checked_mul_positive(big),
            Err(NumericError::Overflow)
        );
        let medium = Wide128::from_i128(1 << 64);
        assert_eq!(
            medium.checked_mul_positive(medium),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_checked_mul_i32() {
        let cases: &[(i128, i32)] = &[
            (0, 17),
            (123_456_789_123, 1_000_000_000),
            (-123_456_789_123, 1_000_000_000),
            (i128::from(i64::MIN), -1),
            ((1 << 100) + 12345, -7),
            (i128::MIN / 2, 2),
        ];
        for &(value, multiplier) in cases {
            let got = Wide128::from_i128(value).checked_mul_i32(multiplier);
            match value.checked_mul(i128::from(multiplier)) {
                Some(expected) => assert_eq!(got.unwrap().to_i128(), expected),
                None => assert_eq!(got, Err(NumericError::Overflow)),
            }
        }

        assert_eq!(Wide128::MAX.checked_mul_i32(2), Err(NumericError::Overflow));
        assert_eq!(Wide128::MIN.checked_mul_i32(-1), Err(NumericError::Overflow));
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(Wide128::ZERO.leading_zeros(), 128);
        assert_eq!(Wide128::from_i64(1).leading_zeros(), 127);
        assert_eq!(Wide128::from_i128(1 << 64).leading_zeros(), 63);
        assert_eq!(Wide128::MAX.leading_zeros(), 1);
        assert_eq!(Wide128::from_i64(-1).leading_zeros(), 0);
    }

    #[test]
    fn test_shift_right_unsigned() {
        let value = Wide128::from_i128((1 << 100) | 12345);
        assert_eq!(value.shift_right_unsigned(0), value);
        assert_eq!(value.shift_right_unsigned(10).to_i128(), (1 << 90) | (12345 >> 10));
        assert_eq!(value.shift_right_unsigned(100).to_i128(), 1);
        assert_eq!(value.shift_right_unsigned(128), Wide128::ZERO);

        // Logical shift: the sign bit is not replicated.
        let negative = Wide128::from_i64(-1);
        assert_eq!(
            negative.shift_right_unsigned(1).to_i128(),
            i128::MAX
        );
    }

    #[test]
    fn test_div_rem_u64_single_word() {
        let (q, r) = Wide128::from_i64(1000).div_rem_u64(7).unwrap();
        assert_eq!(q.to_i128(), 142);
        assert_eq!(r, 6);
    }

    #[test]
    fn test_div_rem_u64_narrow_quotient() {
        // High word below the divisor: one long-division call.
        let dividend = Wide128::from_i128(i128::MAX);
        let divisor = u64::MAX;
        let (q, r) = dividend.div_rem_u64(divisor).unwrap();
        let expected = dividend.to_i128() as u128;
        assert_eq!(q.to_i128() as u128, expected / u128::from(divisor));
        assert_eq!(u128::from(r), expected % u128::from(divisor));
    }

    #[test]
    fn test_div_rem_u64_wide_quotient() {
        // High word at least the divisor: composed quotient words.
        let dividend = Wide128::from_i128((123i128 << 100) + 456_789);
        let divisor = 1_000_000_007u64;
        let (q, r) = dividend.div_rem_u64(divisor).unwrap();
        let expected = dividend.to_i128();
        assert_eq!(q.to_i128(), expected / i128::from(divisor));
        assert_eq!(i128::from(r), expected % i128::from(divisor));
    }

    #[test]
    fn test_div_rem_u64_by_zero() {
        assert_eq!(
            Wide128::from_i64(1).div_rem_u64(0),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_div_rem_wide_divisor() {
        let dividend = Wide128::from_i128(i128::MAX - 12345);
        let divisor = Wide128::from_i128((1i128 << 80) + 999);
        let (q, r) = dividend.div_rem(divisor).unwrap();
        assert_eq!(q.to_i128(), dividend.to_i128() / divisor.to_i128());
        assert_eq!(r.to_i128(), dividend.to_i128() % divisor.to_i128());
    }

    #[test]
    fn test_div_rem_dividend_smaller_than_divisor() {
        let dividend = Wide128::from_i64(5);
        let divisor = Wide128::from_i128(1 << 70);
        let (q, r) = dividend.div_rem(divisor).unwrap();
        assert!(q.is_zero());
        assert_eq!(r.to_i128(), 5);
    }

    #[test]
    fn test_div_rem_equal_operands() {
        let value = Wide128::from_i128((1 << 90) + 7);
        let (q, r) = value.div_rem(value).unwrap();
        assert_eq!(q.to_i128(), 1);
        assert!(r.is_zero());
    }

    #[test]
    fn test_div_rem_by_zero() {
        assert_eq!(
            Wide128::from_i64(1).div_rem(Wide128::ZERO),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_div_rem_reconstruction_grid() {
        // q * d + r == u and 0 <= r < d across all three division regimes.
        let dividends = [
            0i128,
            1,
            999_999_999,
            i128::from(i64::MAX),
            (1i128 << 64) - 1,
            1i128 << 64,
            (1i128 << 96) + 123_456_789,
            i128::MAX,
        ];
        let divisors = [
            1i128,
            2,
            10,
            1_000_000_000,
            i128::from(u32::MAX),
            i128::from(i64::MAX),
            (1i128 << 64) + 1,
            (1i128 << 126) - 3,
        ];
        for &u in &dividends {
            for &d in &divisors {
                let (q, r) = Wide128::from_i128(u)
                    .div_rem(Wide128::from_i128(d))
                    .unwrap();
                let (q, r) = (q.to_i128(), r.to_i128());
                assert_eq!(q * d + r, u, "u={u} d={d}");
                assert!((0..d).contains(&r), "u={u} d={d} r={r}");
            }
        }
    }
}
