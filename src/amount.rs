// ============================================================================
// Amount
// Fixed-point monetary value: 64-bit units plus 9 fractional digits
// ============================================================================

use crate::errors::{NumericError, NumericResult};
use crate::rounding::RoundingMode;
use crate::wide::Wide128;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Number of nano-units in one whole unit (the fractional scale, 10^9).
pub const NANOS_PER_UNIT: i64 = 1_000_000_000;

/// Fixed-point monetary value.
///
/// Stores an integral part (`units`, signed 64-bit) and a fractional part
/// (`nanos`, scaled ×10⁻⁹, magnitude below one billion). The logical value
/// is `units + nanos × 10⁻⁹`.
///
/// Every constructor and operation maintains the normalized form: `nanos`
/// is zero or carries the same sign as `units` whenever `units` is
/// non-zero. Values are immutable; arithmetic returns new instances and
/// fails with [`NumericError`] instead of wrapping or losing precision —
/// internally lifting into [`Wide128`] whenever a multiply or divide could
/// exceed 64-bit range.
///
/// # Example
/// ```ignore
/// let price = Amount::new(100, 500_000_000)?;          // 100.5
/// let total = price.checked_mul(Amount::from_units(2))?; // 201
/// assert_eq!(total.to_string(), "201");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Amount {
    units: i64,
    nanos: i32,
}

impl Amount {
    /// Zero value
    pub const ZERO: Self = Self { units: 0, nanos: 0 };

    /// One whole unit (1.0)
    pub const ONE: Self = Self { units: 1, nanos: 0 };

    /// Maximum representable value
    pub const MAX: Self = Self {
        units: i64::MAX,
        nanos: (NANOS_PER_UNIT - 1) as i32,
    };

    /// Minimum representable value
    pub const MIN: Self = Self {
        units: i64::MIN,
        nanos: -((NANOS_PER_UNIT - 1) as i32),
    };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from integral and fractional parts.
    ///
    /// The pair is passed through the normalizer, so mixed-sign input such
    /// as `(5, -1)` is accepted and reconciled to `4.999999999`.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the fractional magnitude is not below one
    /// billion.
    #[inline]
    pub fn new(units: i64, nanos: i32) -> NumericResult<Self> {
        if nanos.unsigned_abs() >= NANOS_PER_UNIT as u32 {
            return Err(NumericError::InvalidInput);
        }
        let (units, nanos) = Self::reconcile(units, nanos);
        Ok(Self { units, nanos })
    }

    /// Create a whole-unit value.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Self { units, nanos: 0 }
    }

    /// Create from a floating-point approximation.
    ///
    /// Lossy by contract: the input is rounded at the ninth fractional
    /// digit.
    ///
    /// # Errors
    /// Returns `InvalidInput` for non-finite input and `Overflow` when the
    /// value is outside the representable range.
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput);
        }
        if value >= i64::MAX as f64 || value < i64::MIN as f64 {
            return Err(NumericError::Overflow);
        }
        let mut units = value.trunc() as i64;
        let mut nanos = ((value - value.trunc()) * NANOS_PER_UNIT as f64).round() as i64;
        if nanos >= NANOS_PER_UNIT {
            units = units.checked_add(1).ok_or(NumericError::Overflow)?;
            nanos = 0;
        } else if nanos <= -NANOS_PER_UNIT {
            units = units.checked_sub(1).ok_or(NumericError::Overflow)?;
            nanos = 0;
        }
        let (units, nanos) = Self::reconcile(units, nanos as i32);
        Ok(Self { units, nanos })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The integral part.
    #[inline]
    pub const fn units(self) -> i64 {
        self.units
    }

    /// The fractional part, scaled ×10⁻⁹.
    #[inline]
    pub const fn nanos(self) -> i32 {
        self.nanos
    }

    /// Check if the value is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.units == 0 && self.nanos == 0
    }

    /// Check if the value is strictly positive.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.signum() > 0
    }

    /// Check if the value is strictly negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.signum() < 0
    }

    /// Sign of the value: -1, 0, or 1.
    ///
    /// Units and nanos always share a sign, so any non-zero component
    /// carries the value's sign; the bitwise OR of the two components
    /// therefore has the right sign and is zero only for zero.
    #[inline]
    pub const fn signum(self) -> i32 {
        (self.units | self.nanos as i64).signum() as i32
    }

    /// Absolute value.
    ///
    /// # Errors
    /// Returns `Overflow` when `units` is `i64::MIN`.
    #[inline]
    pub fn abs(self) -> NumericResult<Self> {
        if self.is_negative() {
            self.checked_neg()
        } else {
            Ok(self)
        }
    }

    /// Checked negation.
    ///
    /// # Errors
    /// Returns `Overflow` when `units` is `i64::MIN`.
    #[inline]
    pub fn checked_neg(self) -> NumericResult<Self> {
        let units = self.units.checked_neg().ok_or(NumericError::Overflow)?;
        Ok(Self {
            units,
            nanos: -self.nanos,
        })
    }

    // ========================================================================
    // Additive Arithmetic
    // ========================================================================

    /// Checked addition.
    ///
    /// Units and nanos are added independently; a nanos sum reaching ±one
    /// billion folds one carry unit into `units` before normalizing.
    ///
    /// # Errors
    /// Returns `Overflow` when the true sum is out of range.
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        let mut units = self
            .units
            .checked_add(rhs.units)
            .ok_or(NumericError::Overflow)?;
        let mut nanos = i64::from(self.nanos) + i64::from(rhs.nanos);
        if nanos >= NANOS_PER_UNIT {
            nanos -= NANOS_PER_UNIT;
            units = units.checked_add(1).ok_or(NumericError::Overflow)?;
        } else if nanos <= -NANOS_PER_UNIT {
            nanos += NANOS_PER_UNIT;
            units = units.checked_sub(1).ok_or(NumericError::Overflow)?;
        }
        let (units, nanos) = Self::reconcile(units, nanos as i32);
        Ok(Self { units, nanos })
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` when the true difference is out of range.
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        let mut units = self
            .units
            .checked_sub(rhs.units)
            .ok_or(NumericError::Overflow)?;
        let mut nanos = i64::from(self.nanos) - i64::from(rhs.nanos);
        if nanos >= NANOS_PER_UNIT {
            nanos -= NANOS_PER_UNIT;
            units = units.checked_add(1).ok_or(NumericError::Overflow)?;
        } else if nanos <= -NANOS_PER_UNIT {
            nanos += NANOS_PER_UNIT;
            units = units.checked_sub(1).ok_or(NumericError::Overflow)?;
        }
        let (units, nanos) = Self::reconcile(units, nanos as i32);
        Ok(Self { units, nanos })
    }

    /// Add a whole-unit scalar; nanos are unchanged but the result is still
    /// re-normalized (the units may cross zero against the nanos' sign).
    ///
    /// # Errors
    /// Returns `Overflow` when the units sum is out of range.
    #[inline]
    pub fn checked_add_units(self, units: i64) -> NumericResult<Self> {
        let units = self
            .units
            .checked_add(units)
            .ok_or(NumericError::Overflow)?;
        let (units, nanos) = Self::reconcile(units, self.nanos);
        Ok(Self { units, nanos })
    }

    /// Subtract a whole-unit scalar.
    ///
    /// # Errors
    /// Returns `Overflow` when the units difference is out of range.
    #[inline]
    pub fn checked_sub_units(self, units: i64) -> NumericResult<Self> {
        let units = self
            .units
            .checked_sub(units)
            .ok_or(NumericError::Overflow)?;
        let (units, nanos) = Self::reconcile(units, self.nanos);
        Ok(Self { units, nanos })
    }

    // ========================================================================
    // Multiplication
    // ========================================================================

    /// Checked multiplication.
    ///
    /// Decomposes both operands into `(units, nanos)` and combines the four
    /// cross products: units×units lands in units, the two mixed terms land
    /// in nanos scale, and the nanos×nanos term is scaled down by one
    /// billion with round-half-up division. A nanos total of ±one billion
    /// or more folds into units before normalizing.
    ///
    /// # Errors
    /// Returns `Overflow` when any term or the final result is out of
    /// range.
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        let units = self
            .units
            .checked_mul(rhs.units)
            .ok_or(NumericError::Overflow)?;
        let cross_a = self
            .units
            .checked_mul(i64::from(rhs.nanos))
            .ok_or(NumericError::Overflow)?;
        let cross_b = i64::from(self.nanos)
            .checked_mul(rhs.units)
            .ok_or(NumericError::Overflow)?;
        // nanos products stay below 10^18, so the raw multiply is safe
        let nano_term = divide_round_up(
            i64::from(self.nanos) * i64::from(rhs.nanos),
            NANOS_PER_UNIT,
        )?;
        let nano_total = cross_a
            .checked_add(cross_b)
            .and_then(|n| n.checked_add(nano_term))
            .ok_or(NumericError::Overflow)?;
        Self::fold_nanos(units, nano_total)
    }

    /// Multiply by a whole-unit scalar; skips the cross terms.
    ///
    /// # Errors
    /// Returns `Overflow` when the result is out of range.
    pub fn checked_mul_units(self, multiplier: i64) -> NumericResult<Self> {
        let units = self
            .units
            .checked_mul(multiplier)
            .ok_or(NumericError::Overflow)?;
        let nano_total = i64::from(self.nanos)
            .checked_mul(multiplier)
            .ok_or(NumericError::Overflow)?;
        Self::fold_nanos(units, nano_total)
    }

    /// `self × (1 + fraction)`.
    ///
    /// # Errors
    /// Returns `Overflow` when the result is out of range.
    #[inline]
    pub fn add_fraction(self, fraction: Self) -> NumericResult<Self> {
        self.checked_add(self.checked_mul(fraction)?)
    }

    /// `self × (1 − fraction)`.
    ///
    /// # Errors
    /// Returns `Overflow` when the result is out of range.
    #[inline]
    pub fn sub_fraction(self, fraction: Self) -> NumericResult<Self> {
        self.checked_sub(self.checked_mul(fraction)?)
    }

    // ========================================================================
    // Division
    // ========================================================================

    /// Checked division with explicit rounding of the ninth fractional
    /// digit.
    ///
    /// Both operands are lifted into 128-bit space as `units × 10⁹ + nanos`
    /// magnitudes, divided to produce the integral part, and the remainder
    /// is scaled by another 10⁹ and divided again to produce the fractional
    /// digits. The combined operand sign is applied at the end, so an exact
    /// integer ratio yields `nanos == 0` rather than a rounding artifact.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero divisor and `Overflow` when the
    /// quotient's integral part does not fit 64 bits.
    pub fn checked_div(self, rhs: Self, mode: RoundingMode) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        tracing::trace!(dividend = %self, divisor = %rhs, ?mode, "amount division");

        let negative = (self.signum() * rhs.signum()) < 0;
        let dividend = self.to_scaled_magnitude()?;
        let divisor = rhs.to_scaled_magnitude()?;

        let (quotient, remainder) = dividend.div_rem(divisor)?;
        let mut units = quotient.to_i64_exact()?;

        // The remainder times 10^9 can exceed 64 bits, so the fractional
        // digits are computed in wide space as well.
        let scaled_remainder = remainder.checked_mul_i32(NANOS_PER_UNIT as i32)?;
        let (nano_quotient, nano_remainder) = scaled_remainder.div_rem(divisor)?;
        let mut nanos = nano_quotient.to_i32_exact()?;

        if mode == RoundingMode::HalfUp {
            let doubled = nano_remainder.checked_mul_i32(2)?;
            if doubled >= divisor {
                nanos += 1;
                if i64::from(nanos) == NANOS_PER_UNIT {
                    nanos = 0;
                    units = units.checked_add(1).ok_or(NumericError::Overflow)?;
                }
            }
        }

        if negative {
            units = -units;
            nanos = -nanos;
        }
        Ok(Self { units, nanos })
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Returns the minimum of two values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }

    /// Returns the maximum of two values.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self >= other {
            self
        } else {
            other
        }
    }

    // ========================================================================
    // Decimal and Float Boundaries
    // ========================================================================

    /// Convert from [`rust_decimal::Decimal`] (API boundaries only).
    ///
    /// # Errors
    /// Returns `PrecisionLoss` if the decimal has significant digits past
    /// the ninth place and `Overflow` if the value is out of range.
    pub fn from_decimal(value: Decimal) -> NumericResult<Self> {
        let scaled = value
            .checked_mul(Decimal::from(NANOS_PER_UNIT))
            .ok_or(NumericError::Overflow)?;
        if !scaled.fract().is_zero() {
            return Err(NumericError::PrecisionLoss);
        }
        let scaled = scaled.to_i128().ok_or(NumericError::Overflow)?;
        let units = i64::try_from(scaled / i128::from(NANOS_PER_UNIT))
            .map_err(|_| NumericError::Overflow)?;
        let nanos = (scaled % i128::from(NANOS_PER_UNIT)) as i32;
        Ok(Self { units, nanos })
    }

    /// Convert to [`rust_decimal::Decimal`] (display/export only).
    pub fn to_decimal(self) -> Decimal {
        let scaled = i128::from(self.units) * i128::from(NANOS_PER_UNIT) + i128::from(self.nanos);
        // |scaled| < 2^94, comfortably inside Decimal's 96-bit mantissa
        Decimal::from_i128_with_scale(scaled, 9)
    }

    /// Floating-point approximation of the value (lossy).
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.units as f64 + f64::from(self.nanos) / NANOS_PER_UNIT as f64
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Restore the sign-consistency invariant: borrow or carry one unit
    /// when units and nanos disagree in sign.
    #[inline]
    const fn reconcile(units: i64, nanos: i32) -> (i64, i32) {
        if units < 0 && nanos > 0 {
            (units + 1, nanos - NANOS_PER_UNIT as i32)
        } else if units > 0 && nanos < 0 {
            (units - 1, nanos + NANOS_PER_UNIT as i32)
        } else {
            (units, nanos)
        }
    }

    /// Fold a nanos-scale total (possibly beyond ±one billion) into a
    /// normalized value.
    #[inline]
    fn fold_nanos(units: i64, nano_total: i64) -> NumericResult<Self> {
        let carry = nano_total / NANOS_PER_UNIT;
        let nanos = (nano_total % NANOS_PER_UNIT) as i32;
        let units = units.checked_add(carry).ok_or(NumericError::Overflow)?;
        let (units, nanos) = Self::reconcile(units, nanos);
        Ok(Self { units, nanos })
    }

    /// Lift the absolute value into wide space as `|units| × 10⁹ + |nanos|`.
    /// Loses nothing because the nanos magnitude is below 10⁹.
    fn to_scaled_magnitude(self) -> NumericResult<Wide128> {
        let wide = Wide128::mul_positive(self.units.unsigned_abs(), NANOS_PER_UNIT as u32);
        wide.checked_add_i32(self.nanos.unsigned_abs() as i32)
    }
}

/// Integer division rounded to nearest, ties away from zero.
///
/// Truncating division followed by a correction step comparing twice the
/// remainder's magnitude against the divisor's.
///
/// # Errors
/// Returns `DivisionByZero` for a zero divisor and `Overflow` for
/// `i64::MIN / -1`.
pub fn divide_round_up(dividend: i64, divisor: i64) -> NumericResult<i64> {
    if divisor == 0 {
        return Err(NumericError::DivisionByZero);
    }
    if dividend == i64::MIN && divisor == -1 {
        return Err(NumericError::Overflow);
    }
    let quotient = dividend / divisor;
    let remainder = dividend - quotient * divisor;
    if remainder == 0 {
        return Ok(quotient);
    }
    if remainder.unsigned_abs() * 2 >= divisor.unsigned_abs() {
        let correction = if (dividend < 0) == (divisor < 0) { 1 } else { -1 };
        quotient.checked_add(correction).ok_or(NumericError::Overflow)
    } else {
        Ok(quotient)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Amount {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialOrd for Amount {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    /// Units first, then nanos. On normalized values this is exactly the
    /// order of the underlying rational values.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.units
            .cmp(&other.units)
            .then_with(|| self.nanos.cmp(&other.nanos))
    }
}

impl Neg for Amount {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.checked_neg().expect("Amount negation overflow")
    }
}

// Infallible Add/Sub for ergonomics (panics on overflow - use checked_* in production)
impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("Amount addition overflow")
    }
}

impl Sub for Amount {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("Amount subtraction overflow")
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({}, units={}, nanos={})", self, self.units, self.nanos)
    }
}

impl fmt::Display for Amount {
    /// Pretty form: integral part, then `.` and the fractional digits with
    /// trailing zeros stripped; the decimal point is omitted entirely for a
    /// whole value, and the sign is printed once, leading.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanos == 0 {
            return write!(f, "{}", self.units);
        }
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = format!("{:09}", self.nanos.unsigned_abs());
        write!(
            f,
            "{}{}.{}",
            sign,
            self.units.unsigned_abs(),
            digits.trim_end_matches('0')
        )
    }
}

// ============================================================================
// String Parsing
// ============================================================================

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl std::str::FromStr for Amount {
    type Err = NumericError;

    /// Parse the pretty-printed decimal form.
    ///
    /// # Examples
    /// - "123" -> 123
    /// - "10.5" -> 10.5
    /// - "-0.000000001" -> minus one nano
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (int_str, frac_str) = match body.find('.') {
            Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
            None => (body, None),
        };
        if int_str.is_empty() && frac_str.map_or(true, str::is_empty) {
            return Err(NumericError::InvalidInput);
        }
        if !int_str.is_empty() && !all_digits(int_str) {
            return Err(NumericError::InvalidInput);
        }

        let magnitude: u64 = if int_str.is_empty() {
            0
        } else {
            int_str.parse().map_err(|_| NumericError::InvalidInput)?
        };

        let frac: u32 = match frac_str {
            None => 0,
            Some(digits) if digits.is_empty() => 0,
            Some(digits) if !all_digits(digits) => return Err(NumericError::InvalidInput),
            Some(digits) if digits.len() > 9 => return Err(NumericError::PrecisionLoss),
            Some(digits) => {
                let padded = format!("{digits:0<9}");
                padded.parse().map_err(|_| NumericError::InvalidInput)?
            },
        };

        let units = if negative {
            if magnitude == 1 << 63 {
                i64::MIN
            } else if magnitude > i64::MAX as u64 {
                return Err(NumericError::Overflow);
            } else {
                -(magnitude as i64)
            }
        } else if magnitude > i64::MAX as u64 {
            return Err(NumericError::Overflow);
        } else {
            magnitude as i64
        };
        let nanos = if negative { -(frac as i32) } else { frac as i32 };
        Ok(Self { units, nanos })
    }
}

// ============================================================================
// Serde (string form, through the validating parser)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Amount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
