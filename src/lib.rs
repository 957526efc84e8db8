// ============================================================================
// Exact Money Library
// Overflow-checked fixed-point monetary arithmetic with wide intermediates
// ============================================================================

//! # Exact Money
//!
//! Exact fixed-point monetary arithmetic: a 64-bit integral part plus nine
//! fractional digits, with 128-bit wide intermediates for the operations
//! that need them.
//!
//! ## Features
//!
//! - **[`Amount`]** stores `units + nanos × 10⁻⁹` in a sign-consistent
//!   normalized form and never silently wraps or loses precision
//! - **[`Wide128`]** emulates a signed 128-bit integer as two 64-bit words
//!   with word-level multiply and Knuth long division
//! - **Explicit rounding** of the ninth fractional digit: half-up or
//!   truncation, chosen per division
//! - **Boundary conversions** to and from [`rust_decimal::Decimal`], `f64`,
//!   and the pretty-printed string form
//!
//! ## Example
//!
//! ```rust
//! use exact_money::prelude::*;
//!
//! # fn main() -> NumericResult<()> {
//! let price = Amount::new(10, 500_000_000)?; // 10.5
//! let total = price.checked_mul(Amount::from_units(4))?;
//! assert_eq!(total.to_string(), "42");
//!
//! // 1 / 3 keeps nine digits, rounding the last one
//! let third = Amount::ONE.checked_div(Amount::from_units(3), RoundingMode::HalfUp)?;
//! assert_eq!((third.units(), third.nanos()), (0, 333_333_333));
//! # Ok(())
//! # }
//! ```
//!
//! [`rust_decimal::Decimal`]: rust_decimal::Decimal

pub mod amount;
pub mod errors;
pub mod rounding;
pub mod wide;

// Re-exports for convenience
pub mod prelude {
    pub use crate::amount::{divide_round_up, Amount, NANOS_PER_UNIT};
    pub use crate::errors::{NumericError, NumericResult};
    pub use crate::rounding::RoundingMode;
    pub use crate::wide::Wide128;
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;

    #[test]
    fn test_weighted_average_is_exact() {
        // Weighted average of 100 (weight 1) and 200 (weight 3) is exactly
        // 175: the division leaves no fractional residue.
        let entries = [(Amount::from_units(100), 1), (Amount::from_units(200), 3)];

        let mut total = Amount::ZERO;
        let mut weight_sum = 0i64;
        for (value, weight) in entries {
            total = total.checked_add(value.checked_mul_units(weight).unwrap()).unwrap();
            weight_sum += weight;
        }

        let average = total
            .checked_div(Amount::from_units(weight_sum), RoundingMode::HalfUp)
            .unwrap();
        assert_eq!(average, Amount::from_units(175));
        assert_eq!(average.nanos(), 0);
    }

    #[test]
    fn test_running_balance_scenario() {
        // Deposit, apply a 2.5% fee, withdraw, check the residual.
        let deposit = "1523.75".parse::<Amount>().unwrap();
        let fee_rate = Amount::new(0, 25_000_000).unwrap();

        let after_fee = deposit.sub_fraction(fee_rate).unwrap();
        assert_eq!(after_fee.to_string(), "1485.65625");

        let withdrawal = Amount::from_units(1485);
        let residual = after_fee.checked_sub(withdrawal).unwrap();
        assert_eq!(residual, Amount::new(0, 656_250_000).unwrap());
    }

    #[test]
    fn test_division_regimes_agree_on_small_values() {
        // A quotient computed through the wide path must match plain 64-bit
        // arithmetic whenever the operands are small.
        let a = Amount::from_units(84);
        let b = Amount::from_units(12);
        let q = a.checked_div(b, RoundingMode::Down).unwrap();
        assert_eq!(q, Amount::from_units(7));
    }
}
