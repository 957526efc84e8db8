// ============================================================================
// Rounding Modes
// ============================================================================

use crate::errors::NumericError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rounding applied to the last retained fractional digit during division.
///
/// The division algorithm special-cases each mode's tie-breaking rule at
/// the remainder level, so this is a closed set rather than an open
/// strategy trait. Modes of external decimal libraries can be mapped in
/// through [`TryFrom<rust_decimal::RoundingStrategy>`]; anything without a
/// counterpart here fails with [`NumericError::UnsupportedRounding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Round away from zero when the discarded remainder is at least half
    /// the divisor.
    HalfUp,
    /// Truncate toward zero.
    Down,
}

impl TryFrom<rust_decimal::RoundingStrategy> for RoundingMode {
    type Error = NumericError;

    fn try_from(strategy: rust_decimal::RoundingStrategy) -> Result<Self, Self::Error> {
        match strategy {
            rust_decimal::RoundingStrategy::MidpointAwayFromZero => Ok(RoundingMode::HalfUp),
            rust_decimal::RoundingStrategy::ToZero => Ok(RoundingMode::Down),
            _ => Err(NumericError::UnsupportedRounding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::RoundingStrategy;

    #[test]
    fn test_supported_strategies() {
        assert_eq!(
            RoundingMode::try_from(RoundingStrategy::MidpointAwayFromZero),
            Ok(RoundingMode::HalfUp)
        );
        assert_eq!(
            RoundingMode::try_from(RoundingStrategy::ToZero),
            Ok(RoundingMode::Down)
        );
    }

    #[test]
    fn test_unsupported_strategies() {
        assert_eq!(
            RoundingMode::try_from(RoundingStrategy::MidpointNearestEven),
            Err(NumericError::UnsupportedRounding)
        );
        assert_eq!(
            RoundingMode::try_from(RoundingStrategy::ToPositiveInfinity),
            Err(NumericError::UnsupportedRounding)
        );
    }
}
