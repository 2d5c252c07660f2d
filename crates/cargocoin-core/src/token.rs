// crates/cargocoin-core/src/token.rs
//
// CargoCoin (CC) token metadata and supply constants.
//
// All ledger accounting is done in base units (1 CC = 10^18 base units) as
// unsigned 256-bit integers. The `Cc` wrapper exists only for display and
// parsing of human-entered amounts.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::Amount;

/// Token name.
pub const TOKEN_NAME: &str = "CargoCoin";

/// Token symbol.
pub const TOKEN_SYMBOL: &str = "CC";

/// Decimal places of the base unit.
pub const DECIMALS: u8 = 18;

/// Hard cap in whole CC: one billion.
pub const MAX_SUPPLY_CC: u64 = 1_000_000_000;

/// Auto-burn rate applied to ordinary transfers, in basis points (2%).
pub const BURN_RATE_BPS: u64 = 200;

/// Basis-point denominator.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Number of base units in one CC (10^18).
pub fn base_units_per_cc() -> Amount {
    U256::exp10(DECIMALS as usize)
}

/// The supply cap in base units: 1,000,000,000 × 10^18.
pub fn max_supply() -> Amount {
    U256::from(MAX_SUPPLY_CC) * base_units_per_cc()
}

/// A CC amount, wrapping base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cc(pub Amount);

impl Cc {
    /// Amount from a whole number of CC.
    pub fn from_cc(whole: u64) -> Self {
        Self(U256::from(whole) * base_units_per_cc())
    }

    /// Amount from raw base units.
    pub fn from_base_units(units: Amount) -> Self {
        Self(units)
    }

    /// The raw base-unit value.
    pub fn base_units(&self) -> Amount {
        self.0
    }

    pub fn zero() -> Self {
        Self(U256::zero())
    }
}

impl fmt::Display for Cc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = base_units_per_cc();
        let whole = self.0 / unit;
        // Remainder is below 10^18 and always fits a u64.
        let frac = (self.0 % unit).low_u64();
        if frac == 0 {
            write!(f, "{} {}", whole, TOKEN_SYMBOL)
        } else {
            let frac_str = format!("{:018}", frac);
            let trimmed = frac_str.trim_end_matches('0');
            write!(f, "{}.{} {}", whole, trimmed, TOKEN_SYMBOL)
        }
    }
}

impl FromStr for Cc {
    type Err = LedgerError;

    /// Parse a decimal CC amount such as `1000`, `0.5`, or `12.000000000000000001`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_suffix(TOKEN_SYMBOL).unwrap_or(s).trim_end();
        let (whole_str, frac_str) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole_str.is_empty() && frac_str.is_empty() {
            return Err(LedgerError::Serialization("Empty amount".to_string()));
        }
        if frac_str.len() > DECIMALS as usize {
            return Err(LedgerError::Serialization(format!(
                "Amount {} has more than {} decimal places",
                s, DECIMALS
            )));
        }
        let parse = |digits: &str| -> Result<Amount, LedgerError> {
            if digits.is_empty() {
                return Ok(U256::zero());
            }
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(LedgerError::Serialization(format!("Invalid amount: {}", s)));
            }
            U256::from_dec_str(digits)
                .map_err(|e| LedgerError::Serialization(format!("Invalid amount {}: {:?}", s, e)))
        };

        let whole = parse(whole_str)?;
        let padded = format!("{:0<width$}", frac_str, width = DECIMALS as usize);
        let frac = parse(&padded)?;
        let units = whole
            .checked_mul(base_units_per_cc())
            .and_then(|w| w.checked_add(frac))
            .ok_or(LedgerError::ArithmeticOverflow("amount parsing"))?;
        Ok(Self(units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_units_per_cc() {
        assert_eq!(base_units_per_cc(), U256::from(1_000_000_000_000_000_000u64));
    }

    #[test]
    fn test_max_supply() {
        // 10^9 whole tokens * 10^18 base units
        assert_eq!(max_supply(), U256::exp10(27));
    }

    #[test]
    fn test_display_whole() {
        assert_eq!(Cc::from_cc(42).to_string(), "42 CC");
        assert_eq!(Cc::zero().to_string(), "0 CC");
    }

    #[test]
    fn test_display_fractional() {
        let amount = Cc::from_base_units(U256::from(1_500_000_000_000_000_000u64));
        assert_eq!(amount.to_string(), "1.5 CC");
        let dust = Cc::from_base_units(U256::one());
        assert_eq!(dust.to_string(), "0.000000000000000001 CC");
    }

    #[test]
    fn test_parse_amounts() {
        assert_eq!("1000".parse::<Cc>().unwrap(), Cc::from_cc(1000));
        assert_eq!("1000 CC".parse::<Cc>().unwrap(), Cc::from_cc(1000));
        assert_eq!(
            "0.5".parse::<Cc>().unwrap().base_units(),
            U256::from(500_000_000_000_000_000u64)
        );
        assert_eq!(".000000000000000001".parse::<Cc>().unwrap().base_units(), U256::one());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Cc>().is_err());
        assert!("1.2.3".parse::<Cc>().is_err());
        assert!("-5".parse::<Cc>().is_err());
        assert!("0.0000000000000000001".parse::<Cc>().is_err());
    }
}
