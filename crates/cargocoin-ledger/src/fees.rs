// crates/cargocoin-ledger/src/fees.rs
//
// Transfer-time auto-burn math.
//
// burn = floor(amount * rate_bps / 10_000), net = amount - burn.
// The product is split as (q * d + m) * r / d = q * r + floor(m * r / d)
// so the computation never overflows 256 bits for any rate <= 10_000.

use cargocoin_core::{Amount, BPS_DENOMINATOR};
use primitive_types::U256;

/// The gross amount of a transfer split into its burned and credited parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    /// Destroyed from supply.
    pub burn: Amount,
    /// Credited to the recipient.
    pub net: Amount,
}

impl FeeSplit {
    /// A split that burns nothing.
    pub fn exempt(amount: Amount) -> Self {
        Self {
            burn: U256::zero(),
            net: amount,
        }
    }
}

/// Burn due on `amount` at `rate_bps`, rounded down.
///
/// Pure: ignores exemptions and the global switch. Used for fee previews.
pub fn burn_amount(amount: Amount, rate_bps: u64) -> Amount {
    let rate = U256::from(rate_bps.min(BPS_DENOMINATOR));
    let denom = U256::from(BPS_DENOMINATOR);
    let quotient = amount / denom;
    let remainder = amount % denom;
    quotient * rate + remainder * rate / denom
}

/// Split a transfer of `amount`. When `charge` is false the full amount is credited.
pub fn split(amount: Amount, rate_bps: u64, charge: bool) -> FeeSplit {
    if !charge {
        return FeeSplit::exempt(amount);
    }
    let burn = burn_amount(amount, rate_bps);
    FeeSplit {
        burn,
        net: amount - burn,
    }
}
