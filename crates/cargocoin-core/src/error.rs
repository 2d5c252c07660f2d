use thiserror::Error;

use crate::address::Address;
use crate::role::Role;
use crate::Amount;

/// Failure conditions of the CargoCoin ledger.
///
/// Every variant aborts the attempted call. No balance, supply, role, or
/// configuration change and no event survives a returned error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A required address parameter was the zero address.
    #[error("Invalid address: {0} is the zero address")]
    InvalidAddress(&'static str),

    /// A required amount parameter was zero.
    #[error("Invalid amount: {0} must be greater than zero")]
    InvalidAmount(&'static str),

    /// A mint (or the initial supply) would push total supply above the cap.
    #[error("Exceeds max supply: requested {requested}, available {available}")]
    ExceedsMaxSupply { requested: Amount, available: Amount },

    /// The caller does not hold the role the operation requires.
    #[error("Unauthorized: {account} is missing role {role}")]
    Unauthorized { account: Address, role: Role },

    /// The debited account holds less than the requested amount.
    #[error("Insufficient balance: {account} has {balance}, needs {needed}")]
    InsufficientBalance {
        account: Address,
        balance: Amount,
        needed: Amount,
    },

    /// The spender's allowance is lower than the requested amount.
    #[error("Insufficient allowance: {spender} may spend {allowance}, needs {needed}")]
    InsufficientAllowance {
        spender: Address,
        allowance: Amount,
        needed: Amount,
    },

    /// The operation is gated on the ledger not being paused.
    #[error("Enforced pause: the ledger is paused")]
    EnforcedPause,

    /// `unpause` was called while the ledger was not paused.
    #[error("Expected pause: the ledger is not paused")]
    ExpectedPause,

    /// The initializer has already run on this proxy.
    #[error("Already initialized at storage version {0}")]
    AlreadyInitialized(u32),

    /// The proposed logic does not extend the current storage layout.
    #[error("Incompatible storage layout: {0}")]
    IncompatibleStorageLayout(String),

    /// The bound logic version does not provide the operation.
    #[error("Unsupported operation: {0} is not available in {1}")]
    UnsupportedOperation(&'static str, String),

    /// A 256-bit arithmetic step overflowed.
    #[error("Arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),

    /// Stored state no longer satisfies a ledger invariant.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// A value could not be parsed or (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        LedgerError::Serialization(e.to_string())
    }
}

impl From<hex::FromHexError> for LedgerError {
    fn from(e: hex::FromHexError) -> Self {
        LedgerError::Serialization(e.to_string())
    }
}
