use compute_sdk::{Address, Amount};
use thiserror::Error;

use crate::request::OperationKind;

/// Why a ledger operation was refused. A refused operation never changes the
/// ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("the zero address is not a valid account")]
    InvalidAccount,
    #[error("the zero address cannot send tokens")]
    InvalidSender,
    #[error("the zero address cannot receive tokens")]
    InvalidReceiver,
    #[error("{account} holds {balance}, needs {needed}")]
    InsufficientBalance {
        account: Address,
        balance: Amount,
        needed: Amount,
    },
    #[error("{spender} may spend {allowance} of {owner}'s tokens, needs {needed}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        allowance: Amount,
        needed: Amount,
    },
    #[error("amount exceeds the 256-bit range")]
    Overflow,
}

/// Why a ledger could not be rebuilt from a snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RestoreError {
    #[error("snapshot assigns {0} to the zero address")]
    ZeroAddress(&'static str),
    #[error("sum of snapshot balances exceeds the 256-bit range")]
    Overflow,
    #[error("snapshot declares a total supply of {declared} but its balances sum to {computed}")]
    SupplyMismatch { declared: Amount, computed: Amount },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("`{operation}` requires argument `{field}`")]
    MalformedRequest {
        operation: OperationKind,
        field: &'static str,
    },
    #[error("`{0}` is not a token operation")]
    Unsupported(String),
}
