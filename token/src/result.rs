use compute_sdk::common::types::AmountString;
use compute_sdk::Amount;
use serde::Serialize;
use serde_with::serde_as;

use crate::error::{DispatchError, LedgerError};
use crate::request::OperationKind;

/// Outcome of one dispatched call.
///
/// Encoded as `{"tag": .., "value": ..}`. The tag is the variant, never
/// inferred from the payload, and `Unknown` carries no value.
///
/// `TotalSupply`, `BalanceOf` and `Allowance` are written as decimal strings
/// (`{"tag": "balanceOf", "value": "6000"}`): a JSON number cannot hold 256
/// bits exactly. `Decimals` stays a number.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", content = "value", rename_all = "camelCase")]
pub enum OperationResult {
    Name(String),
    Symbol(String),
    Decimals(u8),
    TotalSupply(#[serde_as(as = "AmountString")] Amount),
    BalanceOf(#[serde_as(as = "AmountString")] Amount),
    Allowance(#[serde_as(as = "AmountString")] Amount),
    Approve(bool),
    Transfer(bool),
    TransferFrom(bool),
    Unknown,
    Failure(Failure),
}

impl OperationResult {
    #[must_use]
    pub fn is_failure(&self) -> bool { matches!(self, Self::Failure(_)) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    InvalidAccount,
    InvalidSender,
    InvalidReceiver,
    InsufficientBalance,
    InsufficientAllowance,
    Overflow,
    MalformedRequest,
}

impl From<&LedgerError> for FailureKind {
    fn from(value: &LedgerError) -> Self {
        match value {
            LedgerError::InvalidAccount => Self::InvalidAccount,
            LedgerError::InvalidSender => Self::InvalidSender,
            LedgerError::InvalidReceiver => Self::InvalidReceiver,
            LedgerError::InsufficientBalance { .. } => Self::InsufficientBalance,
            LedgerError::InsufficientAllowance { .. } => Self::InsufficientAllowance,
            LedgerError::Overflow => Self::Overflow,
        }
    }
}

/// Which call failed, why, and a human-readable account of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub operation: OperationKind,
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    #[must_use]
    pub fn from_ledger(operation: OperationKind, error: &LedgerError) -> Self {
        Self {
            operation,
            kind: error.into(),
            message: error.to_string(),
        }
    }

    /// `None` for [`DispatchError::Unsupported`], which is not a failure.
    #[must_use]
    pub fn from_dispatch(error: &DispatchError) -> Option<Self> {
        match error {
            DispatchError::MalformedRequest { operation, .. } => Some(Self {
                operation: operation.clone(),
                kind: FailureKind::MalformedRequest,
                message: error.to_string(),
            }),
            DispatchError::Unsupported(_) => None,
        }
    }
}
