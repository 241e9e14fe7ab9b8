//! Single-shot dispatch of one named call against a [`Ledger`].
//!
//! The dispatcher moves through `Idle -> Resolved -> Executed -> Done`, one
//! type per state. Every transition consumes the previous state, so a
//! dispatcher can neither skip a step nor run twice.
use compute_sdk::Address;
use log::{debug, warn};

use crate::error::DispatchError;
use crate::ledger::Ledger;
use crate::request::{CallArgs, OperationKind, OperationRequest};
use crate::result::{Failure, OperationResult};

/// The idle dispatcher.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dispatcher;

impl Dispatcher {
    /// Matches `function_name` against the token interface. Never fails:
    /// unmatched names resolve to [`OperationKind::Unknown`].
    #[must_use]
    pub fn resolve(self, function_name: &str) -> Resolved {
        let kind = OperationKind::resolve(function_name);
        debug!("Resolved {function_name:?} to {kind:?}");
        Resolved { kind }
    }
}

/// A dispatcher that knows which operation to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    kind: OperationKind,
}

impl Resolved {
    #[must_use]
    pub fn kind(&self) -> &OperationKind { &self.kind }

    /// Validates `args` for the resolved operation and runs it.
    ///
    /// `caller` is the account the call is made on behalf of: the sender of
    /// `transfer`, the owner in `approve`, the spender in `transferFrom`.
    /// Operations that need it report a malformed request when it is
    /// `None`. An unknown operation touches neither `args` nor `ledger`.
    #[must_use]
    pub fn execute(self, caller: Option<Address>, args: &CallArgs, ledger: &mut Ledger) -> Executed {
        let result = match OperationRequest::from_args(&self.kind, args) {
            Ok(request) => match (caller, request) {
                (
                    None,
                    OperationRequest::Approve { .. }
                    | OperationRequest::Transfer { .. }
                    | OperationRequest::TransferFrom { .. },
                ) => {
                    let missing = DispatchError::MalformedRequest {
                        operation: self.kind.clone(),
                        field: "caller",
                    };
                    malformed(&missing)
                }
                (caller, request) => run(caller.unwrap_or_default(), request, ledger),
            },
            Err(DispatchError::Unsupported(name)) => {
                warn!("{name:?} is not a token operation");
                OperationResult::Unknown
            }
            Err(error) => malformed(&error),
        };
        debug!("{} -> {result:?}", self.kind);
        Executed {
            kind: self.kind,
            result,
        }
    }
}

/// A dispatcher holding the one result of its call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Executed {
    kind: OperationKind,
    result: OperationResult,
}

impl Executed {
    #[must_use]
    pub fn kind(&self) -> &OperationKind { &self.kind }

    #[must_use]
    pub fn result(&self) -> &OperationResult { &self.result }

    /// Ends the dispatch, handing out its result.
    #[must_use]
    pub fn finish(self) -> OperationResult { self.result }
}

/// Resolves, executes and finishes in one go.
#[must_use]
pub fn dispatch(
    function_name: &str,
    caller: Option<Address>,
    args: &CallArgs,
    ledger: &mut Ledger,
) -> OperationResult {
    Dispatcher
        .resolve(function_name)
        .execute(caller, args, ledger)
        .finish()
}

fn malformed(error: &DispatchError) -> OperationResult {
    Failure::from_dispatch(error).map_or(OperationResult::Unknown, OperationResult::Failure)
}

/// `caller` is only read by the mutating requests, which have already been
/// checked to carry a real one.
fn run(caller: Address, request: OperationRequest, ledger: &mut Ledger) -> OperationResult {
    let operation = request.kind();
    let outcome = match request {
        OperationRequest::Name => Ok(OperationResult::Name(ledger.name().to_owned())),
        OperationRequest::Symbol => Ok(OperationResult::Symbol(ledger.symbol().to_owned())),
        OperationRequest::Decimals => Ok(OperationResult::Decimals(ledger.decimals())),
        OperationRequest::TotalSupply => Ok(OperationResult::TotalSupply(ledger.total_supply())),
        OperationRequest::BalanceOf { account } =>
            Ok(OperationResult::BalanceOf(ledger.balance_of(&account))),
        OperationRequest::Allowance { owner, spender } =>
            Ok(OperationResult::Allowance(ledger.allowance(&owner, &spender))),
        OperationRequest::Approve { spender, value } => ledger
            .approve(caller, spender, value)
            .map(OperationResult::Approve),
        OperationRequest::Transfer { to, value } => ledger
            .transfer(caller, to, value)
            .map(OperationResult::Transfer),
        OperationRequest::TransferFrom { from, to, value } => ledger
            .transfer_from(caller, from, to, value)
            .map(OperationResult::TransferFrom),
    };
    outcome.unwrap_or_else(|error| {
        debug!("{operation} refused: {error}");
        OperationResult::Failure(Failure::from_ledger(operation, &error))
    })
}
