use std::fmt;

use compute_sdk::schema::FunctionArgs;
use compute_sdk::{Address, Amount};
use serde::{Serialize, Serializer};

use crate::error::DispatchError;

/// The token function a caller asked for, resolved from its name.
///
/// Names outside the token interface resolve to [`OperationKind::Unknown`]
/// rather than an error, so "not a token call" stays distinguishable from
/// "a token call that failed".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Name,
    Symbol,
    Decimals,
    TotalSupply,
    BalanceOf,
    Allowance,
    Approve,
    Transfer,
    TransferFrom,
    Unknown(String),
}

impl OperationKind {
    pub const KNOWN: [OperationKind; 9] = [
        OperationKind::Name,
        OperationKind::Symbol,
        OperationKind::Decimals,
        OperationKind::TotalSupply,
        OperationKind::BalanceOf,
        OperationKind::Allowance,
        OperationKind::Approve,
        OperationKind::Transfer,
        OperationKind::TransferFrom,
    ];

    /// Exact, case-sensitive match against the token function names.
    #[must_use]
    pub fn resolve(function_name: &str) -> Self {
        match function_name {
            "name" => Self::Name,
            "symbol" => Self::Symbol,
            "decimals" => Self::Decimals,
            "totalSupply" => Self::TotalSupply,
            "balanceOf" => Self::BalanceOf,
            "allowance" => Self::Allowance,
            "approve" => Self::Approve,
            "transfer" => Self::Transfer,
            "transferFrom" => Self::TransferFrom,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// The function name this kind was resolved from.
    #[must_use]
    pub fn function_name(&self) -> &str {
        match self {
            Self::Name => "name",
            Self::Symbol => "symbol",
            Self::Decimals => "decimals",
            Self::TotalSupply => "totalSupply",
            Self::BalanceOf => "balanceOf",
            Self::Allowance => "allowance",
            Self::Approve => "approve",
            Self::Transfer => "transfer",
            Self::TransferFrom => "transferFrom",
            Self::Unknown(name) => name,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool { !matches!(self, Self::Unknown(_)) }

    /// Whether a successful call changes the ledger.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::Approve | Self::Transfer | Self::TransferFrom)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.function_name()) }
}

impl Serialize for OperationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.function_name())
    }
}

/// Operands of a call as supplied by the caller. `None` means the caller did
/// not supply that operand; a supplied zero address is a real operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallArgs {
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub owner: Option<Address>,
    pub spender: Option<Address>,
    pub account: Option<Address>,
    pub value: Option<Amount>,
}

impl From<FunctionArgs> for CallArgs {
    fn from(args: FunctionArgs) -> Self {
        let FunctionArgs {
            from,
            to,
            owner,
            spender,
            account,
            value,
        } = args;
        Self {
            from,
            to,
            owner,
            spender,
            account,
            value,
        }
    }
}

/// A validated call: one variant per token function, holding exactly the
/// operands that function needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationRequest {
    Name,
    Symbol,
    Decimals,
    TotalSupply,
    BalanceOf {
        account: Address,
    },
    Allowance {
        owner: Address,
        spender: Address,
    },
    Approve {
        spender: Address,
        value: Amount,
    },
    Transfer {
        to: Address,
        value: Amount,
    },
    TransferFrom {
        from: Address,
        to: Address,
        value: Amount,
    },
}

impl OperationRequest {
    /// Picks the operands `kind` needs out of `args`. Operands the function
    /// does not take are ignored.
    ///
    /// # Errors
    ///
    /// [`DispatchError::MalformedRequest`] naming the first missing operand,
    /// [`DispatchError::Unsupported`] for [`OperationKind::Unknown`].
    pub fn from_args(kind: &OperationKind, args: &CallArgs) -> Result<Self, DispatchError> {
        let require = |field: &'static str, value: Option<Address>| {
            value.ok_or_else(|| DispatchError::MalformedRequest {
                operation: kind.clone(),
                field,
            })
        };
        let value = || {
            args.value.ok_or_else(|| DispatchError::MalformedRequest {
                operation: kind.clone(),
                field: "value",
            })
        };

        Ok(match kind {
            OperationKind::Name => Self::Name,
            OperationKind::Symbol => Self::Symbol,
            OperationKind::Decimals => Self::Decimals,
            OperationKind::TotalSupply => Self::TotalSupply,
            OperationKind::BalanceOf => Self::BalanceOf {
                account: require("account", args.account)?,
            },
            OperationKind::Allowance => Self::Allowance {
                owner: require("owner", args.owner)?,
                spender: require("spender", args.spender)?,
            },
            OperationKind::Approve => Self::Approve {
                spender: require("spender", args.spender)?,
                value: value()?,
            },
            OperationKind::Transfer => Self::Transfer {
                to: require("to", args.to)?,
                value: value()?,
            },
            OperationKind::TransferFrom => Self::TransferFrom {
                from: require("from", args.from)?,
                to: require("to", args.to)?,
                value: value()?,
            },
            OperationKind::Unknown(name) => return Err(DispatchError::Unsupported(name.clone())),
        })
    }

    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Name => OperationKind::Name,
            Self::Symbol => OperationKind::Symbol,
            Self::Decimals => OperationKind::Decimals,
            Self::TotalSupply => OperationKind::TotalSupply,
            Self::BalanceOf { .. } => OperationKind::BalanceOf,
            Self::Allowance { .. } => OperationKind::Allowance,
            Self::Approve { .. } => OperationKind::Approve,
            Self::Transfer { .. } => OperationKind::Transfer,
            Self::TransferFrom { .. } => OperationKind::TransferFrom,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn resolve_and_function_name_agree() {
        for kind in OperationKind::KNOWN {
            assert_eq!(OperationKind::resolve(kind.function_name()), kind);
            assert!(kind.is_known());
        }
    }

    #[test_case("mint"; "ledger only")]
    #[test_case("Transfer"; "wrong case")]
    #[test_case("transfer_from"; "snake case")]
    #[test_case(""; "empty")]
    #[test_case("distribute"; "other program")]
    fn unmatched_names_are_unknown(name: &str) {
        let kind = OperationKind::resolve(name);
        assert_eq!(kind, OperationKind::Unknown(name.to_owned()));
        assert!(!kind.is_known());
        assert_eq!(kind.function_name(), name);
    }

    #[test]
    fn picks_only_needed_operands() {
        let args = CallArgs {
            to: Some(Address::repeat_byte(2)),
            from: Some(Address::repeat_byte(9)),
            value: Some(Amount::from(7)),
            ..CallArgs::default()
        };
        assert_eq!(
            OperationRequest::from_args(&OperationKind::Transfer, &args),
            Ok(OperationRequest::Transfer {
                to: Address::repeat_byte(2),
                value: Amount::from(7),
            })
        );
    }

    #[test]
    fn wire_args_carry_over_unchanged() {
        let wire = FunctionArgs {
            owner: Some(Address::repeat_byte(4)),
            spender: Some(Address::ZERO),
            value: Some(Amount::MAX),
            ..FunctionArgs::default()
        };
        assert_eq!(CallArgs::from(wire), CallArgs {
            owner: Some(Address::repeat_byte(4)),
            spender: Some(Address::ZERO),
            value: Some(Amount::MAX),
            ..CallArgs::default()
        });
    }

    #[test]
    fn supplied_zero_address_is_an_operand() {
        let args = CallArgs {
            to: Some(Address::ZERO),
            value: Some(Amount::ZERO),
            ..CallArgs::default()
        };
        assert_eq!(
            OperationRequest::from_args(&OperationKind::Transfer, &args),
            Ok(OperationRequest::Transfer {
                to: Address::ZERO,
                value: Amount::ZERO,
            })
        );
    }

    #[test_case(OperationKind::BalanceOf, "account")]
    #[test_case(OperationKind::Allowance, "owner")]
    #[test_case(OperationKind::Approve, "spender")]
    #[test_case(OperationKind::Transfer, "to")]
    #[test_case(OperationKind::TransferFrom, "from")]
    fn missing_operand_is_malformed(kind: OperationKind, field: &'static str) {
        assert_eq!(
            OperationRequest::from_args(&kind, &CallArgs::default()),
            Err(DispatchError::MalformedRequest {
                operation: kind,
                field,
            })
        );
    }

    #[test]
    fn missing_value_is_malformed() {
        let args = CallArgs {
            spender: Some(Address::repeat_byte(3)),
            ..CallArgs::default()
        };
        assert_eq!(
            OperationRequest::from_args(&OperationKind::Approve, &args),
            Err(DispatchError::MalformedRequest {
                operation: OperationKind::Approve,
                field: "value",
            })
        );
    }

    #[test]
    fn unknown_is_unsupported() {
        assert_eq!(
            OperationRequest::from_args(&OperationKind::resolve("mint"), &CallArgs::default()),
            Err(DispatchError::Unsupported("mint".to_owned()))
        );
    }
}
