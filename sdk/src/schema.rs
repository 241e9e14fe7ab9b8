//! Wire schema of one invocation.
//!
//! These structs are the only place JSON key names live. The ledger and the
//! dispatcher work on the typed values extracted from them and never see a
//! key.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, MapPreventDuplicates};

use crate::common::types::{Address, Amount, AmountString};

/// Complete input snapshot handed to a program.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeInputs {
    pub version: i32,
    pub account_info: AccountInfo,
    pub protocol_input: ProtocolInputs,
    pub application_input: ApplicationInputs,
}

/// The account on whose behalf the program runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Kept textual: only token operations need it as an [`Address`], and a
    /// distribution run must not fail over an account it never touches.
    pub account_address: String,
    pub account_balance: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolInputs {
    pub version: i32,
    pub block_height: u64,
    pub block_time: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInputs {
    pub contract_fn: String,
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub args: FunctionArgs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_state: Option<TokenState>,
}

/// Operands of a token call. Every field is optional on the wire; which ones
/// are required depends on the function being called.
#[serde_as]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spender: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Address>,
    #[serde_as(as = "Option<AmountString>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Amount>,
}

/// Serialized form of a token ledger, read on input and written back on
/// output.
///
/// Map keys are compared after parsing, so two spellings of one address
/// (`0xAB..` and `0xab..`) are a duplicate key and refused.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenState {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde_as(as = "Option<AmountString>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<Amount>,
    #[serde_as(as = "MapPreventDuplicates<_, AmountString>")]
    #[serde(default)]
    pub balances: BTreeMap<Address, Amount>,
    #[serde_as(as = "MapPreventDuplicates<_, MapPreventDuplicates<_, AmountString>>")]
    #[serde(default)]
    pub allowances: BTreeMap<Address, BTreeMap<Address, Amount>>,
}
