//! Conversion between the wire [`TokenState`] and a live [`Ledger`].
use std::collections::BTreeMap;

use compute_sdk::schema::TokenState;
use erc20::{ApprovalPolicy, Ledger, RestoreError, TokenMetadata};
use itertools::Itertools;

/// # Errors
///
/// See [`Ledger::restore`].
pub fn restore(state: &TokenState, approval_policy: ApprovalPolicy) -> Result<Ledger, RestoreError> {
    let metadata = TokenMetadata {
        name: state.name.clone(),
        symbol: state.symbol.clone(),
        decimals: state.decimals,
    };
    let allowances = state.allowances.iter().flat_map(|(owner, spenders)| {
        spenders
            .iter()
            .map(|(spender, allowance)| ((*owner, *spender), *allowance))
    });
    Ledger::restore(
        metadata,
        approval_policy,
        state.total_supply,
        state.balances.iter().map(|(account, balance)| (*account, *balance)),
        allowances,
    )
}

/// Exports `ledger` with its total supply always declared, sorted by address.
#[must_use]
pub fn export(ledger: &Ledger) -> TokenState {
    let metadata = ledger.metadata();
    let allowances = ledger
        .allowances()
        .into_group_map_by(|((owner, _), _)| *owner)
        .into_iter()
        .map(|(owner, granted)| {
            let spenders = granted
                .into_iter()
                .map(|((_, spender), allowance)| (spender, allowance))
                .collect::<BTreeMap<_, _>>();
            (owner, spenders)
        })
        .collect();
    TokenState {
        name: metadata.name.clone(),
        symbol: metadata.symbol.clone(),
        decimals: metadata.decimals,
        total_supply: Some(ledger.total_supply()),
        balances: ledger.balances().collect(),
        allowances,
    }
}
