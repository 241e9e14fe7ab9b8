use compute_sdk::schema::TokenState;
use compute_sdk::ProposedTransaction;
use erc20::{Event, OperationResult};
use serde::Serialize;

/// Everything one invocation reports back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeOutputs {
    pub result: OperationResult,
    pub transactions: Vec<ProposedTransaction>,
    pub events: Vec<Event>,
    /// Ledger state after the call, present whenever a ledger was run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_state: Option<TokenState>,
}

impl ComputeOutputs {
    #[must_use]
    pub fn new(result: OperationResult) -> Self {
        Self {
            result,
            transactions: Vec::new(),
            events: Vec::new(),
            token_state: None,
        }
    }
}
