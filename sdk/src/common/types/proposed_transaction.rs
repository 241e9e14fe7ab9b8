use serde::{Deserialize, Serialize};

/// A transfer the surrounding settlement layer may later apply.
///
/// Programs only propose these; nothing in this workspace applies them.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedTransaction {
    pub recipient: String,
    pub amount: u64,
}

impl ProposedTransaction {
    #[must_use]
    pub fn new(recipient: impl Into<String>, amount: u64) -> Self {
        Self {
            recipient: recipient.into(),
            amount,
        }
    }
}
