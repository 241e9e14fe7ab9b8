use compute_sdk::common::types::AmountString;
use compute_sdk::{Address, Amount};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// Notification emitted by a successful ledger mutation, in the order the
/// mutations happened.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    /// Tokens moved. `from` is the zero address for a mint, `to` for a burn.
    Transfer {
        from: Address,
        to: Address,
        #[serde_as(as = "AmountString")]
        value: Amount,
    },
    /// `owner` set the allowance of `spender` to `value`.
    Approval {
        owner: Address,
        spender: Address,
        #[serde_as(as = "AmountString")]
        value: Amount,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_type_tag() {
        let event = Event::Transfer {
            from: Address::ZERO,
            to: Address::repeat_byte(0xaa),
            value: Amount::from(10_000),
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "transfer");
        assert_eq!(json["from"], Address::ZERO.to_string());
        assert_eq!(json["value"], "10000");
        assert_eq!(serde_json::from_value::<Event>(json).unwrap(), event);
    }
}
