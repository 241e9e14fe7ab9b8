use compute_sdk::ProposedTransaction;
use log::{debug, warn};

/// Splits `amount` evenly across `recipients`, one proposed transaction each,
/// in recipient order.
///
/// Every recipient gets `amount / n`; the `amount % n` left over is not
/// proposed to anyone. Duplicate recipients each get their own share.
#[must_use]
pub fn distribute(amount: u64, recipients: &[String]) -> Vec<ProposedTransaction> {
    let Some(count) = u64::try_from(recipients.len()).ok().filter(|&n| n > 0) else {
        warn!("No recipients to distribute {amount} to");
        return Vec::new();
    };
    let share = amount / count;
    debug!(
        "Distributing {share} each to {count} recipients, {} undistributed",
        amount % count
    );
    recipients
        .iter()
        .map(|recipient| ProposedTransaction::new(recipient.as_str(), share))
        .collect()
}
