pub(crate) mod address;
pub(crate) mod amount;
pub(crate) mod proposed_transaction;

pub use address::{Address, AddressError, ADDRESS_BYTES};
pub use amount::{parse_amount, Amount, AmountError, AmountString};
pub use proposed_transaction::ProposedTransaction;
