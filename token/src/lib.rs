#![deny(clippy::pedantic)]
#![deny(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod dispatch;
pub mod error;
pub mod event;
pub mod ledger;
pub mod request;
pub mod result;

pub use dispatch::{dispatch, Dispatcher, Executed, Resolved};
pub use error::{DispatchError, LedgerError, RestoreError};
pub use event::Event;
pub use ledger::{ApprovalPolicy, Ledger, TokenMetadata, DEFAULT_DECIMALS};
pub use request::{CallArgs, OperationKind, OperationRequest};
pub use result::{Failure, FailureKind, OperationResult};
