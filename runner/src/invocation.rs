//! One invocation, from decoded inputs to the output envelope.
use anyhow::{Context, Result};
use compute_sdk::schema::ComputeInputs;
use compute_sdk::{Address, Amount};
use erc20::{CallArgs, Dispatcher, Ledger, OperationResult};
use log::{debug, info, warn};

use crate::config::RunnerConfig;
use crate::distribution::distribute;
use crate::outputs::ComputeOutputs;
use crate::snapshot;

/// Account the demo scenario mints to and transfers from.
pub const DEMO_HOLDER: Address = Address::repeat_byte(0xaa);
/// Account the demo scenario transfers to.
pub const DEMO_RECIPIENT: Address = Address::repeat_byte(0xbb);

/// Runs the call named by `contractFn`, on behalf of the invoking account.
///
/// The ledger is rebuilt from the input's token state, or starts empty with
/// the configured metadata. Recipients, if any, are handed to the
/// distribution program alongside the call. A refused token operation is a
/// `failure` result, not an error.
///
/// # Errors
///
/// Errors if the input's token state is not a valid ledger.
pub fn run(inputs: &ComputeInputs, config: &RunnerConfig) -> Result<ComputeOutputs> {
    let application = &inputs.application_input;
    debug!(
        "Invocation at block {} ({}), contractFn {:?}",
        inputs.protocol_input.block_height,
        inputs.protocol_input.block_time,
        application.contract_fn
    );

    let resolved = Dispatcher.resolve(&application.contract_fn);
    let runs_ledger = resolved.kind().is_known() || application.token_state.is_some();

    let policy = config.ledger.approval_policy;
    let mut ledger = match &application.token_state {
        Some(state) => snapshot::restore(state, policy).context("invalid tokenState")?,
        None => Ledger::with_metadata(config.token.metadata()).with_approval_policy(policy),
    };

    let caller = match inputs.account_info.account_address.parse::<Address>() {
        Ok(caller) => Some(caller),
        Err(error) => {
            if resolved.kind().is_mutating() {
                warn!(
                    "accountAddress {:?} is not an address: {error}",
                    inputs.account_info.account_address
                );
            }
            None
        }
    };

    let result = resolved
        .execute(caller, &CallArgs::from(application.args), &mut ledger)
        .finish();

    let mut outputs = ComputeOutputs::new(result);
    if !application.recipients.is_empty() {
        outputs.transactions = distribute(application.amount, &application.recipients);
    }
    if runs_ledger {
        outputs.events = ledger.take_events();
        outputs.token_state = Some(snapshot::export(&ledger));
    }
    log_summary(&application.contract_fn, &outputs);
    Ok(outputs)
}

/// Mints `10000` to [`DEMO_HOLDER`] on a fresh ledger, then dispatches a
/// `transfer` of `4000` from it to [`DEMO_RECIPIENT`].
///
/// # Errors
///
/// Errors if the demo mint is refused, which a fresh ledger never does.
pub fn demo(config: &RunnerConfig) -> Result<ComputeOutputs> {
    let mut ledger = Ledger::with_metadata(config.token.metadata())
        .with_approval_policy(config.ledger.approval_policy);
    ledger
        .mint(DEMO_HOLDER, Amount::from(10_000))
        .context("demo mint")?;

    let args = CallArgs {
        to: Some(DEMO_RECIPIENT),
        value: Some(Amount::from(4_000)),
        ..CallArgs::default()
    };
    let result = Dispatcher
        .resolve("transfer")
        .execute(Some(DEMO_HOLDER), &args, &mut ledger)
        .finish();

    let outputs = ComputeOutputs {
        events: ledger.take_events(),
        token_state: Some(snapshot::export(&ledger)),
        ..ComputeOutputs::new(result)
    };
    log_summary("transfer", &outputs);
    Ok(outputs)
}

fn log_summary(function_name: &str, outputs: &ComputeOutputs) {
    match &outputs.result {
        OperationResult::Failure(failure) =>
            info!("{function_name} failed: {}", failure.message),
        OperationResult::Unknown => info!("{function_name:?} is not a token operation"),
        _ => info!("{function_name} succeeded"),
    }
    info!(
        "{} events, {} proposed transactions",
        outputs.events.len(),
        outputs.transactions.len()
    );
}
