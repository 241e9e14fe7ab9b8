//! Reading the input snapshot and writing the output envelope.
use std::io::{Read, Write};

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::schema::ComputeInputs;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("failed to read invocation input")]
    Read(#[source] std::io::Error),
    #[error("failed to write invocation output")]
    Write(#[source] std::io::Error),
    #[error("malformed invocation payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads and decodes one complete input snapshot.
///
/// # Errors
///
/// Errors if the reader fails or the payload does not match the schema,
/// including malformed address or amount text.
pub fn gather<R: Read>(mut reader: R) -> Result<ComputeInputs, CodecError> {
    let mut payload = Vec::new();
    let bytes_read = reader.read_to_end(&mut payload).map_err(CodecError::Read)?;
    debug!("Read {bytes_read} bytes of invocation input.");
    let inputs: ComputeInputs = serde_json::from_slice(&payload)?;
    debug!(
        "Decoded input v{} for contractFn {:?} at block {}",
        inputs.version,
        inputs.application_input.contract_fn,
        inputs.protocol_input.block_height,
    );
    Ok(inputs)
}

/// Serializes `outputs` as a single JSON document followed by a newline.
///
/// # Errors
///
/// Errors if serialization or the writer fails.
pub fn commit<W: Write, T: Serialize>(
    mut writer: W,
    outputs: &T,
    pretty: bool,
) -> Result<(), CodecError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, outputs)?;
    } else {
        serde_json::to_writer(&mut writer, outputs)?;
    }
    writeln!(writer).map_err(CodecError::Write)?;
    writer.flush().map_err(CodecError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::ProposedTransaction;

    #[test]
    fn gather_reports_schema_errors() {
        let err = gather(&b"{\"version\": 1}"[..]).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn commit_writes_one_line() {
        let mut out = Vec::new();
        commit(&mut out, &vec![ProposedTransaction::new("alice", 5)], false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[{\"recipient\":\"alice\",\"amount\":5}]\n"
        );
    }
}
