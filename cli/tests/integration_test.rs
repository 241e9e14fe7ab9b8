use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::{json, Value};
use tempfile::TempDir;

const HOLDER: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const RECIPIENT: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

fn compute() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_compute"));
    command.env_remove("COMPUTE_CONFIG");
    command
}

fn invocation(contract_fn: &str, args: &Value) -> Value {
    json!({
        "version": 1,
        "accountInfo": { "accountAddress": HOLDER, "accountBalance": 0 },
        "protocolInput": { "version": 1, "blockHeight": 7, "blockTime": 1_700_000_000 },
        "applicationInput": {
            "contractFn": contract_fn,
            "args": args,
            "tokenState": {
                "name": "Token",
                "symbol": "TKN",
                "decimals": 18,
                "balances": { HOLDER: "10000" },
                "allowances": {}
            }
        }
    })
}

fn run_with_stdin(command: &mut Command, stdin: &str) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn compute");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for compute")
}

fn envelope(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "compute failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is one JSON document")
}

#[test]
fn run_transfer_from_stdin() {
    let input = invocation("transfer", &json!({ "to": RECIPIENT, "value": "4000" }));
    let output = run_with_stdin(compute().arg("run"), &input.to_string());
    let envelope = envelope(&output);

    assert_eq!(envelope["result"], json!({ "tag": "transfer", "value": true }));
    assert_eq!(envelope["events"][0]["type"], "transfer");
    assert_eq!(envelope["tokenState"]["balances"][HOLDER], "6000");
    assert_eq!(envelope["tokenState"]["balances"][RECIPIENT], "4000");
    assert_eq!(envelope["tokenState"]["totalSupply"], "10000");
    assert_eq!(envelope["transactions"], json!([]));
}

#[test]
fn run_between_files() {
    let temp_dir = TempDir::new().expect("Failed to create a temporary directory");
    let input_file = temp_dir.path().join("input.json");
    let output_file = temp_dir.path().join("output.json");
    let input = invocation("balanceOf", &json!({ "account": HOLDER }));
    fs::write(&input_file, input.to_string()).expect("Failed to write input");

    let output = compute()
        .args(["run", "--pretty"])
        .arg(&input_file)
        .arg(&output_file)
        .output()
        .expect("Failed to execute run command");
    assert!(output.status.success(), "Run command failed");
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(&output_file).expect("Failed to read output");
    assert!(written.contains('\n'), "pretty output spans lines");
    let envelope: Value = serde_json::from_str(&written).expect("output is JSON");
    assert_eq!(envelope["result"], json!({ "tag": "balanceOf", "value": "10000" }));
}

#[test]
fn failed_operation_still_succeeds() {
    let input = invocation("transfer", &json!({ "to": RECIPIENT, "value": "10001" }));
    let output = run_with_stdin(compute().arg("run"), &input.to_string());
    let envelope = envelope(&output);

    assert_eq!(envelope["result"]["tag"], "failure");
    assert_eq!(envelope["result"]["value"]["kind"], "insufficientBalance");
    assert_eq!(envelope["tokenState"]["balances"][HOLDER], "10000");
    assert_eq!(envelope["events"], json!([]));
}

#[test]
fn malformed_amount_exits_non_zero() {
    let input = invocation("transfer", &json!({ "to": RECIPIENT, "value": "-5" }));
    let output = run_with_stdin(compute().arg("run"), &input.to_string());
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn distribution_proposes_transactions() {
    let input = json!({
        "version": 1,
        "accountInfo": { "accountAddress": HOLDER, "accountBalance": 100 },
        "protocolInput": { "version": 1, "blockHeight": 7, "blockTime": 0 },
        "applicationInput": {
            "contractFn": "distribute",
            "amount": 10,
            "recipients": ["alice", "bob", "carol"]
        }
    });
    let output = run_with_stdin(compute().arg("run"), &input.to_string());
    let envelope = envelope(&output);

    assert_eq!(envelope["result"], json!({ "tag": "unknown" }));
    assert_eq!(
        envelope["transactions"],
        json!([
            { "recipient": "alice", "amount": 3 },
            { "recipient": "bob", "amount": 3 },
            { "recipient": "carol", "amount": 3 }
        ])
    );
    assert!(envelope.get("tokenState").is_none());
}

#[test]
fn demo_uses_configured_token() {
    let temp_dir = TempDir::new().expect("Failed to create a temporary directory");
    let config = temp_dir.path().join("compute.toml");
    fs::write(&config, "[token]\nname = \"Gold\"\nsymbol = \"GLD\"\n").expect("Failed to write config");

    let output = compute()
        .arg("demo")
        .env("COMPUTE_CONFIG", &config)
        .output()
        .expect("Failed to execute demo command");
    let envelope = envelope(&output);

    assert_eq!(envelope["result"], json!({ "tag": "transfer", "value": true }));
    assert_eq!(envelope["tokenState"]["symbol"], "GLD");
    assert_eq!(envelope["tokenState"]["balances"][RECIPIENT], "4000");
    assert_eq!(envelope["events"].as_array().map(Vec::len), Some(2));
}

#[test]
fn missing_config_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create a temporary directory");
    let output = compute()
        .arg("--config")
        .arg(temp_dir.path().join("absent.toml"))
        .arg("demo")
        .output()
        .expect("Failed to execute demo command");
    assert!(!output.status.success());
}

#[test]
fn resolve_names() {
    let output = compute()
        .args(["resolve", "transferFrom"])
        .output()
        .expect("Failed to execute resolve command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("TransferFrom"));
    assert!(stdout.contains("mutating"));

    let output = compute()
        .args(["resolve", "mint"])
        .output()
        .expect("Failed to execute resolve command");
    assert!(String::from_utf8_lossy(&output.stdout).contains("not a token operation"));
}
