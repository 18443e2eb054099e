use super::*;

fn send_inscription(value: u64, fee: &str) -> CommandBuilder {
  CommandBuilder::new(format!(
    "--segwit-key {SEGWIT_KEY} --taproot-key {TAPROOT_KEY} send-inscription --inscription {}:10 --inscription-value {value} --utxos utxos.json --recipient {TAPROOT_RECIPIENT} {fee}",
    txid(0xa),
  ))
}

#[test]
fn send_inscription_signs_transfer() {
  let output = send_inscription(10_000, "--fee-rate 2")
    .write("utxos.json", utxos(&[(1, 3_000), (2, 6_000)]))
    .run_and_deserialize_output::<Value>();

  assert_eq!(output["fee"], 441);
  assert!(output["transaction"]
    .as_str()
    .unwrap()
    .starts_with("020000000001"));
}

#[test]
fn send_inscription_with_fee_estimates() {
  let output = send_inscription(10_000, "--fee-estimates fees.json")
    .write("utxos.json", utxos(&[(1, 3_000), (2, 6_000)]))
    .write("fees.json", r#"{"fastestFee":3,"halfHourFee":2,"hourFee":1}"#)
    .run_and_deserialize_output::<Value>();

  assert_eq!(output["fee"], 441);
}

#[test]
fn uneconomical_inscription_is_refused() {
  send_inscription(100, "--fee-rate 1")
    .write("utxos.json", utxos(&[(1, 3_000)]))
    .expected_stderr(
      "error: inscription output value of 100 sat cannot cover fee of 111 sat with a margin of 10 sat\n",
    )
    .expected_exit_code(1)
    .run_and_extract_stdout();
}

#[test]
fn uneconomical_guard_uses_fastest_fee() {
  send_inscription(1_000, "--fee-estimates fees.json")
    .write("utxos.json", utxos(&[(1, 3_000)]))
    .write("fees.json", r#"{"fastestFee":10,"halfHourFee":1}"#)
    .expected_stderr(
      "error: inscription output value of 1000 sat cannot cover fee of 1110 sat with a margin of 10 sat\n",
    )
    .expected_exit_code(1)
    .run_and_extract_stdout();
}

#[test]
fn inscription_fee_margin_is_configurable() {
  send_inscription(111, "--fee-rate 1")
    .write("utxos.json", utxos(&[(1, 3_000)]))
    .env("ORDSEND_INSCRIPTION_FEE_MARGIN", "0")
    .run_and_deserialize_output::<Value>();

  send_inscription(200, "--fee-rate 1")
    .write("utxos.json", utxos(&[(1, 3_000)]))
    .env("ORDSEND_INSCRIPTION_FEE_MARGIN", "100")
    .expected_stderr(
      "error: inscription output value of 200 sat cannot cover fee of 111 sat with a margin of 100 sat\n",
    )
    .expected_exit_code(1)
    .run_and_extract_stdout();
}

#[test]
fn send_inscription_requires_taproot_key() {
  CommandBuilder::new(format!(
    "--segwit-key {SEGWIT_KEY} send-inscription --inscription {}:10 --inscription-value 1000 --utxos utxos.json --recipient {TAPROOT_RECIPIENT} --fee-rate 1",
    txid(0xa),
  ))
  .write("utxos.json", utxos(&[(1, 3_000)]))
  .expected_stderr("error: no taproot key specified\n")
  .expected_exit_code(1)
  .run_and_extract_stdout();
}
