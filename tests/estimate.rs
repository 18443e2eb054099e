use {super::*, ordsend::subcommand::estimate::Output};

#[test]
fn estimate_p2wpkh_transaction() {
  pretty_assert_eq!(
    CommandBuilder::new("estimate --inputs 2 --output p2wpkh=2").run_and_deserialize_output::<Output>(),
    Output {
      vbytes: 208.25,
      bytes: 371.0,
      weight: 833.0,
      fee: None,
    }
  );
}

#[test]
fn estimate_with_fee_rate() {
  let output = CommandBuilder::new("estimate --inputs 2 --output p2wpkh=2 --fee-rate 10")
    .run_and_deserialize_output::<Output>();

  assert_eq!(output.fee, Some(2_083));
}

#[test]
fn estimate_mixed_outputs() {
  let output = CommandBuilder::new(
    "estimate --input-script p2wpkh --inputs 3 --output p2tr=1 --output p2wpkh_output_count=1",
  )
  .run_and_deserialize_output::<Output>();

  assert_eq!(output.vbytes, 288.0);
}

#[test]
fn estimate_taproot_transfer() {
  let output = CommandBuilder::new("estimate --input-script p2tr --inputs 1 --output p2tr=1")
    .run_and_deserialize_output::<Output>();

  assert_eq!(output.vbytes, 111.0);
}

#[test]
fn unknown_output_tags_are_ignored() {
  let output = CommandBuilder::new("estimate --inputs 1 --output p2pk=3")
    .run_and_deserialize_output::<Output>();

  assert_eq!(output.vbytes, 10.75 + 67.75);
}

#[test]
fn multisig_inputs_require_multisig_flag() {
  CommandBuilder::new("estimate --input-script p2wsh --inputs 1")
    .expected_stderr("error: p2wsh inputs require --multisig\n")
    .expected_exit_code(1)
    .run_and_extract_stdout();

  let output = CommandBuilder::new("estimate --input-script p2wsh --inputs 1 --multisig 2-of-3")
    .run_and_deserialize_output::<Output>();

  assert_eq!(output.vbytes, 10.75 + 36.0 + 254.0 / 4.0 + 4.0);
}

#[test]
fn minify() {
  CommandBuilder::new("--minify estimate --inputs 0")
    .expected_stdout("{\"vbytes\":10.75,\"bytes\":13.0,\"weight\":43.0,\"fee\":null}\n")
    .run_and_extract_stdout();
}
