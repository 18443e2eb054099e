//! Transaction size estimation from input and output counts.
//!
//! Fees have to be known before a transaction can be built, but the size of
//! the transaction depends on how many inputs are needed to pay the fee. Coin
//! selection breaks the cycle by estimating the size after each added input,
//! so estimation is plain arithmetic on counts and never builds a
//! transaction.
//!
//! Sizes are in virtual bytes and may be fractional: witness bytes count a
//! quarter. Only the fee derived from an estimate is rounded.

use super::*;

const P2PKH_IN_SIZE: f64 = 148.0;
const P2SH_P2WPKH_IN_SIZE: f64 = 91.0;
const P2WPKH_IN_SIZE: f64 = 67.75;
const P2TR_IN_SIZE: f64 = 57.25;

const P2PKH_OUT_SIZE: f64 = 34.0;
const P2SH_OUT_SIZE: f64 = 32.0;
const P2SH_P2WPKH_OUT_SIZE: f64 = 32.0;
const P2SH_P2WSH_OUT_SIZE: f64 = 32.0;
const P2WPKH_OUT_SIZE: f64 = 31.0;
const P2WSH_OUT_SIZE: f64 = 43.0;
const P2TR_OUT_SIZE: f64 = 43.0;

const PUBKEY_SIZE: usize = 33;
const SIGNATURE_SIZE: usize = 72;

/// Signature and public key, with their length prefixes.
const P2WPKH_WITNESS_SIZE: usize = 107;
/// Schnorr signature with its length prefix.
const P2TR_WITNESS_SIZE: usize = 65;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SizeEstimateRequest {
  pub input_script: InputScriptType,
  pub input_count: usize,
  /// Required signatures, for multisig inputs.
  pub input_m: usize,
  /// Public keys, for multisig inputs.
  pub input_n: usize,
  pub outputs: BTreeMap<OutputType, usize>,
}

impl SizeEstimateRequest {
  pub fn new(input_script: InputScriptType, input_count: usize) -> Self {
    Self {
      input_script,
      input_count,
      ..default()
    }
  }

  pub fn multisig(self, input_m: usize, input_n: usize) -> Self {
    Self {
      input_m,
      input_n,
      ..self
    }
  }

  /// Adds `count` outputs of `output_type`. A `None` output type contributes
  /// nothing to the estimate.
  pub fn outputs(mut self, output_type: Option<OutputType>, count: usize) -> Self {
    if let Some(output_type) = output_type {
      *self.outputs.entry(output_type).or_default() += count;
    }
    self
  }

  /// Adds `count` outputs of the type named by `tag`. Unknown tags are
  /// ignored.
  pub fn output_tag(self, tag: &str, count: usize) -> Self {
    let output_type = OutputType::from_tag(tag);

    if output_type.is_none() {
      log::warn!("ignoring {count} outputs with unknown type tag `{tag}`");
    }

    self.outputs(output_type, count)
  }

  fn output_count(&self) -> usize {
    self.outputs.values().sum()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeEstimate {
  pub vbytes: f64,
  pub bytes: f64,
  pub weight: f64,
}

#[allow(clippy::cast_precision_loss)]
pub fn calc_tx_size(request: &SizeEstimateRequest) -> SizeEstimate {
  let (input_size, input_witness_size) = input_size(request);

  let outputs = request
    .outputs
    .iter()
    .map(|(output_type, count)| output_size(*output_type) * *count as f64)
    .sum::<f64>();

  let vbytes = overhead_vbytes(request.input_script, request.input_count, request.output_count())
    + input_size * request.input_count as f64
    + outputs;

  let bytes = overhead_extra_raw_bytes(request.input_script, request.input_count)
    + vbytes
    + (input_witness_size * request.input_count) as f64 * 3.0 / 4.0;

  SizeEstimate {
    vbytes,
    bytes,
    weight: vbytes * 4.0,
  }
}

/// Size in vbytes of one input, and size of its witness in bytes.
#[allow(clippy::cast_precision_loss)]
fn input_size(request: &SizeEstimateRequest) -> (f64, usize) {
  match request.input_script {
    InputScriptType::P2pkh => (P2PKH_IN_SIZE, 0),
    InputScriptType::P2shP2wpkh => (P2SH_P2WPKH_IN_SIZE, P2WPKH_WITNESS_SIZE),
    InputScriptType::P2wpkh => (P2WPKH_IN_SIZE, P2WPKH_WITNESS_SIZE),
    InputScriptType::P2tr => (P2TR_IN_SIZE, P2TR_WITNESS_SIZE),
    InputScriptType::P2sh => {
      let redeem_script_size = multisig_redeem_script_size(request.input_n);
      let script_sig_size = 1
        + request.input_m * (1 + SIGNATURE_SIZE)
        + script_length_element_size(redeem_script_size)
        + redeem_script_size;

      (
        (32 + 4 + var_int_size(script_sig_size) + script_sig_size + 4) as f64,
        0,
      )
    }
    InputScriptType::P2shP2wsh | InputScriptType::P2wsh => {
      let redeem_script_size = multisig_redeem_script_size(request.input_n);
      let witness_size = 1
        + request.input_m * (1 + SIGNATURE_SIZE)
        + script_length_element_size(redeem_script_size)
        + redeem_script_size;

      let mut size = 36.0 + witness_size as f64 / 4.0 + 4.0;

      if request.input_script == InputScriptType::P2shP2wsh {
        size += 32.0 + 3.0;
      }

      (size, witness_size)
    }
  }
}

fn output_size(output_type: OutputType) -> f64 {
  match output_type {
    OutputType::P2pkh => P2PKH_OUT_SIZE,
    OutputType::P2sh => P2SH_OUT_SIZE,
    OutputType::P2shP2wpkh => P2SH_P2WPKH_OUT_SIZE,
    OutputType::P2shP2wsh => P2SH_P2WSH_OUT_SIZE,
    OutputType::P2wpkh => P2WPKH_OUT_SIZE,
    OutputType::P2wsh => P2WSH_OUT_SIZE,
    OutputType::P2tr => P2TR_OUT_SIZE,
  }
}

/// `OP_M <pubkeys> OP_N OP_CHECKMULTISIG`
fn multisig_redeem_script_size(n: usize) -> usize {
  1 + n * (1 + PUBKEY_SIZE) + 1 + 1
}

/// Version, input and output counts, and lock time, plus segwit marker, flag
/// and witness counts when the inputs carry witnesses.
#[allow(clippy::cast_precision_loss)]
fn overhead_vbytes(input_script: InputScriptType, inputs: usize, outputs: usize) -> f64 {
  (4 + var_int_size(inputs) + var_int_size(outputs) + 4) as f64
    + witness_overhead_vbytes(input_script, inputs)
}

fn overhead_extra_raw_bytes(input_script: InputScriptType, inputs: usize) -> f64 {
  witness_overhead_vbytes(input_script, inputs) * 3.0
}

#[allow(clippy::cast_precision_loss)]
fn witness_overhead_vbytes(input_script: InputScriptType, inputs: usize) -> f64 {
  if input_script.is_segwit() {
    0.25 + 0.25 + var_int_size(inputs) as f64 / 4.0
  } else {
    0.0
  }
}

fn var_int_size(n: usize) -> usize {
  match n {
    0..253 => 1,
    253..65535 => 3,
    65535..4294967295 => 5,
    _ => 9,
  }
}

fn script_length_element_size(length: usize) -> usize {
  match length {
    0..75 => 1,
    75..=255 => 2,
    256..=65535 => 3,
    _ => 5,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn p2wpkh(inputs: usize) -> SizeEstimateRequest {
    SizeEstimateRequest::new(InputScriptType::P2wpkh, inputs)
  }

  #[test]
  fn p2wpkh_to_two_p2wpkh_outputs() {
    #[track_caller]
    fn case(inputs: usize, vbytes: f64) {
      assert_eq!(
        calc_tx_size(&p2wpkh(inputs).outputs(Some(OutputType::P2wpkh), 2)).vbytes,
        vbytes
      );
    }

    case(0, 72.75);
    case(1, 140.5);
    case(2, 208.25);
    case(3, 276.0);
  }

  #[test]
  fn mixed_outputs() {
    let estimate = calc_tx_size(
      &p2wpkh(3)
        .outputs(Some(OutputType::P2tr), 1)
        .outputs(Some(OutputType::P2wpkh), 1),
    );

    assert_eq!(estimate.vbytes, 288.0);
    assert_eq!(estimate.weight, 1152.0);
  }

  #[test]
  fn taproot_input_to_taproot_output() {
    assert_eq!(
      calc_tx_size(&SizeEstimateRequest::new(InputScriptType::P2tr, 1).outputs(Some(OutputType::P2tr), 1)).vbytes,
      111.0
    );
  }

  #[test]
  fn legacy_inputs_have_no_witness_overhead() {
    let estimate = calc_tx_size(
      &SizeEstimateRequest::new(InputScriptType::P2pkh, 1).outputs(Some(OutputType::P2pkh), 2),
    );

    assert_eq!(estimate.vbytes, 10.0 + 148.0 + 68.0);
    assert_eq!(estimate.bytes, estimate.vbytes);
  }

  #[test]
  fn witness_bytes_are_counted_in_raw_size() {
    let estimate = calc_tx_size(&p2wpkh(1).outputs(Some(OutputType::P2wpkh), 1));

    assert_eq!(estimate.vbytes, 109.5);
    assert_eq!(estimate.bytes, 0.75 * 3.0 + 109.5 + 107.0 * 3.0 / 4.0);
  }

  #[test]
  fn multisig_inputs() {
    assert_eq!(
      calc_tx_size(&SizeEstimateRequest::new(InputScriptType::P2sh, 1).multisig(2, 3)).vbytes,
      10.0 + 297.0
    );

    assert_eq!(
      calc_tx_size(&SizeEstimateRequest::new(InputScriptType::P2wsh, 1).multisig(2, 3)).vbytes,
      10.75 + 36.0 + 254.0 / 4.0 + 4.0
    );

    assert_eq!(
      calc_tx_size(&SizeEstimateRequest::new(InputScriptType::P2shP2wsh, 1).multisig(2, 3)).vbytes,
      10.75 + 36.0 + 254.0 / 4.0 + 4.0 + 35.0
    );
  }

  #[test]
  fn unknown_output_tags_are_ignored() {
    assert_eq!(
      calc_tx_size(&p2wpkh(1).output_tag("p2wpkh_output_count", 2).output_tag("p2pk_output_count", 5)),
      calc_tx_size(&p2wpkh(1).outputs(Some(OutputType::P2wpkh), 2)),
    );

    assert_eq!(
      calc_tx_size(&p2wpkh(1).outputs(None, 2)),
      calc_tx_size(&p2wpkh(1)),
    );
  }

  #[test]
  fn size_is_monotonic_in_input_count() {
    for input_script in [
      InputScriptType::P2pkh,
      InputScriptType::P2shP2wpkh,
      InputScriptType::P2wpkh,
      InputScriptType::P2tr,
    ] {
      let mut previous = 0.0;
      for inputs in 0..300 {
        let vbytes = calc_tx_size(
          &SizeEstimateRequest::new(input_script, inputs).outputs(Some(OutputType::P2tr), 2),
        )
        .vbytes;
        assert!(
          vbytes >= previous,
          "{input_script} with {inputs} inputs: {vbytes} < {previous}"
        );
        previous = vbytes;
      }
    }
  }

  #[test]
  fn var_int_boundaries() {
    assert_eq!(var_int_size(252), 1);
    assert_eq!(var_int_size(253), 3);
    assert_eq!(var_int_size(65534), 3);
    assert_eq!(var_int_size(65535), 5);
  }

  #[test]
  fn estimation_is_deterministic() {
    let request = p2wpkh(7).outputs(Some(OutputType::P2tr), 1);
    assert_eq!(calc_tx_size(&request), calc_tx_size(&request));
  }
}
