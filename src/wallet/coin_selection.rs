//! Coin selection for plain value transfers.
//!
//! UTXOs are spent largest first, one at a time, re-estimating the size and
//! fee of the transaction after every addition, until the selected value
//! covers the amount plus the fee. The wallet only holds native segwit
//! outputs, so inputs are always estimated as `p2wpkh`. Every transaction
//! has two outputs, the recipient and change, both estimated as the
//! recipient's output type.
//!
//! Selection minimizes the number of inputs, not the size of the change.

use super::*;

#[derive(Debug, PartialEq, Serialize)]
pub struct Selection {
  /// Every candidate UTXO, largest first.
  pub ordered_utxos: Vec<Utxo>,
  /// The prefix of `ordered_utxos` that is spent.
  pub inputs: Vec<Utxo>,
  /// Recipient output, then change.
  pub outputs: Vec<SelectionOutput>,
  pub vbytes: f64,
  #[serde(with = "bitcoin::amount::serde::as_sat")]
  pub fee: Amount,
}

impl Selection {
  pub fn change(&self) -> Amount {
    self.outputs[1].value
  }
}

pub fn determine_utxos_for_spend(
  utxos: &[Utxo],
  amount: Amount,
  fee_rate: FeeRate,
  recipient: &str,
  chain: Chain,
) -> Result<Selection, Error> {
  let recipient = chain
    .address(recipient)
    .snafu_context(InvalidAddress { input: recipient })?;

  let output_type = OutputType::from_address(&recipient);

  let mut ordered_utxos = utxos.to_vec();
  ordered_utxos.sort_by(|a, b| b.value.cmp(&a.value));

  let mut inputs = Vec::new();
  let mut selected = Amount::ZERO;
  let mut estimate = None;

  for utxo in &ordered_utxos {
    selected = selected
      .checked_add(utxo.value)
      .ok_or(Error::ValueOverflow)?;
    inputs.push(utxo.clone());

    let size = calc_tx_size(
      &SizeEstimateRequest::new(InputScriptType::P2wpkh, inputs.len()).outputs(output_type, 2),
    );

    let fee = fee_rate.fee(size.vbytes);

    let needed = amount.checked_add(fee).ok_or(Error::ValueOverflow)?;

    tprintln!(
      "selected {} sat input, {selected} sat of {needed} sat",
      utxo.value.to_sat()
    );

    estimate = Some((size, fee, needed));

    if selected >= needed {
      break;
    }
  }

  let Some((size, fee, needed)) = estimate else {
    return NoUtxos.fail();
  };

  if selected < needed {
    return InsufficientFunds {
      available: selected,
      needed,
    }
    .fail();
  }

  log::info!(
    "selected {} of {} utxos worth {} sat to send {} sat with {} sat fee",
    inputs.len(),
    ordered_utxos.len(),
    selected.to_sat(),
    amount.to_sat(),
    fee.to_sat(),
  );

  Ok(Selection {
    outputs: vec![
      SelectionOutput {
        value: amount,
        address: Some(recipient),
      },
      SelectionOutput {
        value: selected - needed,
        address: None,
      },
    ],
    ordered_utxos,
    inputs,
    vbytes: size.vbytes,
    fee,
  })
}

#[derive(Debug, PartialEq, Serialize)]
pub struct MaxSpend {
  #[serde(with = "bitcoin::amount::serde::as_sat")]
  pub fee: Amount,
  #[serde(with = "bitcoin::amount::serde::as_sat")]
  pub amount: Amount,
}

/// The largest amount that can be sent by spending every UTXO. Recipients
/// that are missing or fail to parse are estimated as `p2wpkh`.
pub fn calculate_max_spend(
  utxos: &[Utxo],
  fee_rate: FeeRate,
  recipient: Option<&str>,
  chain: Chain,
) -> Result<MaxSpend, Error> {
  if utxos.is_empty() {
    return Ok(MaxSpend {
      fee: Amount::ZERO,
      amount: Amount::ZERO,
    });
  }

  let output_type = recipient
    .and_then(|recipient| chain.address(recipient).ok())
    .map(|recipient| OutputType::from_address(&recipient))
    .unwrap_or(Some(OutputType::P2wpkh));

  let size = calc_tx_size(
    &SizeEstimateRequest::new(InputScriptType::P2wpkh, utxos.len()).outputs(output_type, 2),
  );

  let fee = fee_rate.fee(size.vbytes);

  Ok(MaxSpend {
    fee,
    amount: sum(utxos)?.checked_sub(fee).unwrap_or(Amount::ZERO),
  })
}
