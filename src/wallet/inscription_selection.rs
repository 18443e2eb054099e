//! Coin selection for inscription transfers.
//!
//! The inscription output is always spent as the first input and sent whole
//! to the recipient. Its value never pays any part of the fee, since
//! shrinking the output could move or burn the inscribed sat. The fee is
//! paid from separate native segwit funding UTXOs, selected in the order
//! given until they cover it, and whatever they hold above the fee is
//! returned as change.
//!
//! Every estimate counts the inscription input plus the funding inputs
//! selected so far, all sized as `p2wpkh`, and two outputs: a `p2tr` output
//! for the inscription and a `p2wpkh` change output.

use super::*;

#[derive(Debug, PartialEq, Serialize)]
pub struct InscriptionTransfer {
  /// Funding inputs, which follow the inscription input.
  pub inputs: Vec<Utxo>,
  /// Inscription output to the recipient, then change.
  pub outputs: Vec<SelectionOutput>,
  pub vbytes: f64,
  #[serde(with = "bitcoin::amount::serde::as_sat")]
  pub fee: Amount,
}

impl InscriptionTransfer {
  pub fn change(&self) -> Amount {
    self.outputs[1].value
  }
}

/// Selects funding UTXOs to pay for sending `inscription` to `recipient`.
/// Callers are expected to pass `funding` sorted largest first.
pub fn select_inscription_transfer_coins(
  recipient: &str,
  inscription: &Utxo,
  funding: &[Utxo],
  change: &Address,
  fee_rate: FeeRate,
  chain: Chain,
) -> Result<InscriptionTransfer, Error> {
  let recipient = chain
    .address(recipient)
    .snafu_context(InvalidAddress { input: recipient })?;

  let mut inputs = Vec::new();
  let mut selected = Amount::ZERO;
  let mut estimate = None;

  for utxo in funding {
    if utxo.outpoint() == inscription.outpoint() {
      log::warn!(
        "skipping inscription output {} in funding utxos",
        utxo.outpoint()
      );
      continue;
    }

    selected = selected
      .checked_add(utxo.value)
      .ok_or(Error::ValueOverflow)?;
    inputs.push(utxo.clone());

    let size = estimate_size(inputs.len());
    let fee = fee_rate.fee(size.vbytes);

    tprintln!(
      "selected {} sat funding input, {selected} sat of {fee} sat fee",
      utxo.value.to_sat()
    );

    estimate = Some((size, fee));

    if selected >= fee {
      break;
    }
  }

  let (size, fee) = match estimate {
    Some((size, fee)) if selected >= fee => (size, fee),
    Some((_, fee)) => {
      return InsufficientFunds {
        available: selected,
        needed: fee,
      }
      .fail()
    }
    None => return NoUtxos.fail(),
  };

  log::info!(
    "selected {} funding utxos worth {} sat to pay {} sat fee for inscription output {}",
    inputs.len(),
    selected.to_sat(),
    fee.to_sat(),
    inscription.outpoint(),
  );

  Ok(InscriptionTransfer {
    inputs,
    outputs: vec![
      SelectionOutput {
        value: inscription.value,
        address: Some(recipient),
      },
      SelectionOutput {
        value: selected - fee,
        address: Some(change.clone()),
      },
    ],
    vbytes: size.vbytes,
    fee,
  })
}

fn estimate_size(funding_inputs: usize) -> SizeEstimate {
  calc_tx_size(
    &SizeEstimateRequest::new(InputScriptType::P2wpkh, 1 + funding_inputs)
      .outputs(Some(OutputType::P2tr), 1)
      .outputs(Some(OutputType::P2wpkh), 1),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  fn inscription() -> Utxo {
    utxo(0xa, 1_000)
  }

  fn select(funding: &[Utxo], fee_rate: u64) -> Result<InscriptionTransfer, Error> {
    select_inscription_transfer_coins(
      &taproot_recipient().to_string(),
      &inscription(),
      funding,
      &change(),
      FeeRate::from(fee_rate),
      Chain::Mainnet,
    )
  }

  #[test]
  fn one_funding_input_covers_fee() {
    let transfer = select(&[utxo(1, 500), utxo(2, 150)], 2).unwrap();

    assert_eq!(transfer.inputs, [utxo(1, 500)]);
    assert_eq!(transfer.vbytes, 220.25);
    assert_eq!(transfer.fee, Amount::from_sat(441));
    pretty_assert_eq!(
      transfer.outputs,
      [
        SelectionOutput {
          value: Amount::from_sat(1_000),
          address: Some(taproot_recipient()),
        },
        SelectionOutput {
          value: Amount::from_sat(59),
          address: Some(change()),
        },
      ]
    );
  }

  #[test]
  fn funding_inputs_accumulate_until_fee_is_covered() {
    let transfer = select(&[utxo(1, 200), utxo(2, 150)], 1).unwrap();

    assert_eq!(transfer.inputs, [utxo(1, 200), utxo(2, 150)]);
    assert_eq!(transfer.vbytes, 288.0);
    assert_eq!(transfer.fee, Amount::from_sat(288));
    assert_eq!(transfer.change(), Amount::from_sat(62));
    assert_eq!(transfer.outputs[0].value, inscription().value);
  }

  #[test]
  fn exhausted_funding_is_insufficient() {
    assert_matches!(
      select(&[utxo(1, 200), utxo(2, 150)], 5),
      Err(Error::InsufficientFunds { available, needed })
        if available == Amount::from_sat(350) && needed == Amount::from_sat(1_440),
    );
  }

  #[test]
  fn empty_funding() {
    assert_matches!(select(&[], 1), Err(Error::NoUtxos));
    assert_matches!(select(&[], 0), Err(Error::NoUtxos));
  }

  #[test]
  fn inscription_value_never_pays_fee() {
    assert_matches!(
      select(&[utxo(1, 100)], 1),
      Err(Error::InsufficientFunds { available, .. }) if available == Amount::from_sat(100),
    );
  }

  #[test]
  fn inscription_output_is_never_used_for_funding() {
    let transfer = select(&[inscription(), utxo(1, 500)], 1).unwrap();

    assert_eq!(transfer.inputs, [utxo(1, 500)]);
    assert_eq!(transfer.fee, Amount::from_sat(221));

    assert_matches!(select(&[inscription()], 1), Err(Error::NoUtxos));
  }

  #[test]
  fn inscription_value_is_preserved() {
    for fee_rate in [0, 1, 2, 3, 10] {
      let Ok(transfer) = select(&[utxo(1, 5_000), utxo(2, 3_000)], fee_rate) else {
        continue;
      };

      assert_eq!(transfer.outputs[0].value, Amount::from_sat(1_000));
      assert_eq!(
        transfer.inputs.iter().map(|utxo| utxo.value).sum::<Amount>(),
        transfer.fee + transfer.change()
      );
    }
  }

  #[test]
  fn invalid_recipient_is_rejected() {
    assert_matches!(
      select_inscription_transfer_coins(
        "tb1q6en7qjxgw4ev8xwx94pzdry6a6ky7wlfeqzunz",
        &inscription(),
        &[utxo(1, 500)],
        &change(),
        FeeRate::from(1),
        Chain::Mainnet,
      ),
      Err(Error::InvalidAddress { .. }),
    );
  }
}
