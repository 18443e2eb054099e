//! Turns selections into signed transactions.
//!
//! Transaction construction and signing are delegated to a
//! [`TransactionBuilder`]. Every input is paired with the kind of signer that
//! can spend it, so signing never depends on input position. Failures from
//! the builder are logged and returned as [`Error::Assembly`].

use {
  super::*,
  bitcoin::{consensus::encode::serialize_hex, Transaction, TxOut, XOnlyPublicKey},
};

/// An input to add to a transaction, with the output it spends.
#[derive(Debug, Clone, PartialEq)]
pub struct TxInput {
  pub outpoint: OutPoint,
  pub witness_utxo: TxOut,
  /// Set for taproot key path inputs.
  pub tap_internal_key: Option<XOnlyPublicKey>,
}

pub trait TransactionBuilder {
  fn add_input(&mut self, input: TxInput) -> Result;

  fn add_output(&mut self, output: TxOut) -> Result;

  fn sign_index(&mut self, signer: &Signer, index: usize) -> Result;

  fn finalize(&mut self) -> Result;

  fn extract(&self) -> Result<Transaction>;
}

#[derive(Debug, PartialEq, Serialize)]
pub struct SignedTransaction {
  /// Consensus encoded transaction, as hex.
  pub transaction: String,
  pub txid: Txid,
  #[serde(with = "bitcoin::amount::serde::as_sat")]
  pub fee: Amount,
}

struct Plan {
  inputs: Vec<(TxInput, SignerKind)>,
  outputs: Vec<TxOut>,
  fee: Amount,
}

impl Plan {
  /// Adds `value` paid to `script_pubkey` as change, unless it is dust, in
  /// which case it goes to the fee.
  fn change(&mut self, script_pubkey: ScriptBuf, value: Amount) -> Result<(), Error> {
    if value < script_pubkey.minimal_non_dust() {
      if value > Amount::ZERO {
        log::info!(
          "dropping {} sat change output below dust limit",
          value.to_sat()
        );
      }
      self.fee = self.fee.checked_add(value).ok_or(Error::ValueOverflow)?;
    } else {
      self.outputs.push(TxOut {
        value,
        script_pubkey,
      });
    }

    Ok(())
  }
}

/// Fails unless `value` covers the fee of the smallest possible transfer,
/// one taproot input to one taproot output, with at least `margin` to spare.
pub fn check_inscription_covers_fee(
  value: Amount,
  fee_rate: FeeRate,
  margin: Amount,
) -> Result<(), Error> {
  let fee = fee_rate.fee(
    calc_tx_size(
      &SizeEstimateRequest::new(InputScriptType::P2tr, 1).outputs(Some(OutputType::P2tr), 1),
    )
    .vbytes,
  );

  match value.checked_sub(fee) {
    Some(remaining) if remaining >= margin => Ok(()),
    _ => Uneconomical { value, fee, margin }.fail(),
  }
}

/// Builds and signs an inscription transfer. The inscription, held by
/// `taproot`, is spent first, followed by the funding inputs held by
/// `segwit`.
pub fn assemble_inscription_transfer(
  builder: impl TransactionBuilder,
  inscription: &Utxo,
  transfer: &InscriptionTransfer,
  taproot: &Signer,
  segwit: &Signer,
) -> Result<SignedTransaction, Error> {
  let mut inputs = vec![(
    TxInput {
      outpoint: inscription.outpoint(),
      witness_utxo: TxOut {
        value: inscription.value,
        script_pubkey: taproot.script_pubkey(),
      },
      tap_internal_key: Some(taproot.internal_key()),
    },
    SignerKind::Taproot,
  )];

  inputs.extend(funding_inputs(&transfer.inputs, segwit));

  let mut plan = Plan {
    inputs,
    outputs: vec![tx_out(&transfer.outputs[0], segwit)],
    fee: transfer.fee,
  };

  let change = &transfer.outputs[1];
  plan.change(script_pubkey(change, segwit), change.value)?;

  sign(builder, plan, &[taproot, segwit])
}

/// Builds and signs a plain payment. Every input is held by `segwit`, which
/// also receives the change.
pub fn assemble_payment(
  builder: impl TransactionBuilder,
  selection: &Selection,
  segwit: &Signer,
) -> Result<SignedTransaction, Error> {
  let mut plan = Plan {
    inputs: funding_inputs(&selection.inputs, segwit).collect(),
    outputs: vec![tx_out(&selection.outputs[0], segwit)],
    fee: selection.fee,
  };

  let change = &selection.outputs[1];
  plan.change(script_pubkey(change, segwit), change.value)?;

  sign(builder, plan, &[segwit])
}

#[derive(Debug, Clone)]
pub struct InscriptionSend {
  pub inscription: Utxo,
  pub funding: Vec<Utxo>,
  pub recipient: String,
  /// Fee rate the transfer is built at.
  pub fee_rate: FeeRate,
  /// Fee rate used to decide whether the inscription is worth sending.
  pub guard_fee_rate: FeeRate,
  pub margin: Amount,
  pub chain: Chain,
}

/// Checks that the inscription is worth sending, selects funding and builds
/// the signed transfer. Change goes to `segwit`.
pub fn send_inscription(
  builder: impl TransactionBuilder,
  send: &InscriptionSend,
  taproot: &Signer,
  segwit: &Signer,
) -> Result<SignedTransaction, Error> {
  check_inscription_covers_fee(send.inscription.value, send.guard_fee_rate, send.margin)?;

  let mut funding = send.funding.clone();
  funding.sort_by(|a, b| b.value.cmp(&a.value));

  let transfer = select_inscription_transfer_coins(
    &send.recipient,
    &send.inscription,
    &funding,
    &segwit.address(),
    send.fee_rate,
    send.chain,
  )?;

  assemble_inscription_transfer(builder, &send.inscription, &transfer, taproot, segwit)
}

fn funding_inputs<'a>(
  utxos: &'a [Utxo],
  segwit: &'a Signer,
) -> impl Iterator<Item = (TxInput, SignerKind)> + 'a {
  utxos.iter().map(|utxo| {
    (
      TxInput {
        outpoint: utxo.outpoint(),
        witness_utxo: TxOut {
          value: utxo.value,
          script_pubkey: segwit.script_pubkey(),
        },
        tap_internal_key: None,
      },
      SignerKind::NativeSegwit,
    )
  })
}

fn script_pubkey(output: &SelectionOutput, segwit: &Signer) -> ScriptBuf {
  match &output.address {
    Some(address) => address.script_pubkey(),
    None => segwit.script_pubkey(),
  }
}

fn tx_out(output: &SelectionOutput, segwit: &Signer) -> TxOut {
  TxOut {
    value: output.value,
    script_pubkey: script_pubkey(output, segwit),
  }
}

fn sign(
  mut builder: impl TransactionBuilder,
  plan: Plan,
  signers: &[&Signer],
) -> Result<SignedTransaction, Error> {
  build(&mut builder, plan, signers).map_err(|err| {
    log::error!("failed to assemble transaction: {err:#}");
    Error::Assembly {
      message: format!("{err:#}"),
    }
  })
}

fn build(
  builder: &mut impl TransactionBuilder,
  plan: Plan,
  signers: &[&Signer],
) -> Result<SignedTransaction> {
  let mut kinds = Vec::new();

  for (input, kind) in plan.inputs {
    builder
      .add_input(input)
      .with_context(|| format!("failed to add input {}", kinds.len()))?;
    kinds.push(kind);
  }

  for output in plan.outputs {
    builder.add_output(output)?;
  }

  for (index, kind) in kinds.into_iter().enumerate() {
    let signer = signers
      .iter()
      .find(|signer| signer.kind() == kind)
      .ok_or_else(|| anyhow!("no {kind} signer for input {index}"))?;

    builder
      .sign_index(signer, index)
      .with_context(|| format!("failed to sign input {index}"))?;
  }

  builder.finalize()?;

  let transaction = builder.extract()?;

  Ok(SignedTransaction {
    transaction: serialize_hex(&transaction),
    txid: transaction.compute_txid(),
    fee: plan.fee,
  })
}
