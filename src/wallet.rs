use super::*;

pub use self::{
  assembler::{
    assemble_inscription_transfer, assemble_payment, check_inscription_covers_fee,
    send_inscription, InscriptionSend, SignedTransaction, TransactionBuilder, TxInput,
  },
  coin_selection::{calculate_max_spend, determine_utxos_for_spend, MaxSpend, Selection},
  inscription_selection::{select_inscription_transfer_coins, InscriptionTransfer},
  psbt::PsbtBuilder,
  signer::{Signer, SignerKind},
  size_estimator::{calc_tx_size, SizeEstimate, SizeEstimateRequest},
};

pub mod assembler;
pub mod coin_selection;
pub mod inscription_selection;
pub mod psbt;
pub mod signer;
pub mod size_estimator;

/// Satoshis left after the minimal inscription transfer fee, below which the
/// transfer is refused.
pub const DEFAULT_INSCRIPTION_FEE_MARGIN: Amount = Amount::from_sat(10);

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum Error {
  #[snafu(display("failed to assemble transaction: {message}"))]
  Assembly { message: String },
  #[snafu(display(
    "insufficient funds: {} sat available, {} sat needed",
    available.to_sat(),
    needed.to_sat()
  ))]
  InsufficientFunds { available: Amount, needed: Amount },
  #[snafu(display("invalid address `{input}`"))]
  InvalidAddress {
    input: String,
    source: bitcoin::address::ParseError,
  },
  #[snafu(display("no UTXOs available to spend"))]
  NoUtxos,
  #[snafu(display(
    "inscription output value of {} sat cannot cover fee of {} sat with a margin of {} sat",
    value.to_sat(),
    fee.to_sat(),
    margin.to_sat()
  ))]
  Uneconomical {
    value: Amount,
    fee: Amount,
    margin: Amount,
  },
  #[snafu(display("arithmetic overflow calculating value"))]
  ValueOverflow,
}

/// An output produced by coin selection. A missing address pays back to the
/// script of the inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionOutput {
  #[serde(with = "bitcoin::amount::serde::as_sat")]
  pub value: Amount,
  pub address: Option<Address>,
}

fn sum(utxos: &[Utxo]) -> Result<Amount, Error> {
  utxos
    .iter()
    .try_fold(Amount::ZERO, |sum, utxo| sum.checked_add(utxo.value))
    .ok_or(Error::ValueOverflow)
}
