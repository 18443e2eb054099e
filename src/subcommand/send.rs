use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Send {
  #[arg(long, help = "Spend native segwit UTXOs from JSON file <UTXOS>.")]
  utxos: PathBuf,
  #[arg(long, help = "Send <AMOUNT> sats.")]
  amount: u64,
  #[arg(long, help = "Send to <RECIPIENT>.")]
  recipient: String,
  #[command(flatten)]
  fee: FeeArgs,
}

impl Send {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    let segwit = settings.segwit_signer()?;

    let utxos = Utxo::load(&self.utxos)?;

    let selection = wallet::determine_utxos_for_spend(
      &utxos,
      Amount::from_sat(self.amount),
      self.fee.fee_rate()?,
      &self.recipient,
      settings.chain(),
    )?;

    Ok(Box::new(wallet::assemble_payment(
      wallet::PsbtBuilder::new()?,
      &selection,
      &segwit,
    )?))
  }
}
