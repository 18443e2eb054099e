use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Select {
  #[arg(long, help = "Load UTXOs from JSON file <UTXOS>.")]
  utxos: PathBuf,
  #[arg(long, help = "Send <AMOUNT> sats.")]
  amount: u64,
  #[arg(long, help = "Send to <RECIPIENT>.")]
  recipient: String,
  #[command(flatten)]
  fee: FeeArgs,
}

impl Select {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    let utxos = Utxo::load(&self.utxos)?;

    Ok(Box::new(wallet::determine_utxos_for_spend(
      &utxos,
      Amount::from_sat(self.amount),
      self.fee.fee_rate()?,
      &self.recipient,
      settings.chain(),
    )?))
  }
}
