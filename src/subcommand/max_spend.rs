use super::*;

#[derive(Debug, Parser)]
pub(crate) struct MaxSpend {
  #[arg(long, help = "Load UTXOs from JSON file <UTXOS>.")]
  utxos: PathBuf,
  #[arg(long, help = "Estimate outputs as the type of <RECIPIENT>.")]
  recipient: Option<String>,
  #[command(flatten)]
  fee: FeeArgs,
}

impl MaxSpend {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    let utxos = Utxo::load(&self.utxos)?;

    Ok(Box::new(wallet::calculate_max_spend(
      &utxos,
      self.fee.fastest_fee_rate()?,
      self.recipient.as_deref(),
      settings.chain(),
    )?))
  }
}
