use super::*;

#[derive(Debug, Parser)]
pub(crate) struct SelectInscription {
  #[arg(long, help = "Send inscription held by output <INSCRIPTION>.")]
  inscription: OutPoint,
  #[arg(long, help = "Inscription output holds <INSCRIPTION_VALUE> sats.")]
  inscription_value: u64,
  #[arg(long, help = "Load funding UTXOs from JSON file <UTXOS>.")]
  utxos: PathBuf,
  #[arg(long, help = "Send inscription to <RECIPIENT>.")]
  recipient: String,
  #[arg(long, help = "Send change to <CHANGE>.")]
  change: String,
  #[command(flatten)]
  fee: FeeArgs,
}

impl SelectInscription {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    let mut funding = Utxo::load(&self.utxos)?;
    funding.sort_by(|a, b| b.value.cmp(&a.value));

    let change = settings
      .chain()
      .address(&self.change)
      .snafu_context(wallet::InvalidAddress { input: &self.change })?;

    Ok(Box::new(wallet::select_inscription_transfer_coins(
      &self.recipient,
      &Utxo::new(self.inscription, Amount::from_sat(self.inscription_value)),
      &funding,
      &change,
      self.fee.fee_rate()?,
      settings.chain(),
    )?))
  }
}
