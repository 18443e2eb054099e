use super::*;

#[derive(Debug, Parser)]
pub(crate) struct SendInscription {
  #[arg(long, help = "Send inscription held by taproot output <INSCRIPTION>.")]
  inscription: OutPoint,
  #[arg(long, help = "Inscription output holds <INSCRIPTION_VALUE> sats.")]
  inscription_value: u64,
  #[arg(long, help = "Pay fee from native segwit UTXOs in JSON file <UTXOS>.")]
  utxos: PathBuf,
  #[arg(long, help = "Send inscription to <RECIPIENT>.")]
  recipient: String,
  #[command(flatten)]
  fee: FeeArgs,
}

impl SendInscription {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    let taproot = settings.taproot_signer()?;
    let segwit = settings.segwit_signer()?;

    let send = wallet::InscriptionSend {
      inscription: Utxo::new(self.inscription, Amount::from_sat(self.inscription_value)),
      funding: Utxo::load(&self.utxos)?,
      recipient: self.recipient,
      fee_rate: self.fee.fee_rate()?,
      guard_fee_rate: self.fee.fastest_fee_rate()?,
      margin: settings.inscription_fee_margin(),
      chain: settings.chain(),
    };

    Ok(Box::new(wallet::send_inscription(
      wallet::PsbtBuilder::new()?,
      &send,
      &taproot,
      &segwit,
    )?))
  }
}
