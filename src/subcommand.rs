use super::*;

pub mod estimate;
mod max_spend;
mod select;
mod select_inscription;
mod send;
mod send_inscription;
pub mod settings;

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
  #[command(about = "Estimate transaction size and fee")]
  Estimate(estimate::Estimate),
  #[command(about = "Calculate the largest amount that can be sent")]
  MaxSpend(max_spend::MaxSpend),
  #[command(about = "Select UTXOs to send an amount")]
  Select(select::Select),
  #[command(about = "Select UTXOs to fund an inscription transfer")]
  SelectInscription(select_inscription::SelectInscription),
  #[command(about = "Build and sign a transaction sending an amount")]
  Send(send::Send),
  #[command(about = "Build and sign a transaction sending an inscription")]
  SendInscription(send_inscription::SendInscription),
  #[command(about = "Print settings")]
  Settings,
}

impl Subcommand {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    match self {
      Self::Estimate(estimate) => estimate.run(),
      Self::MaxSpend(max_spend) => max_spend.run(settings),
      Self::Select(select) => select.run(settings),
      Self::SelectInscription(select_inscription) => select_inscription.run(settings),
      Self::Send(send) => send.run(settings),
      Self::SendInscription(send_inscription) => send_inscription.run(settings),
      Self::Settings => settings::run(settings),
    }
  }
}

#[derive(Debug, Clone, clap::Args)]
#[command(group(
  ArgGroup::new("fee")
    .required(true)
    .args(&["fee_rate", "fee_estimates"]),
))]
pub(crate) struct FeeArgs {
  #[arg(long, help = "Use fee rate of <FEE_RATE> sats/vB.")]
  fee_rate: Option<FeeRate>,
  #[arg(
    long,
    help = "Load mempool fee estimates from JSON file <FEE_ESTIMATES>. Transactions are built at the half hour fee, max spend and the inscription fee check use the fastest fee."
  )]
  fee_estimates: Option<PathBuf>,
}

impl FeeArgs {
  /// Rate transactions are built at.
  pub(crate) fn fee_rate(&self) -> Result<FeeRate> {
    match self.fee_rate {
      Some(fee_rate) => Ok(fee_rate),
      None => Ok(self.estimates()?.half_hour()),
    }
  }

  /// Rate for worst case fees: whether an inscription is worth sending, and
  /// how much can be spent at most.
  pub(crate) fn fastest_fee_rate(&self) -> Result<FeeRate> {
    match self.fee_rate {
      Some(fee_rate) => Ok(fee_rate),
      None => Ok(self.estimates()?.fastest()),
    }
  }

  fn estimates(&self) -> Result<FeeEstimates> {
    let Some(path) = &self.fee_estimates else {
      bail!("no fee rate or fee estimates specified");
    };

    let json = fs::read_to_string(path).snafu_context(error::Io { path })?;

    let estimates = serde_json::from_str::<FeeEstimates>(&json).snafu_context(error::Json { path })?;

    log::info!(
      "loaded fee estimates: fastest {} sat/vB, half hour {} sat/vB",
      estimates.fastest_fee,
      estimates.half_hour_fee,
    );

    Ok(estimates)
  }
}

pub(crate) type SubcommandResult = Result<Box<dyn Output>>;

pub(crate) trait Output: Send {
  fn print_json(&self, minify: bool);
}

impl<T> Output for T
where
  T: Serialize + Send,
{
  fn print_json(&self, minify: bool) {
    if minify {
      serde_json::to_writer(io::stdout(), self).ok();
    } else {
      serde_json::to_writer_pretty(io::stdout(), self).ok();
    }
    println!();
  }
}
