use super::*;

#[derive(Clone, Default, Debug, Parser)]
#[command(group(
  ArgGroup::new("chains")
    .required(false)
    .args(&["chain_argument", "signet", "regtest", "testnet"]),
))]
pub struct Options {
  #[arg(long = "chain", value_enum, help = "Use <CHAIN>. [default: mainnet]")]
  pub(crate) chain_argument: Option<Chain>,
  #[arg(long, help = "Load configuration from <CONFIG>.")]
  pub(crate) config: Option<PathBuf>,
  #[arg(long, help = "Load configuration from <CONFIG_DIR>.")]
  pub(crate) config_dir: Option<PathBuf>,
  #[arg(
    long,
    help = "Refuse to send inscriptions worth less than the minimal transfer fee plus <INSCRIPTION_FEE_MARGIN> sats. [default: 10]"
  )]
  pub(crate) inscription_fee_margin: Option<u64>,
  #[arg(long, help = "Print JSON output on a single line.")]
  pub(crate) minify: bool,
  #[arg(long, short, help = "Use regtest. Equivalent to `--chain regtest`.")]
  pub(crate) regtest: bool,
  #[arg(
    long,
    help = "Sign native segwit inputs with hex encoded secret key <SEGWIT_KEY>."
  )]
  pub(crate) segwit_key: Option<String>,
  #[arg(long, short, help = "Use signet. Equivalent to `--chain signet`.")]
  pub(crate) signet: bool,
  #[arg(
    long,
    help = "Sign taproot inputs with hex encoded secret key <TAPROOT_KEY>."
  )]
  pub(crate) taproot_key: Option<String>,
  #[arg(long, short, help = "Use testnet. Equivalent to `--chain testnet`.")]
  pub(crate) testnet: bool,
}
