use super::*;

#[derive(Deserialize, Default, PartialEq, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
  pub(crate) chain: Option<Chain>,
  pub(crate) inscription_fee_margin: Option<u64>,
  pub(crate) segwit_key: Option<String>,
  pub(crate) taproot_key: Option<String>,
}

impl Config {
  pub(crate) fn load(path: &Path) -> Result<Self> {
    serde_yaml::from_reader(
      File::open(path)
        .with_context(|| format!("failed to open config file `{}`", path.display()))?,
    )
    .with_context(|| format!("failed to deserialize config file `{}`", path.display()))
  }
}
