use {super::*, bitcoin::secp256k1::SecretKey};

#[derive(Default, Debug, Clone)]
pub struct Settings {
  chain: Chain,
  inscription_fee_margin: Amount,
  segwit_key: Option<String>,
  taproot_key: Option<String>,
}

impl Settings {
  pub(crate) fn new(options: Options) -> Result<Self> {
    let config = match &options.config {
      Some(path) => Config::load(path)?,
      None => match &options.config_dir {
        Some(dir) if dir.join("ordsend.yaml").exists() => Config::load(&dir.join("ordsend.yaml"))?,
        Some(_) | None => Config::default(),
      },
    };

    let chain = Self::setting_typed(
      options
        .signet
        .then_some(Chain::Signet)
        .or(options.regtest.then_some(Chain::Regtest))
        .or(options.testnet.then_some(Chain::Testnet))
        .or(options.chain_argument),
      Some("CHAIN"),
      config.chain,
      Chain::Mainnet,
    )?;

    let inscription_fee_margin = Amount::from_sat(Self::setting_typed(
      options.inscription_fee_margin,
      Some("INSCRIPTION_FEE_MARGIN"),
      config.inscription_fee_margin,
      wallet::DEFAULT_INSCRIPTION_FEE_MARGIN.to_sat(),
    )?);

    let segwit_key = Self::setting(
      options.segwit_key.as_deref(),
      Some("SEGWIT_KEY"),
      config.segwit_key.as_deref(),
      None,
    )?;

    let taproot_key = Self::setting(
      options.taproot_key.as_deref(),
      Some("TAPROOT_KEY"),
      config.taproot_key.as_deref(),
      None,
    )?;

    Ok(Self {
      chain,
      inscription_fee_margin,
      segwit_key,
      taproot_key,
    })
  }

  pub fn chain(&self) -> Chain {
    self.chain
  }

  pub fn inscription_fee_margin(&self) -> Amount {
    self.inscription_fee_margin
  }

  /// Signer for native segwit inputs, which also receives change.
  pub(crate) fn segwit_signer(&self) -> Result<wallet::Signer> {
    Ok(wallet::Signer::native_segwit(
      Self::secret_key("segwit", self.segwit_key.as_deref())?,
      self.chain.network(),
    ))
  }

  /// Signer for taproot inputs holding inscriptions.
  pub(crate) fn taproot_signer(&self) -> Result<wallet::Signer> {
    Ok(wallet::Signer::taproot(
      Self::secret_key("taproot", self.taproot_key.as_deref())?,
      self.chain.network(),
    ))
  }

  pub(crate) fn has_segwit_key(&self) -> bool {
    self.segwit_key.is_some()
  }

  pub(crate) fn has_taproot_key(&self) -> bool {
    self.taproot_key.is_some()
  }

  fn secret_key(name: &str, key: Option<&str>) -> Result<SecretKey> {
    let Some(key) = key else {
      bail!("no {name} key specified");
    };

    let bytes = hex::decode(key).with_context(|| format!("failed to decode {name} key"))?;

    SecretKey::from_slice(&bytes).with_context(|| format!("invalid {name} key"))
  }

  fn setting_typed<T>(
    arg_value: Option<T>,
    env_key: Option<&str>,
    config_value: Option<T>,
    default_value: T,
  ) -> Result<T>
  where
    T: FromStr,
    T::Err: Into<Error>,
  {
    if let Some(arg_value) = arg_value {
      return Ok(arg_value);
    }

    if let Some(env_value) = env_key.map(Self::env).transpose()?.flatten() {
      return env_value
        .parse::<T>()
        .map_err(Into::<Error>::into)
        .with_context(|| format!("failed to parse ORDSEND_{}", env_key.unwrap_or_default()));
    }

    if let Some(config_value) = config_value {
      return Ok(config_value);
    }

    Ok(default_value)
  }

  fn setting(
    arg_value: Option<&str>,
    env_key: Option<&str>,
    config_value: Option<&str>,
    default_value: Option<&str>,
  ) -> Result<Option<String>> {
    if let Some(arg_value) = arg_value {
      return Ok(Some(arg_value.into()));
    }

    if let Some(env_value) = env_key.map(Self::env).transpose()?.flatten() {
      return Ok(Some(env_value));
    }

    Ok(config_value.or(default_value).map(str::to_string))
  }

  fn env(key: &str) -> Result<Option<String>, SnafuError> {
    let variable = format!("ORDSEND_{key}");

    match env::var(&variable) {
      Ok(value) => Ok(Some(value)),
      Err(env::VarError::NotUnicode(value)) => error::EnvVarUnicode { value, variable }.fail(),
      Err(env::VarError::NotPresent) => Ok(None),
    }
  }
}
