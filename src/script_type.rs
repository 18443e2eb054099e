use super::*;

/// Script type of the outputs being spent. Every input of an estimated
/// transaction shares the same type.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputScriptType {
  P2pkh,
  P2sh,
  P2shP2wpkh,
  P2shP2wsh,
  #[default]
  P2wpkh,
  P2wsh,
  P2tr,
}

impl InputScriptType {
  pub fn is_segwit(self) -> bool {
    !matches!(self, Self::P2pkh | Self::P2sh)
  }

  pub fn is_multisig(self) -> bool {
    matches!(self, Self::P2sh | Self::P2shP2wsh | Self::P2wsh)
  }

  fn name(self) -> &'static str {
    match self {
      Self::P2pkh => "p2pkh",
      Self::P2sh => "p2sh",
      Self::P2shP2wpkh => "p2sh-p2wpkh",
      Self::P2shP2wsh => "p2sh-p2wsh",
      Self::P2wpkh => "p2wpkh",
      Self::P2wsh => "p2wsh",
      Self::P2tr => "p2tr",
    }
  }
}

impl Display for InputScriptType {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for InputScriptType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().replace('_', "-").as_str() {
      "p2pkh" => Ok(Self::P2pkh),
      "p2sh" => Ok(Self::P2sh),
      "p2sh-p2wpkh" => Ok(Self::P2shP2wpkh),
      "p2sh-p2wsh" => Ok(Self::P2shP2wsh),
      "p2wpkh" => Ok(Self::P2wpkh),
      "p2wsh" => Ok(Self::P2wsh),
      "p2tr" => Ok(Self::P2tr),
      _ => bail!("unknown input script type `{s}`"),
    }
  }
}

/// Output type tag used to count the outputs of an estimated transaction.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputType {
  P2pkh,
  P2sh,
  P2shP2wpkh,
  P2shP2wsh,
  P2wpkh,
  P2wsh,
  P2tr,
}

impl OutputType {
  /// Classifies the output an address pays to. Returns `None` for address
  /// kinds the estimator has no size for.
  pub fn from_address(address: &Address) -> Option<Self> {
    match address.address_type()? {
      AddressType::P2pkh => Some(Self::P2pkh),
      AddressType::P2sh => Some(Self::P2sh),
      AddressType::P2wpkh => Some(Self::P2wpkh),
      AddressType::P2wsh => Some(Self::P2wsh),
      AddressType::P2tr => Some(Self::P2tr),
      _ => None,
    }
  }

  /// Parses an output type tag, accepting the `<type>_output_count` form.
  /// Unknown tags yield `None`.
  pub fn from_tag(tag: &str) -> Option<Self> {
    let tag = tag.to_lowercase().replace('_', "-");

    match tag.strip_suffix("-output-count").unwrap_or(&tag) {
      "p2pkh" => Some(Self::P2pkh),
      "p2sh" => Some(Self::P2sh),
      "p2sh-p2wpkh" => Some(Self::P2shP2wpkh),
      "p2sh-p2wsh" => Some(Self::P2shP2wsh),
      "p2wpkh" => Some(Self::P2wpkh),
      "p2wsh" => Some(Self::P2wsh),
      "p2tr" => Some(Self::P2tr),
      _ => None,
    }
  }
}

impl Display for OutputType {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(match self {
      Self::P2pkh => "p2pkh",
      Self::P2sh => "p2sh",
      Self::P2shP2wpkh => "p2sh-p2wpkh",
      Self::P2shP2wsh => "p2sh-p2wsh",
      Self::P2wpkh => "p2wpkh",
      Self::P2wsh => "p2wsh",
      Self::P2tr => "p2tr",
    })
  }
}
