use super::*;

#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct FeeRate(f64);

impl FromStr for FeeRate {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::try_from(f64::from_str(s)?)
  }
}

impl TryFrom<f64> for FeeRate {
  type Error = Error;

  fn try_from(rate: f64) -> Result<Self, Self::Error> {
    if rate.is_sign_negative() | rate.is_nan() | rate.is_infinite() {
      bail!("invalid fee rate: {rate}")
    }
    Ok(Self(rate))
  }
}

impl From<u64> for FeeRate {
  #[allow(clippy::cast_precision_loss)]
  fn from(rate: u64) -> Self {
    Self(rate as f64)
  }
}

impl Display for FeeRate {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{} sat/vB", self.0)
  }
}

impl FeeRate {
  pub fn n(&self) -> f64 {
    self.0
  }

  /// Fee for a transaction of `vbytes` virtual bytes, rounded up to the next
  /// whole satoshi.
  pub fn fee(&self, vbytes: f64) -> Amount {
    // round to whole millisats first, so `1.1 * 100.0` is 110 and not 111
    let millisats = (self.0 * vbytes * 1000.0).round();

    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    Amount::from_sat((millisats / 1000.0).ceil() as u64)
  }
}

/// Recommended fee rates in sat/vB, as served by mempool-style fee APIs.
#[derive(Debug, PartialEq, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimates {
  pub fastest_fee: u64,
  pub half_hour_fee: u64,
}

impl FeeEstimates {
  pub fn fastest(&self) -> FeeRate {
    self.fastest_fee.into()
  }

  pub fn half_hour(&self) -> FeeRate {
    self.half_hour_fee.into()
  }
}
