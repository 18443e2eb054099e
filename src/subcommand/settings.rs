use super::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
  pub chain: Chain,
  pub inscription_fee_margin: u64,
  pub segwit_address: Option<Address<NetworkUnchecked>>,
  pub taproot_address: Option<Address<NetworkUnchecked>>,
}

pub(crate) fn run(settings: Settings) -> SubcommandResult {
  let segwit_address = if settings.has_segwit_key() {
    Some(settings.segwit_signer()?.address().into_unchecked())
  } else {
    None
  };

  let taproot_address = if settings.has_taproot_key() {
    Some(settings.taproot_signer()?.address().into_unchecked())
  } else {
    None
  };

  Ok(Box::new(Output {
    chain: settings.chain(),
    inscription_fee_margin: settings.inscription_fee_margin().to_sat(),
    segwit_address,
    taproot_address,
  }))
}
