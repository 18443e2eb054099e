use {
  super::*,
  bitcoin::{key::Keypair, secp256k1::SecretKey, CompressedPublicKey, XOnlyPublicKey},
  secp256k1::SECP256K1,
};

/// The kind of input a signer can sign for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignerKind {
  /// Taproot key path spends.
  Taproot,
  /// Pay to witness public key hash spends.
  NativeSegwit,
}

impl Display for SignerKind {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(match self {
      Self::Taproot => "taproot",
      Self::NativeSegwit => "native segwit",
    })
  }
}

#[derive(Debug, Clone)]
pub struct Signer {
  keypair: Keypair,
  kind: SignerKind,
  network: Network,
}

impl Signer {
  pub fn taproot(secret_key: SecretKey, network: Network) -> Self {
    Self::new(SignerKind::Taproot, secret_key, network)
  }

  pub fn native_segwit(secret_key: SecretKey, network: Network) -> Self {
    Self::new(SignerKind::NativeSegwit, secret_key, network)
  }

  fn new(kind: SignerKind, secret_key: SecretKey, network: Network) -> Self {
    Self {
      keypair: Keypair::from_secret_key(SECP256K1, &secret_key),
      kind,
      network,
    }
  }

  pub fn kind(&self) -> SignerKind {
    self.kind
  }

  pub fn address(&self) -> Address {
    match self.kind {
      SignerKind::Taproot => Address::p2tr(SECP256K1, self.internal_key(), None, self.network),
      SignerKind::NativeSegwit => Address::p2wpkh(&self.public_key(), self.network),
    }
  }

  pub fn script_pubkey(&self) -> ScriptBuf {
    self.address().script_pubkey()
  }

  /// Untweaked key committed to by the taproot output.
  pub fn internal_key(&self) -> XOnlyPublicKey {
    XOnlyPublicKey::from_keypair(&self.keypair).0
  }

  pub fn public_key(&self) -> CompressedPublicKey {
    CompressedPublicKey(self.keypair.public_key())
  }

  pub(crate) fn keypair(&self) -> &Keypair {
    &self.keypair
  }

  pub(crate) fn secret_key(&self) -> SecretKey {
    self.keypair.secret_key()
  }
}
