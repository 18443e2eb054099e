use super::*;

/// An unspent output as returned by an esplora-style indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
  pub txid: Txid,
  pub vout: u32,
  #[serde(with = "bitcoin::amount::serde::as_sat")]
  pub value: Amount,
}

impl Utxo {
  pub fn new(outpoint: OutPoint, value: Amount) -> Self {
    Self {
      txid: outpoint.txid,
      vout: outpoint.vout,
      value,
    }
  }

  pub fn outpoint(&self) -> OutPoint {
    OutPoint {
      txid: self.txid,
      vout: self.vout,
    }
  }

  pub(crate) fn load(path: &Path) -> Result<Vec<Self>, SnafuError> {
    let json = fs::read_to_string(path).snafu_context(error::Io { path })?;
    serde_json::from_str(&json).snafu_context(error::Json { path })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserialize_ignores_extra_fields() {
    let utxos = serde_json::from_str::<Vec<Utxo>>(&format!(
      r#"[{{"txid":"{}","vout":1,"value":5000,"status":{{"confirmed":true}}}}]"#,
      txid(1),
    ))
    .unwrap();

    assert_eq!(utxos, [Utxo::new(outpoint(1), Amount::from_sat(5000))]);
  }

  #[test]
  fn load_reports_missing_file() {
    let tempdir = tempfile::TempDir::new().unwrap();

    assert_matches!(
      Utxo::load(&tempdir.path().join("utxos.json")),
      Err(SnafuError::Io { .. })
    );
  }

  #[test]
  fn load_reports_bad_json() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let path = tempdir.path().join("utxos.json");
    fs::write(&path, "[{").unwrap();

    assert_matches!(Utxo::load(&path), Err(SnafuError::Json { .. }));
  }
}
