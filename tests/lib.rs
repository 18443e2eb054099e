#![allow(clippy::type_complexity)]

use {
  self::{command_builder::CommandBuilder, expected::Expected},
  executable_path::executable_path,
  pretty_assertions::assert_eq as pretty_assert_eq,
  regex::Regex,
  serde::de::DeserializeOwned,
  serde_json::{json, Value},
  std::{
    collections::BTreeMap,
    ffi::{OsStr, OsString},
    fs,
    path::Path,
    process::{Command, Stdio},
    str,
    sync::Arc,
  },
  tempfile::TempDir,
};


mod estimate;
mod send_inscription;

const RECIPIENT: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";

const TAPROOT_RECIPIENT: &str = "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqzk5jj0";

const SEGWIT_KEY: &str = "0202020202020202020202020202020202020202020202020202020202020202";

const TAPROOT_KEY: &str = "0101010101010101010101010101010101010101010101010101010101010101";

fn txid(n: u64) -> String {
  format!("{n:x}").repeat(64)
}

fn utxos(values: &[(u64, u64)]) -> String {
  Value::Array(
    values
      .iter()
      .map(|(n, value)| {
        json!({
          "txid": txid(*n),
          "vout": n,
          "value": value,
          "status": { "confirmed": true },
        })
      })
      .collect(),
  )
  .to_string()
}

fn pool() -> String {
  utxos(&[(1, 5_000), (2, 3_000), (3, 2_000)])
}

fn values(utxos: &Value) -> Vec<u64> {
  utxos
    .as_array()
    .unwrap()
    .iter()
    .map(|utxo| utxo["value"].as_u64().unwrap())
    .collect()
}
