#![allow(clippy::result_large_err, clippy::too_many_arguments)]
#![deny(
  clippy::cast_lossless,
  clippy::cast_possible_truncation,
  clippy::cast_possible_wrap,
  clippy::cast_sign_loss
)]

use {
  self::{
    arguments::Arguments,
    config::Config,
    error::{ResultExt, SnafuError},
    subcommand::{Output, Subcommand},
  },
  anyhow::{anyhow, bail, ensure, Context, Error},
  bitcoin::{
    address::{Address, AddressType, NetworkUnchecked},
    Amount, Network, OutPoint, ScriptBuf, Txid,
  },
  clap::{ArgGroup, Parser},
  serde::{Deserialize, Serialize},
  snafu::{Backtrace, ErrorCompat, Snafu},
  std::{
    backtrace::BacktraceStatus,
    collections::BTreeMap,
    env,
    ffi::OsString,
    fmt::{self, Display, Formatter},
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    process,
    str::FromStr,
  },
};

pub use self::{
  chain::Chain,
  fee_rate::{FeeEstimates, FeeRate},
  options::Options,
  script_type::{InputScriptType, OutputType},
  settings::Settings,
  utxo::Utxo,
};


#[cfg(test)]
use self::test::*;

pub mod arguments;
pub mod chain;
mod config;
mod error;
mod fee_rate;
mod macros;
pub mod options;
pub mod script_type;
pub mod settings;
pub mod subcommand;
mod utxo;
pub mod wallet;

type Result<T = (), E = Error> = std::result::Result<T, E>;

fn default<T: Default>() -> T {
  Default::default()
}

pub fn main() {
  env_logger::init();

  let args = Arguments::parse();

  let minify = args.options.minify;

  match args.run() {
    Err(err) => {
      eprintln!("error: {err}");

      if let SnafuError::Anyhow { err } = err {
        for (i, err) in err.chain().skip(1).enumerate() {
          if i == 0 {
            eprintln!();
            eprintln!("because:");
          }

          eprintln!("- {err}");
        }

        if env::var_os("RUST_BACKTRACE")
          .map(|val| val == "1")
          .unwrap_or_default()
        {
          eprintln!("{}", err.backtrace());
        }
      } else {
        for (i, err) in err.iter_chain().skip(1).enumerate() {
          if i == 0 {
            eprintln!();
            eprintln!("because:");
          }

          eprintln!("- {err}");
        }

        if let Some(backtrace) = err.backtrace() {
          if backtrace.status() == BacktraceStatus::Captured {
            eprintln!("backtrace:");
            eprintln!("{backtrace}");
          }
        }
      }

      process::exit(1);
    }
    Ok(output) => output.print_json(minify),
  }
}
