use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Estimate {
  #[arg(
    long,
    default_value_t = InputScriptType::P2wpkh,
    help = "Spend outputs of type <INPUT_SCRIPT>."
  )]
  input_script: InputScriptType,
  #[arg(long, help = "Spend <INPUTS> outputs.")]
  inputs: usize,
  #[arg(
    long = "output",
    value_parser = parse_output,
    help = "Create <COUNT> outputs of <TYPE>, given as <TYPE>=<COUNT>. May be repeated."
  )]
  outputs: Vec<(String, usize)>,
  #[arg(long, help = "Spend <M>-of-<N> multisig outputs.")]
  multisig: Option<Multisig>,
  #[arg(long, help = "Calculate fee at <FEE_RATE> sats/vB.")]
  fee_rate: Option<FeeRate>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Multisig {
  m: usize,
  n: usize,
}

impl FromStr for Multisig {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (m, n) = s
      .split_once("-of-")
      .ok_or_else(|| anyhow!("multisig must be given as <M>-of-<N>: `{s}`"))?;

    let multisig = Self {
      m: m.parse()?,
      n: n.parse()?,
    };

    ensure!(
      (1..=multisig.n).contains(&multisig.m),
      "invalid multisig `{s}`: need 1 <= m <= n"
    );

    Ok(multisig)
  }
}

fn parse_output(s: &str) -> Result<(String, usize), Error> {
  let (tag, count) = s
    .split_once('=')
    .ok_or_else(|| anyhow!("output must be given as <TYPE>=<COUNT>: `{s}`"))?;

  Ok((tag.into(), count.parse()?))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
  pub vbytes: f64,
  pub bytes: f64,
  pub weight: f64,
  pub fee: Option<u64>,
}

impl Estimate {
  pub(crate) fn run(self) -> SubcommandResult {
    let mut request = wallet::SizeEstimateRequest::new(self.input_script, self.inputs);

    match self.multisig {
      Some(Multisig { m, n }) => {
        ensure!(
          self.input_script.is_multisig(),
          "--multisig cannot be used with {} inputs",
          self.input_script
        );
        request = request.multisig(m, n);
      }
      None => ensure!(
        !self.input_script.is_multisig(),
        "{} inputs require --multisig",
        self.input_script
      ),
    }

    for (tag, count) in &self.outputs {
      request = request.output_tag(tag, *count);
    }

    let estimate = wallet::calc_tx_size(&request);

    Ok(Box::new(Output {
      vbytes: estimate.vbytes,
      bytes: estimate.bytes,
      weight: estimate.weight,
      fee: self
        .fee_rate
        .map(|fee_rate| fee_rate.fee(estimate.vbytes).to_sat()),
    }))
  }
}
