use super::*;

#[derive(Debug, Parser)]
#[command(version)]
pub(crate) struct Arguments {
  #[command(flatten)]
  pub(crate) options: Options,
  #[command(subcommand)]
  pub(crate) subcommand: Subcommand,
}

impl Arguments {
  pub(crate) fn run(self) -> Result<Box<dyn Output>, SnafuError> {
    let settings = Settings::new(self.options)?;

    self
      .subcommand
      .run(settings)
      .map_err(|err| match err.downcast::<SnafuError>() {
        Ok(err) => err,
        Err(err) => err.into(),
      })
  }
}
