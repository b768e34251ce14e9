use crate::args;
use crate::error::*;

/// Print the value of one setting, e.g. `SITENAME` or `site_name`
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct GetArgs {
    /// Setting name
    pub(crate) name: String,

    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl GetArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        let value = config
            .get(&self.name)
            .with_context(|| format!("Unknown setting `{}`", self.name))?;
        let rendered = serde_yaml::to_string(&value)?;
        print!("{rendered}");

        Ok(())
    }
}
