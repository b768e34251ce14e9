use crate::args;
use crate::error::*;

/// Look through a built site for feeds the configuration disables
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct AuditArgs {
    /// Output directory of a build
    pub(crate) destination: std::path::PathBuf,

    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl AuditArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        let stray = blogconf::feeds::audit_output(&config, &self.destination)?;
        if stray.is_empty() {
            log::info!("No disabled feeds in {}", self.destination.display());
            return Ok(());
        }

        for feed in &stray {
            println!("{feed}");
        }
        anyhow::bail!(
            "{} disabled feed file(s) found in {}",
            stray.len(),
            self.destination.display()
        );
    }
}
