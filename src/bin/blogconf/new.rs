use crate::error::*;

/// Create a new blog project
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct InitArgs {
    /// Target directory
    #[arg(default_value = "./")]
    pub(crate) directory: std::path::PathBuf,
}

impl InitArgs {
    pub(crate) fn run(&self) -> Result<()> {
        blogconf::create_new_project(&self.directory)
            .context("Could not create a new blog project")?;
        log::info!("Created new project at {}", self.directory.display());

        Ok(())
    }
}
