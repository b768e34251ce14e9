use std::collections::BTreeMap;

use crate::args;
use crate::error::*;

/// Print site debug information
#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum DebugCommands {
    /// Prints the loaded config
    Config {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Prints every setting the generator sees, as JSON
    Settings {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Print the static files copied into the output
    Files {
        /// List the content sources instead
        #[arg(long)]
        content: bool,

        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Print plugins found under the plugin paths
    Plugins {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },
}

impl DebugCommands {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Config { config } => {
                let config = config.load_config()?;
                println!("{config}");
            }
            Self::Settings { config } => {
                let config = config.load_config()?;
                let settings: BTreeMap<_, _> = config
                    .settings()
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&settings)?);
            }
            Self::Files { content, config } => {
                let config = config.load_config()?;
                let files = if *content {
                    blogconf::files::content_files(&config)?
                } else {
                    blogconf::files::static_files(&config)?
                };
                for file in files {
                    println!("{}", file.rel_path);
                }
            }
            Self::Plugins { config } => {
                let config = config.load_config()?;
                for plugin in blogconf::plugins::discover(&config)? {
                    let marker = if config
                        .enabled_plugins
                        .iter()
                        .any(|name| name.as_str() == plugin.name)
                    {
                        "*"
                    } else {
                        " "
                    };
                    println!("{marker} {} ({})", plugin.name, plugin.search_path);
                }
            }
        }

        Ok(())
    }
}
